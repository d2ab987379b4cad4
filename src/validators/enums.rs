//! Enumerant validation
//!
//! Walks every token in the registry, in document order, and checks two
//! things: the name carries the required prefix, and a name that is
//! defined more than once keeps the same value everywhere.

use std::collections::HashMap;

use super::findings::{Finding, FindingKind};
use crate::registry::Registry;
use crate::TOKEN_PREFIX;

/// Check every enumerant in the registry
///
/// Duplicate detection runs against the first occurrence of each name:
/// later definitions are compared against the first one, never against
/// each other. A redefinition with the same value is fine and records
/// nothing.
pub fn check_enums(registry: &Registry) -> Vec<Finding> {
    let mut findings = Vec::new();

    // First occurrence of each name; never overwritten
    let mut defined: HashMap<&str, (i64, usize)> = HashMap::new();

    for token in registry.tokens() {
        if !token.name.starts_with(TOKEN_PREFIX) {
            findings.push(Finding::new(
                FindingKind::MissingPrefix {
                    name: token.name.clone(),
                },
                token.line,
            ));
        }

        match defined.get(token.name.as_str()) {
            Some(&(first_value, first_line)) => {
                if first_value != token.value {
                    findings.push(Finding::new(
                        FindingKind::ConflictingEnumerant {
                            name: token.name.clone(),
                            first_value,
                            first_line,
                            value: token.value,
                        },
                        token.line,
                    ));
                }
            }
            None => {
                defined.insert(&token.name, (token.value, token.line));
            }
        }
    }

    findings
}
