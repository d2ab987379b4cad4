//! Function validation
//!
//! Walks every function in the registry, in document order. Function
//! names must be unique across the whole document; within one function,
//! parameter names must be unique, every parameter type must resolve
//! against the catalog, and a few style rules apply:
//!
//! - a parameter named `id` earns a vague-name warning
//! - a pointer parameter should carry `count` and `flow` annotations

use std::collections::{HashMap, HashSet};

use super::findings::{Finding, FindingKind};
use crate::catalog::TypeCatalog;
use crate::registry::Registry;

/// Check every function and parameter in the registry
///
/// Each check is independent: a duplicate parameter still has its type
/// resolved, and a pointer with an unknown type still gets its
/// annotation warnings. Duplicate detection runs against the first
/// occurrence of each function name.
pub fn check_functions(registry: &Registry, catalog: &TypeCatalog) -> Vec<Finding> {
    let mut findings = Vec::new();

    // First definition line of each function name; never overwritten
    let mut defined: HashMap<&str, usize> = HashMap::new();

    for function in registry.functions() {
        match defined.get(function.name.as_str()) {
            Some(&first_line) => {
                findings.push(Finding::new(
                    FindingKind::DuplicateFunction {
                        name: function.name.clone(),
                        first_line,
                    },
                    function.line,
                ));
            }
            None => {
                defined.insert(&function.name, function.line);
            }
        }

        let mut seen_params: HashSet<&str> = HashSet::new();
        for param in &function.params {
            if !seen_params.insert(&param.name) {
                findings.push(Finding::new(
                    FindingKind::DuplicateParameter {
                        name: param.name.clone(),
                    },
                    param.line,
                ));
            }

            if !catalog.contains(param.base_type()) {
                findings.push(Finding::new(
                    FindingKind::UnknownParameterType {
                        type_name: param.type_name.clone(),
                    },
                    param.line,
                ));
            }

            if param.name.eq_ignore_ascii_case("id") {
                findings.push(Finding::new(
                    FindingKind::VagueParameterName {
                        name: param.name.clone(),
                    },
                    param.line,
                ));
            }

            if param.is_pointer() {
                if param.count.is_none() {
                    findings.push(Finding::new(FindingKind::PointerMissingCount, param.line));
                }
                if param.flow.is_none() {
                    findings.push(Finding::new(FindingKind::PointerMissingFlow, param.line));
                }
            }
        }
    }

    findings
}
