//! Consistency validators for signature registries
//!
//! Validation runs in two phases over an already-loaded registry. The
//! enumerant phase checks token names and values; the function phase
//! checks function names, parameter names, parameter types, and the
//! pointer annotation style rules. Both phases are pure: they return
//! findings in document order and leave rendering to the report module.

pub mod enums;
pub mod findings;
pub mod functions;

// Re-exports
pub use enums::check_enums;
pub use findings::{Finding, FindingKind, PhaseCounts, Severity};
pub use functions::check_functions;

use crate::catalog::TypeCatalog;
use crate::registry::Registry;

/// Findings of a full validation run, kept per phase
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Enumerant phase findings, in document order
    pub enum_findings: Vec<Finding>,
    /// Function phase findings, in document order
    pub function_findings: Vec<Finding>,
}

impl ValidationOutcome {
    /// Tallies for the enumerant phase
    pub fn enum_counts(&self) -> PhaseCounts {
        PhaseCounts::tally(&self.enum_findings)
    }

    /// Tallies for the function phase
    pub fn function_counts(&self) -> PhaseCounts {
        PhaseCounts::tally(&self.function_findings)
    }

    /// Grand totals across both phases
    pub fn totals(&self) -> PhaseCounts {
        self.enum_counts() + self.function_counts()
    }

    /// Whether any error-severity finding was recorded
    pub fn has_errors(&self) -> bool {
        self.totals().errors > 0
    }

    /// Iterate all findings, enumerant phase first
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.enum_findings.iter().chain(self.function_findings.iter())
    }
}

/// Run every validation phase over a registry
///
/// Builds the type catalog from the registry itself, then runs the
/// enumerant phase followed by the function phase.
pub fn validate_registry(registry: &Registry) -> ValidationOutcome {
    let catalog = TypeCatalog::from_registry(registry);

    ValidationOutcome {
        enum_findings: check_enums(registry),
        function_findings: check_functions(registry, &catalog),
    }
}
