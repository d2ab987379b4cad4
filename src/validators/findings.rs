//! Structured validation findings
//!
//! Validators return plain data instead of printing. Each finding pairs
//! a [`FindingKind`] with the source line it points at; the rendered
//! message, the severity, and the machine-readable code all derive from
//! the kind.

use std::fmt;
use std::ops::Add;

use serde::Serialize;

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A defect that makes the registry inconsistent
    Error,
    /// A style problem worth fixing but not blocking
    Warning,
}

impl Severity {
    /// The label used in rendered messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a finding is about, with the context its message needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingKind {
    /// Enumerant name does not start with the required prefix
    MissingPrefix {
        /// Offending enumerant name
        name: String,
    },
    /// Enumerant name defined again with a different value
    ConflictingEnumerant {
        /// Enumerant name defined twice
        name: String,
        /// Value of the first definition
        first_value: i64,
        /// Source line of the first definition
        first_line: usize,
        /// Conflicting value of this definition
        value: i64,
    },
    /// Function name defined again elsewhere in the registry
    DuplicateFunction {
        /// Function name defined twice
        name: String,
        /// Source line of the first definition
        first_line: usize,
    },
    /// Parameter name repeated within one function
    DuplicateParameter {
        /// Repeated parameter name
        name: String,
    },
    /// Parameter type that resolves to nothing
    UnknownParameterType {
        /// Declared type, exactly as written (pointer marker included)
        type_name: String,
    },
    /// Parameter named a bare `id`
    VagueParameterName {
        /// The name as written
        name: String,
    },
    /// Pointer parameter without a count annotation
    PointerMissingCount,
    /// Pointer parameter without a flow annotation
    PointerMissingFlow,
}

impl FindingKind {
    /// Severity this kind reports at
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::MissingPrefix { .. }
            | FindingKind::ConflictingEnumerant { .. }
            | FindingKind::DuplicateFunction { .. }
            | FindingKind::DuplicateParameter { .. }
            | FindingKind::UnknownParameterType { .. } => Severity::Error,
            FindingKind::VagueParameterName { .. }
            | FindingKind::PointerMissingCount
            | FindingKind::PointerMissingFlow => Severity::Warning,
        }
    }

    /// Stable machine-readable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            FindingKind::MissingPrefix { .. } => "missing-prefix",
            FindingKind::ConflictingEnumerant { .. } => "conflicting-enumerant",
            FindingKind::DuplicateFunction { .. } => "duplicate-function",
            FindingKind::DuplicateParameter { .. } => "duplicate-parameter",
            FindingKind::UnknownParameterType { .. } => "unknown-parameter-type",
            FindingKind::VagueParameterName { .. } => "vague-parameter-name",
            FindingKind::PointerMissingCount => "pointer-missing-count",
            FindingKind::PointerMissingFlow => "pointer-missing-flow",
        }
    }
}

/// One validation finding, tied to its source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// What was found
    pub kind: FindingKind,
    /// 1-based source line of the offending element
    pub line: usize,
}

impl Finding {
    /// Create a new finding
    pub fn new(kind: FindingKind, line: usize) -> Self {
        Self { kind, line }
    }

    /// Severity of this finding
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FindingKind::MissingPrefix { .. } => {
                write!(f, "Error: Enumerant is missing prefix (line {})", self.line)
            }
            FindingKind::ConflictingEnumerant {
                name,
                first_value,
                first_line,
                value,
            } => {
                writeln!(f, "Error: Duplicate enumerant definition with conflicting values:")?;
                writeln!(
                    f,
                    "    Already defined: {} = {} (line {})",
                    name, first_value, first_line
                )?;
                write!(f, "    Duplicate: {} = {} (line {})", name, value, self.line)
            }
            FindingKind::DuplicateFunction { name, first_line } => {
                writeln!(f, "Error: Duplicate function definition:")?;
                writeln!(f, "    Already defined: {} (line {})", name, first_line)?;
                write!(f, "    Duplicate: {} (line {})", name, self.line)
            }
            FindingKind::DuplicateParameter { .. } => {
                write!(f, "Error: Duplicate parameter definition (line {})", self.line)
            }
            FindingKind::UnknownParameterType { type_name } => {
                write!(
                    f,
                    "Error: Unknown parameter type {} (line {})",
                    type_name, self.line
                )
            }
            FindingKind::VagueParameterName { .. } => {
                write!(
                    f,
                    "Warning: Vague parameter name (id of what, exactly?) (line {})",
                    self.line
                )
            }
            FindingKind::PointerMissingCount => {
                write!(f, "Warning: Pointer should have count (line {})", self.line)
            }
            FindingKind::PointerMissingFlow => {
                write!(f, "Warning: Pointer should have flow (line {})", self.line)
            }
        }
    }
}

/// Error and warning tallies for one validation phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseCounts {
    /// Number of error findings
    pub errors: usize,
    /// Number of warning findings
    pub warnings: usize,
}

impl PhaseCounts {
    /// Tally a list of findings by severity
    pub fn tally(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.severity() {
                Severity::Error => counts.errors += 1,
                Severity::Warning => counts.warnings += 1,
            }
        }
        counts
    }
}

impl Add for PhaseCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            errors: self.errors + other.errors,
            warnings: self.warnings + other.warnings,
        }
    }
}
