//! Report rendering and per-API statistics
//!
//! The report is plain text with a fixed shape: the enumerant phase,
//! the function phase, a grand total line naming the source, the list
//! of API versions, and one statistics block per API. Counts are
//! derived from the findings, so the rendered tallies always agree
//! with the findings printed above them.

use std::io::Write;

use indexmap::IndexSet;
use serde::Serialize;

use crate::error::Result;
use crate::registry::{Api, Registry};
use crate::validators::{Finding, ValidationOutcome};

/// Per-API summary numbers for the statistics blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiStats {
    /// API name
    pub name: String,
    /// API version string
    pub version: String,
    /// Total function count
    pub functions: usize,
    /// Functions tagged with a non-core extension
    pub extension_functions: usize,
    /// Total token count across all enum groups
    pub enumerants: usize,
    /// Tokens belonging to non-core enum groups
    pub extension_enumerants: usize,
    /// Total enum group count
    pub enum_groups: usize,
    /// Enum groups tagged with a non-core extension
    pub extension_enum_groups: usize,
    /// Distinct non-core extension tags of the enum groups, in order of
    /// first appearance
    pub extensions: Vec<String>,
}

impl ApiStats {
    /// Collect the statistics for one API
    pub fn collect(api: &Api) -> Self {
        let mut extensions: IndexSet<&str> = IndexSet::new();
        let mut enumerants = 0;
        let mut extension_enumerants = 0;
        let mut extension_enum_groups = 0;

        for group in &api.enums {
            enumerants += group.tokens.len();
            if group.is_extension() {
                extension_enum_groups += 1;
                extension_enumerants += group.tokens.len();
                extensions.insert(&group.extension);
            }
        }

        Self {
            name: api.name.clone(),
            version: api.version.clone(),
            functions: api.functions.len(),
            extension_functions: api.functions.iter().filter(|f| f.is_extension()).count(),
            enumerants,
            extension_enumerants,
            enum_groups: api.enums.len(),
            extension_enum_groups,
            extensions: extensions.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Write the full plain-text report
///
/// `source` names the registry in the grand total line, usually the
/// path the document was loaded from.
pub fn write_report<W: Write>(
    w: &mut W,
    source: &str,
    registry: &Registry,
    outcome: &ValidationOutcome,
) -> Result<()> {
    writeln!(w, "Checking enums...")?;
    writeln!(w)?;
    for finding in &outcome.enum_findings {
        writeln!(w, "{}", finding)?;
    }
    writeln!(w)?;
    let enum_counts = outcome.enum_counts();
    writeln!(
        w,
        "{} errors and {} warnings in enums.",
        enum_counts.errors, enum_counts.warnings
    )?;
    writeln!(w)?;

    writeln!(w, "Checking functions...")?;
    writeln!(w)?;
    for finding in &outcome.function_findings {
        writeln!(w, "{}", finding)?;
    }
    writeln!(w)?;
    let function_counts = outcome.function_counts();
    writeln!(
        w,
        "{} errors and {} warnings in functions.",
        function_counts.errors, function_counts.warnings
    )?;
    writeln!(w)?;

    let totals = outcome.totals();
    writeln!(
        w,
        "{} errors and {} warnings in {}",
        totals.errors, totals.warnings, source
    )?;
    writeln!(w)?;

    let labels: Vec<String> = registry.apis.iter().map(Api::label).collect();
    writeln!(w, "API Versions: {}", labels.join(", "))?;
    writeln!(w)?;

    for api in &registry.apis {
        let stats = ApiStats::collect(api);
        writeln!(w, "{}:", api.label())?;
        writeln!(w)?;
        writeln!(
            w,
            "    Functions: {} ({} are extensions)",
            stats.functions, stats.extension_functions
        )?;
        writeln!(
            w,
            "    Enumerants: {} ({} are extensions)",
            stats.enumerants, stats.extension_enumerants
        )?;
        writeln!(
            w,
            "    Enums: {} ({} are extensions)",
            stats.enum_groups, stats.extension_enum_groups
        )?;
        writeln!(w, "    Extensions:")?;
        for extension in &stats.extensions {
            writeln!(w, "        {}", extension)?;
        }
    }

    Ok(())
}

/// Render the report to a string
pub fn render_report(source: &str, registry: &Registry, outcome: &ValidationOutcome) -> String {
    let mut buf = Vec::new();
    write_report(&mut buf, source, registry, outcome).expect("writing to memory is infallible");
    String::from_utf8(buf).expect("report output is valid UTF-8")
}

/// Build the machine-readable form of the report
///
/// Carries the same content as the plain-text report: findings per
/// phase with their rendered messages, the per-phase and grand total
/// tallies, and the per-API statistics.
pub fn report_json(
    source: &str,
    registry: &Registry,
    outcome: &ValidationOutcome,
) -> serde_json::Value {
    let stats: Vec<ApiStats> = registry.apis.iter().map(ApiStats::collect).collect();

    serde_json::json!({
        "source": source,
        "enums": {
            "findings": findings_json(&outcome.enum_findings),
            "counts": outcome.enum_counts(),
        },
        "functions": {
            "findings": findings_json(&outcome.function_findings),
            "counts": outcome.function_counts(),
        },
        "totals": outcome.totals(),
        "apis": stats,
    })
}

/// JSON form of a list of findings
fn findings_json(findings: &[Finding]) -> Vec<serde_json::Value> {
    findings
        .iter()
        .map(|finding| {
            serde_json::json!({
                "code": finding.kind.code(),
                "severity": finding.severity(),
                "line": finding.line,
                "message": finding.to_string(),
            })
        })
        .collect()
}
