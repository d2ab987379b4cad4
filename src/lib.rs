//! # sigcheck
//!
//! Consistency checker for XML API signature registries.
//!
//! A signature registry lists the surface of an API family: versioned
//! `api` entries, their `enum` groups of named integer tokens, and
//! their `function` entries with typed parameters. Registries are
//! authored by hand and consumed by code generators, so authoring
//! slips need to be caught before generation. This library loads a
//! registry, runs every consistency rule over it, and renders a report
//! of errors, warnings, and per-API statistics.
//!
//! ## Checks
//!
//! - every enumerant name carries the `GA_` prefix
//! - an enumerant defined more than once keeps the same value
//! - function names are unique across the whole document
//! - parameter names are unique within one function
//! - every parameter type resolves against the declared types and the
//!   enum group names
//! - style warnings: parameters named `id`, pointer parameters without
//!   `count` or `flow` annotations
//!
//! ## Example
//!
//! ```rust,ignore
//! use sigcheck::registry::Registry;
//! use sigcheck::report::render_report;
//! use sigcheck::validators::validate_registry;
//!
//! // Load a registry
//! let registry = Registry::from_file("signatures.xml")?;
//!
//! // Run both validation phases
//! let outcome = validate_registry(&registry);
//!
//! // Render the plain-text report
//! print!("{}", render_report("signatures.xml", &registry, &outcome));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Loading
pub mod error;
pub mod registry;

// Validation
pub mod catalog;
pub mod validators;

// Rendering
pub mod report;

// Re-exports for convenience
pub use error::{Error, Result};
pub use registry::Registry;
pub use validators::{validate_registry, ValidationOutcome};

/// Version of the sigcheck library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Required prefix for every enumerant name
pub const TOKEN_PREFIX: &str = "GA_";

/// Extension tag marking an entry as core rather than an extension
/// (compared case-insensitively)
pub const CORE_EXTENSION: &str = "core";

/// Trailing marker that makes a parameter type a pointer
pub const POINTER_MARKER: char = '*';
