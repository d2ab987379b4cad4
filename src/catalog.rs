//! Parameter type resolution
//!
//! This module builds the set of names a parameter type may resolve to.
//! A registry never declares pointer types explicitly: a parameter
//! written as `uint*` resolves through its base type `uint`.
//!
//! Two kinds of names are usable as a parameter type:
//!
//! - `<type>` declarations from the top-level `<types>` sections
//! - enum group names (a group name doubles as the type of any
//!   parameter that accepts one of its tokens)

use std::collections::HashSet;

use crate::registry::Registry;

/// The set of names usable as a parameter type
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    /// Known names: declared types plus enum group names
    names: HashSet<String>,
}

impl TypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog for a registry
    ///
    /// Collects every declared type name and every enum group name
    /// across all APIs. Duplicate names collapse into one entry.
    pub fn from_registry(registry: &Registry) -> Self {
        let mut catalog = Self::new();

        for decl in &registry.types {
            catalog.names.insert(decl.name.clone());
        }
        for group in registry.enum_groups() {
            catalog.names.insert(group.name.clone());
        }

        catalog
    }

    /// Check whether a base type name resolves
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Check if this catalog is empty (has no usable names)
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get the number of distinct usable names
    pub fn len(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_unions_types_and_group_names() {
        let xml = r#"<signatures>
    <types>
        <type name="uint"/>
        <type name="sizei"/>
    </types>
    <api name="Core" version="1.0">
        <enum name="Color" extension="core">
            <token name="GA_RED" value="1"/>
        </enum>
    </api>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();
        let catalog = TypeCatalog::from_registry(&registry);

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("uint"));
        assert!(catalog.contains("sizei"));
        assert!(catalog.contains("Color"));
        assert!(!catalog.contains("float"));
    }

    #[test]
    fn test_group_names_from_every_api() {
        let xml = r#"<signatures>
    <api name="Core" version="1.0">
        <enum name="Color" extension="core"/>
    </api>
    <api name="Embedded" version="2.0">
        <enum name="Blend" extension="ext_blend"/>
    </api>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();
        let catalog = TypeCatalog::from_registry(&registry);

        assert!(catalog.contains("Color"));
        assert!(catalog.contains("Blend"));
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let xml = r#"<signatures>
    <types>
        <type name="Color"/>
    </types>
    <api name="Core" version="1.0">
        <enum name="Color" extension="core"/>
    </api>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();
        let catalog = TypeCatalog::from_registry(&registry);

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = TypeCatalog::from_registry(&Registry::new());

        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(!catalog.contains("uint"));
    }

    #[test]
    fn test_pointer_lookup_goes_through_base_type() {
        let xml = r#"<signatures>
    <types>
        <type name="uint"/>
    </types>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();
        let catalog = TypeCatalog::from_registry(&registry);

        // Callers strip the pointer marker before asking the catalog
        assert!(catalog.contains("uint"));
        assert!(!catalog.contains("uint*"));
    }
}
