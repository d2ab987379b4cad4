//! Signature registry documents
//!
//! This module provides the typed in-memory model of a signature
//! registry and the loader that builds it from XML. Every record keeps
//! the 1-based source line of the element it was parsed from, so the
//! validators and the report can point back into the document.
//!
//! # Document Shape
//!
//! ```xml
//! <signatures>
//!     <types>
//!         <type name="uint"/>
//!     </types>
//!     <api name="Core" version="1.0">
//!         <enum name="Color" extension="core">
//!             <token name="GA_RED" value="1"/>
//!         </enum>
//!         <function name="gaClearColor" extension="core">
//!             <param name="color" type="Color"/>
//!         </function>
//!     </api>
//! </signatures>
//! ```
//!
//! Unknown elements and attributes are skipped, so registries may carry
//! vendor annotations without breaking the loader.

use std::fs;
use std::path::Path;

use crate::error::{Error, RegistryError, Result};
use crate::CORE_EXTENSION;
use crate::POINTER_MARKER;

/// A name declared usable as a parameter type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    /// Declared type name
    pub name: String,
    /// Source line of the declaration
    pub line: usize,
}

/// One named integer constant inside an enum group
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Enumerant name
    pub name: String,
    /// Enumerant value
    pub value: i64,
    /// Source line of the token element
    pub line: usize,
}

/// A named group of tokens, tagged with the extension it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct EnumGroup {
    /// Group name (also usable as a parameter type)
    pub name: String,
    /// Extension tag; `core` marks a non-extension group
    pub extension: String,
    /// Tokens in document order
    pub tokens: Vec<Token>,
    /// Source line of the enum element
    pub line: usize,
}

impl EnumGroup {
    /// Whether this group belongs to a named extension rather than core
    pub fn is_extension(&self) -> bool {
        !self.extension.eq_ignore_ascii_case(CORE_EXTENSION)
    }
}

/// One formal parameter of a function
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name
    pub name: String,
    /// Declared type, exactly as written (pointer marker included)
    pub type_name: String,
    /// Element count annotation for pointer parameters
    pub count: Option<String>,
    /// Data flow annotation (`in` or `out`) for pointer parameters
    pub flow: Option<String>,
    /// Source line of the param element
    pub line: usize,
}

impl Param {
    /// The declared type with at most one trailing pointer marker removed
    ///
    /// A doubly-indirect type like `uint**` resolves to `uint*`, which
    /// keeps it distinct from the plain `uint` type.
    pub fn base_type(&self) -> &str {
        self.type_name
            .strip_suffix(POINTER_MARKER)
            .unwrap_or(&self.type_name)
    }

    /// Whether the declared type is a pointer
    pub fn is_pointer(&self) -> bool {
        self.type_name.ends_with(POINTER_MARKER)
    }
}

/// One function entry, tagged with the extension it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function name
    pub name: String,
    /// Extension tag; `core` marks a non-extension function
    pub extension: String,
    /// Parameters in declaration order
    pub params: Vec<Param>,
    /// Source line of the function element
    pub line: usize,
}

impl Function {
    /// Whether this function belongs to a named extension rather than core
    pub fn is_extension(&self) -> bool {
        !self.extension.eq_ignore_ascii_case(CORE_EXTENSION)
    }
}

/// One versioned API entry
#[derive(Debug, Clone, PartialEq)]
pub struct Api {
    /// API name
    pub name: String,
    /// API version string
    pub version: String,
    /// Enum groups in document order
    pub enums: Vec<EnumGroup>,
    /// Functions in document order
    pub functions: Vec<Function>,
    /// Source line of the api element
    pub line: usize,
}

impl Api {
    /// The `Name-Version` label used throughout the report
    pub fn label(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// A complete signature registry document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    /// APIs in document order
    pub apis: Vec<Api>,
    /// Top-level type declarations in document order
    pub types: Vec<TypeDecl>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| {
            Error::Resource(format!(
                "Failed to read registry '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_string(&content)
    }

    /// Parse a registry from an XML string
    pub fn from_string(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        Self::parse_document(&doc)
    }

    /// Iterate every token across all APIs and enum groups, in document order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.apis
            .iter()
            .flat_map(|api| &api.enums)
            .flat_map(|group| &group.tokens)
    }

    /// Iterate every function across all APIs, in document order
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.apis.iter().flat_map(|api| &api.functions)
    }

    /// Iterate every enum group across all APIs, in document order
    pub fn enum_groups(&self) -> impl Iterator<Item = &EnumGroup> {
        self.apis.iter().flat_map(|api| &api.enums)
    }

    /// Build the registry from a parsed document
    fn parse_document(doc: &roxmltree::Document) -> Result<Self> {
        let root = doc.root_element();
        if root.tag_name().name() != "signatures" {
            return Err(Error::Registry(
                RegistryError::new(format!(
                    "Expected signatures root element, got {}",
                    root.tag_name().name()
                ))
                .with_line(node_line(root)),
            ));
        }

        let mut registry = Self::new();
        for child in root.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                "types" => {
                    // <types><type name="..."/></types>
                    for decl in child.children().filter(|n| n.is_element()) {
                        if decl.tag_name().name() == "type" {
                            registry.types.push(TypeDecl {
                                name: require_attr(decl, "name")?.to_string(),
                                line: node_line(decl),
                            });
                        }
                    }
                }
                "api" => registry.apis.push(Self::parse_api(child)?),
                _ => {} // Skip unknown elements
            }
        }

        Ok(registry)
    }

    /// Parse an `<api>` element
    fn parse_api(node: roxmltree::Node) -> Result<Api> {
        let mut api = Api {
            name: require_attr(node, "name")?.to_string(),
            version: require_attr(node, "version")?.to_string(),
            enums: Vec::new(),
            functions: Vec::new(),
            line: node_line(node),
        };

        for child in node.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                "enum" => api.enums.push(Self::parse_enum_group(child)?),
                "function" => api.functions.push(Self::parse_function(child)?),
                _ => {} // Skip unknown elements
            }
        }

        Ok(api)
    }

    /// Parse an `<enum>` element and its tokens
    fn parse_enum_group(node: roxmltree::Node) -> Result<EnumGroup> {
        let mut group = EnumGroup {
            name: require_attr(node, "name")?.to_string(),
            extension: require_attr(node, "extension")?.to_string(),
            tokens: Vec::new(),
            line: node_line(node),
        };

        for child in node.children().filter(|n| n.is_element()) {
            if child.tag_name().name() == "token" {
                group.tokens.push(Self::parse_token(child)?);
            }
        }

        Ok(group)
    }

    /// Parse a `<token>` element
    fn parse_token(node: roxmltree::Node) -> Result<Token> {
        let line = node_line(node);

        let value_text = require_attr(node, "value")?;
        let value = value_text.parse::<i64>().map_err(|_| {
            Error::Registry(
                RegistryError::new(format!("Token value '{}' is not an integer", value_text))
                    .with_line(line),
            )
        })?;

        Ok(Token {
            name: require_attr(node, "name")?.to_string(),
            value,
            line,
        })
    }

    /// Parse a `<function>` element and its params
    fn parse_function(node: roxmltree::Node) -> Result<Function> {
        let mut function = Function {
            name: require_attr(node, "name")?.to_string(),
            extension: require_attr(node, "extension")?.to_string(),
            params: Vec::new(),
            line: node_line(node),
        };

        for child in node.children().filter(|n| n.is_element()) {
            if child.tag_name().name() == "param" {
                function.params.push(Self::parse_param(child)?);
            }
        }

        Ok(function)
    }

    /// Parse a `<param>` element
    fn parse_param(node: roxmltree::Node) -> Result<Param> {
        Ok(Param {
            name: require_attr(node, "name")?.to_string(),
            type_name: require_attr(node, "type")?.to_string(),
            count: node.attribute("count").map(str::to_string),
            flow: node.attribute("flow").map(str::to_string),
            line: node_line(node),
        })
    }
}

/// 1-based source line of a node in its document
fn node_line(node: roxmltree::Node) -> usize {
    node.document().text_pos_at(node.range().start).row as usize
}

/// Fetch a required attribute or fail, citing the node's line
fn require_attr<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        Error::Registry(
            RegistryError::new(format!(
                "{} element is missing the {} attribute",
                node.tag_name().name(),
                name
            ))
            .with_line(node_line(node)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_registry() {
        let xml = r#"<signatures>
    <types>
        <type name="uint"/>
    </types>
    <api name="Core" version="1.0">
        <enum name="Color" extension="core">
            <token name="GA_RED" value="1"/>
        </enum>
        <function name="gaClearColor" extension="core">
            <param name="color" type="Color"/>
        </function>
    </api>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();

        assert_eq!(registry.types.len(), 1);
        assert_eq!(registry.types[0].name, "uint");
        assert_eq!(registry.types[0].line, 3);

        assert_eq!(registry.apis.len(), 1);
        let api = &registry.apis[0];
        assert_eq!(api.name, "Core");
        assert_eq!(api.version, "1.0");
        assert_eq!(api.line, 5);
        assert_eq!(api.label(), "Core-1.0");

        assert_eq!(api.enums.len(), 1);
        let group = &api.enums[0];
        assert_eq!(group.name, "Color");
        assert_eq!(group.extension, "core");
        assert_eq!(group.line, 6);
        assert_eq!(
            group.tokens,
            vec![Token {
                name: "GA_RED".to_string(),
                value: 1,
                line: 7,
            }]
        );

        assert_eq!(api.functions.len(), 1);
        let function = &api.functions[0];
        assert_eq!(function.name, "gaClearColor");
        assert_eq!(function.extension, "core");
        assert_eq!(function.line, 9);
        assert_eq!(function.params.len(), 1);
        assert_eq!(function.params[0].name, "color");
        assert_eq!(function.params[0].type_name, "Color");
        assert_eq!(function.params[0].line, 10);
    }

    #[test]
    fn test_parse_with_declaration() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<signatures>
    <api name="Core" version="1.0">
        <enum name="Color" extension="core">
            <token name="GA_RED" value="1"/>
        </enum>
    </api>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();
        assert_eq!(registry.apis[0].enums[0].tokens[0].line, 5);
    }

    #[test]
    fn test_parse_param_annotations() {
        let xml = r#"<signatures>
    <api name="Core" version="1.0">
        <function name="gaReadPixels" extension="core">
            <param name="data" type="uint*" count="size" flow="out"/>
            <param name="size" type="uint"/>
        </function>
    </api>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();
        let params = &registry.apis[0].functions[0].params;

        assert_eq!(params[0].count.as_deref(), Some("size"));
        assert_eq!(params[0].flow.as_deref(), Some("out"));
        assert!(params[0].is_pointer());
        assert_eq!(params[0].base_type(), "uint");

        assert_eq!(params[1].count, None);
        assert_eq!(params[1].flow, None);
        assert!(!params[1].is_pointer());
        assert_eq!(params[1].base_type(), "uint");
    }

    #[test]
    fn test_base_type_strips_one_star() {
        let param = Param {
            name: "matrix".to_string(),
            type_name: "uint**".to_string(),
            count: None,
            flow: None,
            line: 1,
        };

        assert!(param.is_pointer());
        assert_eq!(param.base_type(), "uint*");
    }

    #[test]
    fn test_negative_token_value() {
        let xml = r#"<signatures>
    <api name="Core" version="1.0">
        <enum name="Special" extension="core">
            <token name="GA_INVALID_HANDLE" value="-1"/>
        </enum>
    </api>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();
        assert_eq!(registry.apis[0].enums[0].tokens[0].value, -1);
    }

    #[test]
    fn test_missing_attribute_is_error() {
        let xml = r#"<signatures>
    <api name="Core" version="1.0">
        <enum name="Color" extension="core">
            <token name="GA_RED"/>
        </enum>
    </api>
</signatures>"#;

        let err = Registry::from_string(xml).unwrap_err();
        assert!(matches!(err, Error::Registry(_)));

        let msg = format!("{}", err);
        assert!(msg.contains("value"));
        assert!(msg.contains("(line 4)"));
    }

    #[test]
    fn test_non_integer_token_value_is_error() {
        let xml = r#"<signatures>
    <api name="Core" version="1.0">
        <enum name="Color" extension="core">
            <token name="GA_RED" value="red"/>
        </enum>
    </api>
</signatures>"#;

        let err = Registry::from_string(xml).unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("not an integer"));
        assert!(msg.contains("(line 4)"));
    }

    #[test]
    fn test_wrong_root_element_is_error() {
        let err = Registry::from_string("<registry/>").unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("signatures"));
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let err = Registry::from_string("<signatures><api></signatures>").unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let xml = r#"<signatures>
    <comment>Maintained by the registry editors</comment>
    <api name="Core" version="1.0" supported="yes">
        <vendor name="ExampleSoft"/>
        <enum name="Color" extension="core">
            <unused/>
            <token name="GA_RED" value="1"/>
        </enum>
    </api>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();
        assert_eq!(registry.apis.len(), 1);
        assert_eq!(registry.apis[0].enums.len(), 1);
        assert_eq!(registry.apis[0].enums[0].tokens.len(), 1);
    }

    #[test]
    fn test_multiple_types_sections() {
        let xml = r#"<signatures>
    <types>
        <type name="uint"/>
    </types>
    <types>
        <type name="sizei"/>
    </types>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();
        let names: Vec<&str> = registry.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["uint", "sizei"]);
    }

    #[test]
    fn test_iterators_flatten_in_document_order() {
        let xml = r#"<signatures>
    <api name="Core" version="1.0">
        <enum name="Color" extension="core">
            <token name="GA_RED" value="1"/>
            <token name="GA_GREEN" value="2"/>
        </enum>
        <function name="gaFlush" extension="core"/>
    </api>
    <api name="Embedded" version="2.0">
        <enum name="Blend" extension="ext_blend">
            <token name="GA_BLEND_ADD" value="10"/>
        </enum>
        <function name="gaFinish" extension="core"/>
    </api>
</signatures>"#;

        let registry = Registry::from_string(xml).unwrap();

        let token_names: Vec<&str> = registry.tokens().map(|t| t.name.as_str()).collect();
        assert_eq!(token_names, vec!["GA_RED", "GA_GREEN", "GA_BLEND_ADD"]);

        let function_names: Vec<&str> = registry.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(function_names, vec!["gaFlush", "gaFinish"]);

        let group_names: Vec<&str> = registry.enum_groups().map(|g| g.name.as_str()).collect();
        assert_eq!(group_names, vec!["Color", "Blend"]);
    }

    #[test]
    fn test_extension_tag_is_case_insensitive() {
        let group = EnumGroup {
            name: "Color".to_string(),
            extension: "CORE".to_string(),
            tokens: Vec::new(),
            line: 1,
        };
        assert!(!group.is_extension());

        let group = EnumGroup {
            extension: "ext_blend".to_string(),
            ..group
        };
        assert!(group.is_extension());

        let function = Function {
            name: "gaFlush".to_string(),
            extension: "Core".to_string(),
            params: Vec::new(),
            line: 1,
        };
        assert!(!function.is_extension());
    }

    #[test]
    fn test_from_file() {
        let xml = r#"<signatures>
    <api name="Core" version="1.0">
        <enum name="Color" extension="core">
            <token name="GA_RED" value="1"/>
        </enum>
    </api>
</signatures>"#;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registry.xml");
        std::fs::write(&path, xml).unwrap();

        let registry = Registry::from_file(&path).unwrap();
        assert_eq!(registry.apis.len(), 1);
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = Registry::from_file(temp_dir.path().join("missing.xml")).unwrap_err();

        assert!(matches!(err, Error::Resource(_)));
        assert!(format!("{}", err).contains("missing.xml"));
    }
}
