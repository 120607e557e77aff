//! Schemas referenced from a `<types>` element
//!
//! Only what the validators need is kept: the schema's target namespace
//! and the qualified names of its global element declarations and type
//! definitions. Schema contents are not validated.

use crate::documents::Element;
use crate::namespaces::{QName, XSD_NAMESPACE};
use crate::reporter::ErrorLocator;

/// Global declarations of one schema document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDocument {
    /// The `targetNamespace` attribute, if any
    pub target_namespace: Option<String>,
    /// Global `xs:element` declarations
    pub element_declarations: Vec<QName>,
    /// Global `xs:complexType` / `xs:simpleType` definitions
    pub type_definitions: Vec<QName>,
}

impl SchemaDocument {
    /// Collect the global declarations of an `xs:schema` element
    pub fn from_element(schema: &Element) -> Self {
        let target_namespace = schema
            .get_attribute("targetNamespace")
            .map(|ns| ns.to_string());

        let qualify = |name: &str| QName::new(target_namespace.clone(), name);

        let mut element_declarations = Vec::new();
        let mut type_definitions = Vec::new();
        for child in &schema.children {
            if !child.qname.is_in(XSD_NAMESPACE) {
                continue;
            }
            let Some(name) = child.get_attribute("name") else {
                continue;
            };
            match child.local_name() {
                "element" => element_declarations.push(qualify(name)),
                "complexType" | "simpleType" => type_definitions.push(qualify(name)),
                _ => {}
            }
        }

        Self {
            target_namespace,
            element_declarations,
            type_definitions,
        }
    }

    /// Check whether this schema declares a global element
    pub fn declares_element(&self, name: &QName) -> bool {
        self.element_declarations.contains(name)
    }

    /// Check whether this schema defines a global type
    pub fn defines_type(&self, name: &QName) -> bool {
        self.type_definitions.contains(name)
    }
}

/// An `xs:import` child of `<types>`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSchema {
    /// The import's `namespace` attribute
    pub namespace: Option<String>,
    /// The import's `schemaLocation` attribute
    pub schema_location: Option<String>,
    /// The loaded schema, when the location could be read
    pub referenced: Option<SchemaDocument>,
    /// Where the import appears
    pub locator: ErrorLocator,
}

/// An `xs:schema` child of `<types>`
#[derive(Debug, Clone, PartialEq)]
pub struct InlinedSchema {
    /// The schema's `id` attribute
    pub id: Option<String>,
    /// The schema's declarations
    pub document: SchemaDocument,
    /// Where the schema appears
    pub locator: ErrorLocator,
}

impl InlinedSchema {
    /// The schema's target namespace
    pub fn target_namespace(&self) -> Option<&str> {
        self.document.target_namespace.as_deref()
    }
}

/// A schema made available by `<types>`
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Brought in by `xs:import`
    Imported(ImportedSchema),
    /// Written inline as `xs:schema`
    Inlined(InlinedSchema),
}

impl Schema {
    /// Namespace this schema contributes components to
    ///
    /// For an import this is the declared `namespace`; for an inline
    /// schema its `targetNamespace`.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Schema::Imported(imported) => imported.namespace.as_deref(),
            Schema::Inlined(inlined) => inlined.target_namespace(),
        }
    }

    /// The declarations of this schema, when available
    pub fn document(&self) -> Option<&SchemaDocument> {
        match self {
            Schema::Imported(imported) => imported.referenced.as_ref(),
            Schema::Inlined(inlined) => Some(&inlined.document),
        }
    }

    /// Where the schema appears
    pub fn locator(&self) -> &ErrorLocator {
        match self {
            Schema::Imported(imported) => &imported.locator,
            Schema::Inlined(inlined) => &inlined.locator,
        }
    }
}
