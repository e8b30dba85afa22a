use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared kind of a component property, as reported by the external
/// host-source analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclaredPropertyKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Other,
}

/// What the host source declares about one component property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub kind: DeclaredPropertyKind,
}

impl PropertyInfo {
    pub fn new(kind: DeclaredPropertyKind) -> Self {
        Self { kind }
    }
}

/// Opaque per-tag, per-property metadata table supplied by an external
/// collaborator. The core never inspects host sources itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementMetadata {
    elements: HashMap<String, HashMap<String, PropertyInfo>>,
}

impl ElementMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_property(
        &mut self,
        tag_name: impl Into<String>,
        property: impl Into<String>,
        info: PropertyInfo,
    ) {
        self.elements
            .entry(tag_name.into())
            .or_default()
            .insert(property.into(), info);
    }

    pub fn property(&self, tag_name: &str, property: &str) -> Option<&PropertyInfo> {
        self.elements.get(tag_name)?.get(property)
    }

    pub fn has_element(&self, tag_name: &str) -> bool {
        self.elements.contains_key(tag_name)
    }
}
