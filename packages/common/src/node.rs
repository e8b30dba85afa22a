use serde::{Deserialize, Serialize};

/// Tag-name value of the `is` attribute marking a repeating template.
pub const REPEAT_TEMPLATE_IS: &str = "dom-repeat";

/// Tag-name value of the `is` attribute marking a conditional template.
pub const CONDITIONAL_TEMPLATE_IS: &str = "dom-if";

/// List element that repeats its light-dom template per item.
pub const LIST_ELEMENT_TAG: &str = "iron-list";

/// Elements whose contents are not template bindings.
pub const BLACKLISTED_TAGS: &[&str] = &["script", "style"];

/// Attributes consumed by the repeating-container machinery itself.
pub const REPEAT_CONTAINER_ATTRIBUTES: &[&str] = &[
    "items",
    "as",
    "index-as",
    "items-index-as",
    "sort",
    "filter",
    "observe",
];

/// Per-item alias name when a repeating container has no `as` attribute.
pub const DEFAULT_ITEM_ALIAS: &str = "item";

/// Per-index alias name when a repeating container has no `index-as`
/// attribute.
pub const DEFAULT_INDEX_ALIAS: &str = "index";

/// Items-index alias name when a repeating container has no
/// `items-index-as` attribute.
pub const DEFAULT_ITEMS_INDEX_ALIAS: &str = "itemsIndexAs";

/// One attribute of a template element, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A node of the template tree supplied by the external markup parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TemplateNode {
    Element(ElementNode),
    Text { content: String },
    Comment { content: String },
}

impl TemplateNode {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Self::Comment {
            content: content.into(),
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<ElementNode> for TemplateNode {
    fn from(element: ElementNode) -> Self {
        Self::Element(element)
    }
}

/// Element node (tag, ordered attributes, children)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub tag_name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<TemplateNode>,
}

impl ElementNode {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute append, used by tests and embedders.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Builder-style child append.
    pub fn child(mut self, node: impl Into<TemplateNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// The effective tag name: `<template is="dom-repeat">` acts as a
    /// `dom-repeat` element, not a `template`.
    pub fn actual_tag_name(&self) -> &str {
        if self.tag_name == "template" {
            if let Some(is) = self.attribute("is") {
                if !is.is_empty() {
                    return is;
                }
            }
        }
        &self.tag_name
    }

    pub fn is_repeat_container(&self) -> bool {
        self.actual_tag_name() == REPEAT_TEMPLATE_IS || self.tag_name == LIST_ELEMENT_TAG
    }

    pub fn is_conditional_container(&self) -> bool {
        self.actual_tag_name() == CONDITIONAL_TEMPLATE_IS
    }

    pub fn is_blacklisted(&self) -> bool {
        BLACKLISTED_TAGS.contains(&self.tag_name.as_str())
    }

    /// True for attributes the repeat machinery consumes (`items`, `as`, ...).
    pub fn is_repeat_container_attribute(name: &str) -> bool {
        REPEAT_CONTAINER_ATTRIBUTES.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actual_tag_name_resolves_is() {
        let repeat = ElementNode::new("template").attr("is", "dom-repeat");
        assert_eq!(repeat.actual_tag_name(), "dom-repeat");

        let plain = ElementNode::new("template");
        assert_eq!(plain.actual_tag_name(), "template");

        let div = ElementNode::new("div").attr("is", "whatever");
        assert_eq!(div.actual_tag_name(), "div");
    }

    #[test]
    fn test_repeat_container_recognition() {
        assert!(ElementNode::new("template")
            .attr("is", "dom-repeat")
            .is_repeat_container());
        assert!(ElementNode::new("iron-list")
            .attr("items", "[[rows]]")
            .is_repeat_container());
        assert!(!ElementNode::new("template")
            .attr("is", "dom-if")
            .is_repeat_container());
        assert!(!ElementNode::new("div").is_repeat_container());
    }

    #[test]
    fn test_conditional_and_blacklist_recognition() {
        assert!(ElementNode::new("template")
            .attr("is", "dom-if")
            .is_conditional_container());
        assert!(ElementNode::new("script").is_blacklisted());
        assert!(ElementNode::new("style").is_blacklisted());
        assert!(!ElementNode::new("span").is_blacklisted());
    }

    #[test]
    fn test_attribute_lookup_keeps_document_order() {
        let element = ElementNode::new("div")
            .attr("a", "1")
            .attr("b", "2")
            .attr("a", "3");
        let names: Vec<&str> = element
            .attributes
            .iter()
            .map(|attribute| attribute.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        // Lookup returns the first occurrence.
        assert_eq!(element.attribute("a"), Some("1"));
    }

    #[test]
    fn test_node_tree_wire_format() {
        let tree: TemplateNode = ElementNode::new("div")
            .attr("title", "[[a]]")
            .child(TemplateNode::text("hi"))
            .into();
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"type":"Element","tag_name":"div","attributes":[{"name":"title","value":"[[a]]"}],"children":[{"type":"Text","content":"hi"}]}"#
        );
        assert_eq!(serde_json::from_str::<TemplateNode>(&json).unwrap(), tree);
    }
}
