use crate::error::{InferenceError, InferenceResult};
use crate::observe::{observe_expression, ObservationSet, PathObservation, PathSegment, TerminalKind};
use crate::scope::{AliasScope, AliasTarget};
use crate::shape::ShapeTree;
use bindshape_common::{
    is_valid_identifier, Attribute, ElementNode, ProblemLog, TemplateNode, DEFAULT_INDEX_ALIAS,
    DEFAULT_ITEMS_INDEX_ALIAS, DEFAULT_ITEM_ALIAS,
};
use bindshape_parser::{extract_binding_parts, parse_binding_expression, Expression};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{debug, instrument};

/// A single-binding attribute targeting a declared element property,
/// kept so the use checker can probe the assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyBinding {
    /// Effective tag name of the target element
    pub tag_name: String,

    /// Attribute name as written in the markup
    pub attribute: String,

    /// Canonicalized path of the bound expression
    pub observation: PathObservation,
}

/// Everything inferred from one template
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Inference {
    pub shape: ShapeTree,
    pub property_bindings: Vec<PropertyBinding>,
}

/// Walks a parsed template tree and infers the data-context shape it
/// expects, in document order.
///
/// Expression parse failures abort this template. Recoverable findings
/// (missing `items`, invalid alias names, arity conflicts) are appended
/// to `problems` and the walk continues.
#[instrument(skip(nodes, problems), fields(template = template, node_count = nodes.len()))]
pub fn infer_template(
    nodes: &[TemplateNode],
    template: &str,
    problems: &mut ProblemLog,
) -> InferenceResult<Inference> {
    let mut walker = Walker {
        template,
        problems,
        inference: Inference::default(),
    };
    let scope = Rc::new(AliasScope::new());
    walker.walk_nodes(nodes, &scope)?;

    debug!(
        roots = walker.inference.shape.roots.len(),
        property_bindings = walker.inference.property_bindings.len(),
        "Template walk complete"
    );
    Ok(walker.inference)
}

struct Walker<'a> {
    template: &'a str,
    problems: &'a mut ProblemLog,
    inference: Inference,
}

impl Walker<'_> {
    fn walk_nodes(&mut self, nodes: &[TemplateNode], scope: &Rc<AliasScope>) -> InferenceResult<()> {
        for node in nodes {
            match node {
                TemplateNode::Element(element) => self.walk_element(element, scope)?,
                TemplateNode::Text { content } => self.collect_text(content, scope)?,
                TemplateNode::Comment { .. } => {}
            }
        }
        Ok(())
    }

    fn walk_element(&mut self, element: &ElementNode, scope: &Rc<AliasScope>) -> InferenceResult<()> {
        if element.is_repeat_container() {
            return self.walk_repeat(element, scope);
        }

        for attribute in &element.attributes {
            self.collect_attribute(element, attribute, scope)?;
        }

        // Script-like contents are not binding expressions.
        if element.is_blacklisted() {
            return Ok(());
        }
        self.walk_nodes(&element.children, scope)
    }

    /// Repeating container: merge the `items` source as a list, then walk
    /// the children under item/index aliases bound to one element of it.
    fn walk_repeat(&mut self, element: &ElementNode, scope: &Rc<AliasScope>) -> InferenceResult<()> {
        let tag_name = element.actual_tag_name().to_string();

        let mut items_target = None;
        let mut saw_items = false;
        for attribute in &element.attributes {
            if ElementNode::is_repeat_container_attribute(&attribute.name) {
                if attribute.name == "items" {
                    saw_items = true;
                    items_target = self.collect_repeat_items(element, attribute, scope)?;
                }
                continue;
            }
            self.collect_attribute(element, attribute, scope)?;
        }

        if !saw_items {
            self.problems.problem_with_element(
                self.template,
                &tag_name,
                r#"The "items" attribute is missed"#,
            );
            return Ok(());
        }
        let Some(items_target) = items_target else {
            // Problem already reported; nothing to alias the children to.
            return Ok(());
        };

        let item_alias = self.alias_name(element, "as", DEFAULT_ITEM_ALIAS);
        let index_alias = self.alias_name(element, "index-as", DEFAULT_INDEX_ALIAS);
        debug!(container = %tag_name, item_alias = %item_alias, "Entering repeat scope");

        let mut child_scope = AliasScope::with_parent(scope.clone());
        child_scope.bind(item_alias, AliasTarget::Item(items_target));
        child_scope.bind(index_alias, AliasTarget::Index);
        if let Some(value) = element.attribute("items-index-as") {
            let name = self.validated_alias(element, "items-index-as", value, DEFAULT_ITEMS_INDEX_ALIAS);
            child_scope.bind(name, AliasTarget::Index);
        }

        self.walk_nodes(&element.children, &Rc::new(child_scope))
    }

    /// Merges the `items` binding and returns the canonical per-item path:
    /// the items path with one extra trailing array group.
    fn collect_repeat_items(
        &mut self,
        element: &ElementNode,
        attribute: &Attribute,
        scope: &AliasScope,
    ) -> InferenceResult<Option<Vec<PathSegment>>> {
        let tag_name = element.actual_tag_name();

        let extracted = extract_binding_parts(&attribute.value);
        let Some((_, text)) = extracted.single_binding() else {
            self.problems.problem_with_attribute(
                self.template,
                tag_name,
                "items",
                r#"The "items" attribute must be a single binding expression"#,
            );
            return Ok(None);
        };

        let expression = self.parse_expression(text)?;
        let set = observe_expression(&expression, scope, TerminalKind::List);
        self.merge_set(&set);

        let Some(main) = set.main else {
            self.problems.problem_with_attribute(
                self.template,
                tag_name,
                "items",
                r#"The "items" attribute must bind a data path"#,
            );
            return Ok(None);
        };
        let mut target = main.segments;
        if let Some(last) = target.last_mut() {
            last.array_groups += 1;
        }
        Ok(Some(target))
    }

    fn collect_attribute(
        &mut self,
        element: &ElementNode,
        attribute: &Attribute,
        scope: &AliasScope,
    ) -> InferenceResult<()> {
        // `on-*` values are raw handler expressions, not delimited bindings.
        if attribute.name.starts_with("on-") {
            let expression = self.parse_expression(&attribute.value)?;
            let set = observe_expression(
                &expression,
                scope,
                TerminalKind::Function { argument_count: 1 },
            );
            self.merge_set(&set);
            return Ok(());
        }

        let extracted = extract_binding_parts(&attribute.value);
        match extracted.single_binding() {
            Some((_, text)) => {
                let expression = self.parse_expression(text)?;
                let set = observe_expression(&expression, scope, TerminalKind::Value);
                self.merge_set(&set);

                // Attribute bindings (`$` suffix) set markup attributes, not
                // element properties, so they get no assignment probe.
                if !attribute.name.ends_with('$') {
                    if let Some(observation) = set.main {
                        self.inference.property_bindings.push(PropertyBinding {
                            tag_name: element.actual_tag_name().to_string(),
                            attribute: attribute.name.clone(),
                            observation,
                        });
                    }
                }
            }
            None => {
                for (_, text) in extracted.bindings() {
                    let expression = self.parse_expression(text)?;
                    let set = observe_expression(&expression, scope, TerminalKind::Value);
                    self.merge_set(&set);
                }
            }
        }
        Ok(())
    }

    fn collect_text(&mut self, content: &str, scope: &AliasScope) -> InferenceResult<()> {
        let extracted = extract_binding_parts(content);
        for (_, text) in extracted.bindings() {
            let expression = self.parse_expression(text)?;
            let set = observe_expression(&expression, scope, TerminalKind::Value);
            self.merge_set(&set);
        }
        Ok(())
    }

    fn merge_set(&mut self, set: &ObservationSet) {
        for observation in set.iter() {
            self.inference
                .shape
                .merge(observation, self.template, self.problems);
        }
    }

    fn parse_expression(&self, text: &str) -> InferenceResult<Expression> {
        let binding = parse_binding_expression(text)
            .map_err(|source| InferenceError::expression(text, source))?;
        Ok(binding.expression)
    }

    /// Alias name taken from `attribute`, falling back to `default` when
    /// the attribute is absent or its value is not a valid identifier.
    fn alias_name(&mut self, element: &ElementNode, attribute: &str, default: &str) -> String {
        match element.attribute(attribute) {
            Some(value) => self.validated_alias(element, attribute, value, default),
            None => default.to_string(),
        }
    }

    fn validated_alias(
        &mut self,
        element: &ElementNode,
        attribute: &str,
        value: &str,
        default: &str,
    ) -> String {
        if is_valid_identifier(value) {
            value.to_string()
        } else {
            self.problems.problem_with_attribute(
                self.template,
                element.actual_tag_name(),
                attribute,
                format!("Attribute value '{}' must be a valid identifier", value),
            );
            default.to_string()
        }
    }
}
