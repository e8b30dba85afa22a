use crate::attributes::is_html_attribute;
use crate::builder::CodeBuilder;
use crate::error::{TranspileError, TranspileResult};
use crate::handlers::NodeHandler;
use crate::transpiler::{AttributeValueType, TemplateTranspiler};
use bindshape_common::{
    kebab_to_camel, Attribute, DeclaredPropertyKind, ElementNode, TemplateNode,
};

/// Lowers any element without special binding semantics: an `el` constant
/// block with one statement per bound attribute, then the children.
pub struct ElementHandler;

impl NodeHandler for ElementHandler {
    fn can_transpile(&self, node: &TemplateNode) -> bool {
        node.as_element().is_some()
    }

    fn transpile(
        &self,
        transpiler: &mut TemplateTranspiler<'_>,
        builder: &mut CodeBuilder,
        node: &TemplateNode,
    ) -> TranspileResult<()> {
        let element = expect_element(node)?;
        transpile_tag_without_children(transpiler, builder, element, |_| true)?;
        transpiler.transpile_nodes(builder, &element.children)
    }
}

pub(crate) fn expect_element(node: &TemplateNode) -> TranspileResult<&ElementNode> {
    node.as_element().ok_or_else(|| {
        TranspileError::Internal("element handler dispatched on a non-element node".into())
    })
}

/// Emits the element block: `el` constant plus one statement per kept
/// attribute. Children are left to the caller since repeat and conditional
/// containers place them inside their own scope blocks.
pub(crate) fn transpile_tag_without_children(
    transpiler: &mut TemplateTranspiler<'_>,
    builder: &mut CodeBuilder,
    element: &ElementNode,
    keep: impl Fn(&str) -> bool,
) -> TranspileResult<()> {
    builder.begin_element(element.actual_tag_name());
    for attribute in &element.attributes {
        if attribute.name == "is" {
            continue;
        }
        if !keep(&attribute.name) {
            continue;
        }
        transpile_attribute(transpiler, builder, element, attribute)?;
    }
    builder.end_element();
    Ok(())
}

pub(crate) fn transpile_attribute(
    transpiler: &mut TemplateTranspiler<'_>,
    builder: &mut CodeBuilder,
    element: &ElementNode,
    attribute: &Attribute,
) -> TranspileResult<()> {
    if let Some(event) = attribute.name.strip_prefix("on-") {
        builder.subscribe_event(event, &attribute.value, transpiler.context());
        return Ok(());
    }

    let value = transpiler.transpile_attribute_value(&attribute.value)?;
    let tag_name = element.actual_tag_name();

    if let Some(target) = attribute.name.strip_suffix('$') {
        // An explicit attribute binding never has a property to read back,
        // so no reverse assignment even for a two-way marker.
        if !value.whitespace_only {
            builder.add_attribute_set(target, &value.string_expression);
        }
        return Ok(());
    }

    if is_html_attribute(tag_name, &attribute.name) {
        if !value.whitespace_only {
            builder.add_attribute_set(&attribute.name, &value.string_expression);
        }
    } else if value.value_type == AttributeValueType::TextOnly {
        let property = kebab_to_camel(&attribute.name);
        if let Some(info) = transpiler.metadata().property(tag_name, &property) {
            let literal = literal_property_value(&attribute.value, &value.expression, info.kind);
            builder.add_element_property_set(&attribute.name, &literal);
        }
    } else {
        builder.add_element_property_set(&attribute.name, &value.expression);
    }

    if value.value_type == AttributeValueType::TwoWay
        && !transpiler.context().local_vars.contains(&value.expression)
    {
        builder.add_value_set_from_property(
            &value.reverse_expression,
            &attribute.name,
            value.negation,
        );
    }
    Ok(())
}

/// Converts a literal attribute value per the declared property kind, the
/// way the binding runtime deserializes attribute strings.
fn literal_property_value(raw: &str, expression: &str, kind: DeclaredPropertyKind) -> String {
    match kind {
        DeclaredPropertyKind::Boolean => {
            if raw.is_empty() || raw == "true" {
                "true".into()
            } else {
                "false".into()
            }
        }
        DeclaredPropertyKind::Number => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                "0".into()
            } else {
                trimmed
                    .parse::<f64>()
                    .map(|number| number.to_string())
                    .unwrap_or_else(|_| expression.to_string())
            }
        }
        _ => expression.to_string(),
    }
}
