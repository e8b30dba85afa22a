use crate::builder::CodeBuilder;
use crate::error::TranspileResult;
use crate::handlers::element::{expect_element, transpile_tag_without_children};
use crate::handlers::NodeHandler;
use crate::transpiler::{AttributeValueType, TemplateTranspiler};
use bindshape_common::{ElementNode, TemplateNode};

/// Lowers a conditional container to an `if` over the bound condition.
/// The body gets its own scope so the checker mirrors the stamped subtree.
pub struct ConditionalHandler;

impl NodeHandler for ConditionalHandler {
    fn can_transpile(&self, node: &TemplateNode) -> bool {
        node.as_element()
            .map(ElementNode::is_conditional_container)
            .unwrap_or(false)
    }

    fn transpile(
        &self,
        transpiler: &mut TemplateTranspiler<'_>,
        builder: &mut CodeBuilder,
        node: &TemplateNode,
    ) -> TranspileResult<()> {
        let element = expect_element(node)?;
        let tag_name = element.actual_tag_name().to_string();

        transpile_tag_without_children(transpiler, builder, element, |name| name != "if")?;

        let Some(condition) = element.attribute("if") else {
            transpiler.problem_with_element(&tag_name, r#"The "if" attribute is missed."#);
            return Ok(());
        };
        let value = transpiler.transpile_attribute_value(condition)?;
        if !matches!(
            value.value_type,
            AttributeValueType::OneWay | AttributeValueType::TwoWay
        ) {
            transpiler.problem_with_attribute(
                &tag_name,
                "if",
                format!(
                    r#"The "if" attribute value '{}' must be a single binding expression."#,
                    condition
                ),
            );
        }

        builder.add_line(&format!("if ({})", value.expression));
        builder.start_block();
        transpiler.push_context();
        transpiler.transpile_nodes(builder, &element.children)?;
        transpiler.pop_context()?;
        builder.end_block();
        Ok(())
    }
}
