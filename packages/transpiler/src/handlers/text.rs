use crate::builder::CodeBuilder;
use crate::error::TranspileResult;
use crate::handlers::NodeHandler;
use crate::transpiler::{AttributeValueType, TemplateTranspiler};
use bindshape_common::TemplateNode;

/// Lowers bound text content to a `setTextContent` probe. Plain text
/// produces nothing.
pub struct TextHandler;

impl NodeHandler for TextHandler {
    fn can_transpile(&self, node: &TemplateNode) -> bool {
        matches!(node, TemplateNode::Text { .. })
    }

    fn transpile(
        &self,
        transpiler: &mut TemplateTranspiler<'_>,
        builder: &mut CodeBuilder,
        node: &TemplateNode,
    ) -> TranspileResult<()> {
        let TemplateNode::Text { content } = node else {
            return Ok(());
        };
        let value = transpiler.transpile_attribute_value(content)?;
        if value.value_type != AttributeValueType::TextOnly {
            builder.add_text_content(&value.string_expression);
        }
        Ok(())
    }
}
