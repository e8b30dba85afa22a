use crate::builder::CodeBuilder;
use crate::error::TranspileResult;
use crate::handlers::element::{expect_element, transpile_tag_without_children};
use crate::handlers::NodeHandler;
use crate::transpiler::TemplateTranspiler;
use bindshape_common::{ElementNode, TemplateNode};

/// Handles elements whose contents are not template markup. Attributes
/// are still lowered but the children are skipped outright, since script
/// or style text would otherwise be misread as binding expressions.
pub struct BlacklistHandler;

impl NodeHandler for BlacklistHandler {
    fn can_transpile(&self, node: &TemplateNode) -> bool {
        node.as_element()
            .map(ElementNode::is_blacklisted)
            .unwrap_or(false)
    }

    fn transpile(
        &self,
        transpiler: &mut TemplateTranspiler<'_>,
        builder: &mut CodeBuilder,
        node: &TemplateNode,
    ) -> TranspileResult<()> {
        let element = expect_element(node)?;
        transpile_tag_without_children(transpiler, builder, element, |_| true)
    }
}
