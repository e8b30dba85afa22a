use crate::builder::CodeBuilder;
use crate::error::TranspileResult;
use crate::handlers::NodeHandler;
use crate::transpiler::TemplateTranspiler;
use bindshape_common::TemplateNode;

/// Comments contribute nothing to the generated check.
pub struct CommentHandler;

impl NodeHandler for CommentHandler {
    fn can_transpile(&self, node: &TemplateNode) -> bool {
        matches!(node, TemplateNode::Comment { .. })
    }

    fn transpile(
        &self,
        _transpiler: &mut TemplateTranspiler<'_>,
        _builder: &mut CodeBuilder,
        _node: &TemplateNode,
    ) -> TranspileResult<()> {
        Ok(())
    }
}
