pub mod blacklist;
pub mod comment;
pub mod conditional;
pub mod element;
pub mod repeat;
pub mod text;

use crate::builder::CodeBuilder;
use crate::error::TranspileResult;
use crate::transpiler::TemplateTranspiler;
use bindshape_common::TemplateNode;

/// One node-lowering strategy. The transpiler asks handlers in
/// registration order and dispatches to the first that accepts the node,
/// so specialized element handlers must be registered before the ordinary
/// element handler.
pub trait NodeHandler {
    fn can_transpile(&self, node: &TemplateNode) -> bool;

    fn transpile(
        &self,
        transpiler: &mut TemplateTranspiler<'_>,
        builder: &mut CodeBuilder,
        node: &TemplateNode,
    ) -> TranspileResult<()>;
}
