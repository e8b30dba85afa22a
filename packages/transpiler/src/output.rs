use tracing::{debug, instrument};

use crate::builder::CodeBuilder;
use crate::error::TranspileResult;
use crate::transpiler::TemplateTranspiler;
use bindshape_common::{ElementMetadata, ProblemLog, TemplateNode};

/// Support declarations compiled alongside every generated check file.
///
/// `__f` narrows away null and undefined so chained property access in
/// generated expressions type-checks per path step. The rest exist so the
/// generated statements use every declared value and stay side-effect
/// free under `noUnusedLocals`.
pub const HELPER_PREAMBLE: &str = "\
function useVars(..._vars: unknown[]): void {}
function setTextContent(_text: unknown): void {}
function __f<T>(value: T): NonNullable<T> {
  return value!;
}
function observePath<T>(value: T): T {
  return value;
}
function wrapInDomRepeatEvent<TEvent, TItem>(event: TEvent, item: TItem) {
  return Object.assign(event, {model: {item}});
}
";

/// Renders the scope-correct check class for one template.
///
/// The output subclasses the element class so `this.` statements resolve
/// against its declared members, and mirrors the template structure with
/// one block per element, a loop per repeat container, and a branch per
/// conditional container.
#[instrument(skip(nodes, metadata, problems), fields(template = template, node_count = nodes.len()))]
pub fn render_template_check(
    class_name: &str,
    nodes: &[TemplateNode],
    metadata: &ElementMetadata,
    template: &str,
    problems: &mut ProblemLog,
) -> TranspileResult<String> {
    let mut builder = CodeBuilder::new();
    builder.add_line(&format!(
        "export class {0}Check extends {0}",
        class_name
    ));
    builder.start_block();
    builder.add_line("templateCheck()");
    builder.start_block();

    let mut transpiler = TemplateTranspiler::with_default_handlers(template, metadata, problems);
    transpiler.transpile_nodes(&mut builder, nodes)?;

    builder.end_block();
    builder.end_block();

    let code = builder.into_code();
    debug!(length = code.len(), "Template check rendered");
    Ok(code)
}

/// Assembles a complete output file: caller-supplied imports, the helper
/// preamble, then the generated check classes.
pub fn output_file_content(imports: &[String], code: &str) -> String {
    let mut out = String::new();
    for import in imports {
        out.push_str(import);
        out.push('\n');
    }
    if !imports.is_empty() {
        out.push('\n');
    }
    out.push_str(HELPER_PREAMBLE);
    out.push('\n');
    out.push_str(code);
    out
}
