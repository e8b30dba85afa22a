use crate::context::TranspilerContext;
use bindshape_common::kebab_to_camel;

const BLOCK_INDENT: &str = "  ";

/// Accumulates generated TypeScript line by line, tracking block indent.
///
/// Every element is lowered into its own block so repeated `el` constants
/// never collide. Blocks use Allman braces to keep the generated code
/// diffable against hand-written checks.
#[derive(Debug, Default)]
pub struct CodeBuilder {
    code: String,
    indent: String,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn into_code(self) -> String {
        self.code
    }

    pub fn add_line(&mut self, line: &str) {
        self.code.push_str(&self.indent);
        self.code.push_str(line);
        self.code.push('\n');
    }

    pub fn start_block(&mut self) {
        self.add_line("{");
        self.indent.push_str(BLOCK_INDENT);
    }

    pub fn end_block(&mut self) {
        let depth = self.indent.len().saturating_sub(BLOCK_INDENT.len());
        self.indent.truncate(depth);
        self.add_line("}");
    }

    /// Opens a block with an `el` constant typed after the tag name.
    /// `useVars` keeps the constant alive for elements without bindings.
    pub fn begin_element(&mut self, tag_name: &str) {
        self.start_block();
        self.add_line(&format!(
            "const el: HTMLElementTagNameMap['{}'] = null!;",
            tag_name
        ));
        self.add_line("useVars(el);");
    }

    pub fn end_element(&mut self) {
        self.end_block();
    }

    pub fn add_text_content(&mut self, statement: &str) {
        self.add_line(&format!("setTextContent({});\n", statement));
    }

    pub fn add_element_property_set(&mut self, attribute: &str, value: &str) {
        self.add_line(&format!("el.{} = {};", kebab_to_camel(attribute), value));
    }

    pub fn add_attribute_set(&mut self, attribute: &str, string_expression: &str) {
        self.add_line(&format!(
            "el.setAttribute('{}', {});",
            attribute, string_expression
        ));
    }

    /// Writes the reverse assignment of a two-way binding, reading the
    /// element property back into the bound target.
    pub fn add_value_set_from_property(
        &mut self,
        target: &str,
        source_attribute: &str,
        negation: bool,
    ) {
        let value = format!("el.{}", kebab_to_camel(source_attribute));
        if negation {
            self.add_line(&format!("{} = !{};", target, value));
        } else {
            self.add_line(&format!("{} = {};", target, value));
        }
    }

    /// Inside a repeat scope the listener wraps the event with the item
    /// model, matching what the binding runtime hands to handlers.
    pub fn subscribe_event(&mut self, event: &str, handler: &str, context: &TranspilerContext) {
        let listener = match &context.repeat_var {
            Some(repeat_var) => format!(
                "e => this.{}.bind(this, wrapInDomRepeatEvent(e, {}))()",
                handler, repeat_var
            ),
            None => format!("this.{}.bind(this)", handler),
        };
        self.add_line(&format!("el.addEventListener('{}', {});", event, listener));
    }
}
