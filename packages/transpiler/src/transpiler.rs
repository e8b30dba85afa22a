use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::CodeBuilder;
use crate::context::{ContextStack, TranspilerContext};
use crate::error::{TranspileError, TranspileResult};
use crate::expr::generate_expression;
use crate::handlers::blacklist::BlacklistHandler;
use crate::handlers::comment::CommentHandler;
use crate::handlers::conditional::ConditionalHandler;
use crate::handlers::element::ElementHandler;
use crate::handlers::repeat::RepeatHandler;
use crate::handlers::text::TextHandler;
use crate::handlers::NodeHandler;
use bindshape_common::{ElementMetadata, ProblemLog, TemplateNode};
use bindshape_parser::{
    extract_binding_parts, parse_binding_expression, BindingPart, BindingType, Expression,
    ValueKind,
};

/// Classification of one attribute value after binding extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValueType {
    TextOnly,
    OneWay,
    TwoWay,
    MultiBinding,
}

/// A lowered attribute value.
///
/// `expression` is the TypeScript expression for the value and
/// `string_expression` its template-literal form for attribute and text
/// positions. For a negated two-way binding `reverse_expression` is the
/// assignable operand under the `!`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranspiledValue {
    pub value_type: AttributeValueType,
    pub expression: String,
    pub reverse_expression: String,
    pub negation: bool,
    pub method_call: bool,
    pub string_expression: String,
    pub whitespace_only: bool,
}

/// Walks a template tree and lowers every node through the registered
/// handlers, tracking repeat scopes on a context stack.
pub struct TemplateTranspiler<'a> {
    template: &'a str,
    metadata: &'a ElementMetadata,
    problems: &'a mut ProblemLog,
    handlers: Vec<Rc<dyn NodeHandler>>,
    context: ContextStack,
    hoisted_items: usize,
}

impl<'a> TemplateTranspiler<'a> {
    /// A transpiler with no handlers registered. Embedders compose their
    /// own handler chain with `register_handler`.
    pub fn new(
        template: &'a str,
        metadata: &'a ElementMetadata,
        problems: &'a mut ProblemLog,
    ) -> Self {
        Self {
            template,
            metadata,
            problems,
            handlers: Vec::new(),
            context: ContextStack::new(),
            hoisted_items: 0,
        }
    }

    /// The standard handler chain. Order matters: the ordinary element
    /// handler accepts every element, so the specialized ones go first.
    pub fn with_default_handlers(
        template: &'a str,
        metadata: &'a ElementMetadata,
        problems: &'a mut ProblemLog,
    ) -> Self {
        let mut transpiler = Self::new(template, metadata, problems);
        transpiler.register_handler(Rc::new(BlacklistHandler));
        transpiler.register_handler(Rc::new(RepeatHandler));
        transpiler.register_handler(Rc::new(ConditionalHandler));
        transpiler.register_handler(Rc::new(ElementHandler));
        transpiler.register_handler(Rc::new(TextHandler));
        transpiler.register_handler(Rc::new(CommentHandler));
        transpiler
    }

    pub fn register_handler(&mut self, handler: Rc<dyn NodeHandler>) {
        self.handlers.push(handler);
    }

    pub fn transpile_nodes(
        &mut self,
        builder: &mut CodeBuilder,
        nodes: &[TemplateNode],
    ) -> TranspileResult<()> {
        for node in nodes {
            self.transpile_node(builder, node)?;
        }
        Ok(())
    }

    pub fn transpile_node(
        &mut self,
        builder: &mut CodeBuilder,
        node: &TemplateNode,
    ) -> TranspileResult<()> {
        let handler = self
            .handlers
            .iter()
            .find(|handler| handler.can_transpile(node))
            .cloned()
            .ok_or_else(|| TranspileError::missing_handler(node_name(node)))?;
        handler.transpile(self, builder, node)
    }

    /// Extracts the bindings of a raw attribute value and lowers them.
    pub fn transpile_attribute_value(&mut self, raw: &str) -> TranspileResult<TranspiledValue> {
        let extracted = extract_binding_parts(raw);

        if let Some((binding_type, text)) = extracted.single_binding() {
            let expression = self.parse_expression(text)?;
            let ts_expression = self.generate(&expression);
            let (reverse_expression, negation) = match &expression {
                Expression::Negation { operand } => (self.generate(operand), true),
                _ => (ts_expression.clone(), false),
            };
            let method_call = matches!(&expression, Expression::MethodCall { .. })
                || matches!(&expression, Expression::Negation { operand }
                    if matches!(operand.as_ref(), Expression::MethodCall { .. }));
            return Ok(TranspiledValue {
                value_type: match binding_type {
                    BindingType::OneWay => AttributeValueType::OneWay,
                    BindingType::TwoWay => AttributeValueType::TwoWay,
                },
                string_expression: format!("`${{{}}}`", ts_expression),
                expression: ts_expression,
                reverse_expression,
                negation,
                method_call,
                whitespace_only: false,
            });
        }

        if extracted.kind() == ValueKind::TextOnly {
            let string_expression = format!("`{}`", escape_template_literal(raw));
            return Ok(TranspiledValue {
                value_type: AttributeValueType::TextOnly,
                expression: string_expression.clone(),
                reverse_expression: string_expression.clone(),
                negation: false,
                method_call: false,
                string_expression,
                whitespace_only: extracted.is_whitespace_only(),
            });
        }

        let mut rendered = String::from("`");
        for part in &extracted.parts {
            match part {
                BindingPart::Literal { text } => {
                    rendered.push_str(&escape_template_literal(text));
                }
                BindingPart::Binding { text, .. } => {
                    let expression = self.parse_expression(text)?;
                    rendered.push_str(&format!("${{{}}}", self.generate(&expression)));
                }
            }
        }
        rendered.push('`');
        Ok(TranspiledValue {
            value_type: AttributeValueType::MultiBinding,
            expression: rendered.clone(),
            reverse_expression: rendered.clone(),
            negation: false,
            method_call: false,
            string_expression: rendered,
            whitespace_only: false,
        })
    }

    pub fn parse_expression(&self, text: &str) -> TranspileResult<Expression> {
        parse_binding_expression(text)
            .map(|binding| binding.expression)
            .map_err(|source| TranspileError::expression(text, source))
    }

    pub fn generate(&self, expression: &Expression) -> String {
        generate_expression(expression, self.context.current())
    }

    pub fn context(&self) -> &TranspilerContext {
        self.context.current()
    }

    pub fn context_mut(&mut self) -> &mut TranspilerContext {
        self.context.current_mut()
    }

    pub fn push_context(&mut self) {
        self.context.push();
    }

    pub fn pop_context(&mut self) -> TranspileResult<()> {
        self.context
            .pop()
            .map(|_| ())
            .ok_or_else(|| TranspileError::Internal("popped the root transpiler context".into()))
    }

    /// Binds a whole expression to a generated variable for the current
    /// scope. Rebinding to a different variable is an internal error.
    pub fn register_expression_variable(
        &mut self,
        expression: String,
        variable: String,
    ) -> TranspileResult<()> {
        if let Some(existing) = self.context.current().expression_vars.get(&expression) {
            if existing != &variable {
                return Err(TranspileError::Internal(format!(
                    "expression '{}' is already bound to variable '{}'",
                    expression, existing
                )));
            }
        }
        debug!(expression = expression.as_str(), variable = variable.as_str(), "Hoisted expression");
        self.context
            .current_mut()
            .expression_vars
            .insert(expression, variable);
        Ok(())
    }

    /// True when the given generated expression is itself one of the
    /// hoisted variables, meaning it needs no further hoisting.
    pub fn is_expression_variable(&self, expression: &str) -> bool {
        self.context
            .current()
            .expression_vars
            .values()
            .any(|variable| variable == expression)
    }

    pub fn next_items_variable(&mut self) -> String {
        self.hoisted_items += 1;
        format!("items_{}", self.hoisted_items)
    }

    pub fn metadata(&self) -> &ElementMetadata {
        self.metadata
    }

    pub fn problem_with_element(&mut self, element: &str, message: impl Into<String>) {
        self.problems
            .problem_with_element(self.template, element, message);
    }

    pub fn problem_with_attribute(
        &mut self,
        element: &str,
        attribute: &str,
        message: impl Into<String>,
    ) {
        self.problems
            .problem_with_attribute(self.template, element, attribute, message);
    }
}

fn node_name(node: &TemplateNode) -> &str {
    match node {
        TemplateNode::Element(element) => element.actual_tag_name(),
        TemplateNode::Text { .. } => "#text",
        TemplateNode::Comment { .. } => "#comment",
    }
}

/// Escapes raw text for inclusion in a TypeScript template literal.
fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}
