use crate::context::TranspilerContext;
use bindshape_parser::Expression;

/// Lowers a binding expression to a TypeScript expression.
///
/// Identifiers resolve against the scope: names introduced by enclosing
/// repeat containers stay bare, everything else reads off `this`. Property
/// access goes through `__f` so the checker enforces that every step of a
/// path was non-null. A whole expression already held by a generated
/// variable is replaced by that variable, which also rewrites any larger
/// expression built on top of it.
pub fn generate_expression(expression: &Expression, context: &TranspilerContext) -> String {
    if let Some(variable) = context.expression_vars.get(&expression.to_string()) {
        return variable.clone();
    }
    match expression {
        Expression::Identifier { name } => {
            if context.local_vars.contains(name) {
                name.clone()
            } else {
                format!("this.{}", name)
            }
        }
        Expression::Literal { value } => value.clone(),
        Expression::PropertyAccess { base, name } => {
            format!("__f({})!.{}", generate_expression(base, context), name)
        }
        Expression::MethodCall { callee, arguments } => {
            let arguments: Vec<String> = arguments
                .iter()
                .map(|argument| generate_expression(argument, context))
                .collect();
            format!(
                "{}({})",
                generate_expression(callee, context),
                arguments.join(", ")
            )
        }
        Expression::Negation { operand } => {
            format!("!{}", generate_expression(operand, context))
        }
        Expression::WildcardPath { base } => {
            format!("observePath({})", generate_expression(base, context))
        }
    }
}
