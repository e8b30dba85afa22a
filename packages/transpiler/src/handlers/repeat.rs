use crate::builder::CodeBuilder;
use crate::error::TranspileResult;
use crate::handlers::element::{expect_element, transpile_tag_without_children};
use crate::handlers::NodeHandler;
use crate::transpiler::{AttributeValueType, TemplateTranspiler};
use bindshape_common::{
    is_valid_identifier, ElementNode, TemplateNode, DEFAULT_INDEX_ALIAS,
    DEFAULT_ITEMS_INDEX_ALIAS, DEFAULT_ITEM_ALIAS,
};
use bindshape_parser::extract_binding_parts;

const IDENTIFIER_ATTRIBUTES: &[&str] = &["as", "index-as", "items-index-as", "sort", "filter"];

/// Lowers a repeat container to a `for...of` over the bound items,
/// declaring the item and index aliases as scope locals.
pub struct RepeatHandler;

impl NodeHandler for RepeatHandler {
    fn can_transpile(&self, node: &TemplateNode) -> bool {
        node.as_element()
            .map(ElementNode::is_repeat_container)
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

        for name in IDENTIFIER_ATTRIBUTES {
            if let Some(value) = element.attribute(name) {
                if !is_valid_identifier(value) {
                    transpiler.problem_with_attribute(
                        &tag_name,
                        name,
                        format!("Attribute value '{}' must be a valid identifier", value),
                    );
                }
            }
        }
        let item_alias = element.attribute("as").unwrap_or(DEFAULT_ITEM_ALIAS).to_string();
        let index_alias = element
            .attribute("index-as")
            .unwrap_or(DEFAULT_INDEX_ALIAS)
            .to_string();
        let items_index_alias = element
            .attribute("items-index-as")
            .unwrap_or(DEFAULT_ITEMS_INDEX_ALIAS)
            .to_string();

        transpile_tag_without_children(transpiler, builder, element, |name| {
            !ElementNode::is_repeat_container_attribute(name)
        })?;

        let Some(items) = element.attribute("items") else {
            transpiler.problem_with_element(&tag_name, r#"The "items" attribute is missed"#);
            return Ok(());
        };
        let items_value = transpiler.transpile_attribute_value(items)?;
        if !matches!(
            items_value.value_type,
            AttributeValueType::OneWay | AttributeValueType::TwoWay
        ) {
            transpiler.problem_with_attribute(
                &tag_name,
                "items",
                r#"The "items" attribute must be a single binding expression"#,
            );
            return Ok(());
        }

        builder.start_block();
        builder.add_line(&format!("const {} = 0;", index_alias));
        builder.add_line(&format!("const {} = 0;", items_index_alias));
        builder.add_line(&format!("useVars({}, {});", index_alias, items_index_alias));

        // A method-call items source is hoisted into a constant so the loop
        // iterates one stable array and nested references reuse it.
        let mut hoisted = None;
        let items_expression = if items_value.method_call
            && !transpiler.is_expression_variable(&items_value.expression)
        {
            let variable = transpiler.next_items_variable();
            builder.add_line(&format!("const {} = {}!;", variable, items_value.expression));
            hoisted = Some(variable.clone());
            variable
        } else {
            items_value.expression.clone()
        };

        let mut iterated = format!("{}!", items_expression);
        if let Some(filter) = element.attribute("filter") {
            iterated.push_str(&format!(".filter(this.{}.bind(this))", filter));
        }
        if let Some(sort) = element.attribute("sort") {
            iterated.push_str(&format!(".sort(this.{}.bind(this))", sort));
        }
        builder.add_line(&format!("for(const {} of {})", item_alias, iterated));
        builder.start_block();

        transpiler.push_context();
        if let Some(variable) = hoisted {
            let extracted = extract_binding_parts(items);
            if let Some((_, text)) = extracted.single_binding() {
                let expression = transpiler.parse_expression(text)?;
                transpiler.register_expression_variable(expression.to_string(), variable)?;
            }
        }
        {
            let context = transpiler.context_mut();
            context.repeat_var = Some(item_alias.clone());
            context.local_vars.insert(item_alias);
            context.local_vars.insert(index_alias);
            context.local_vars.insert(items_index_alias);
        }

        if let Some(observe) = element.attribute("observe") {
            let mut paths = Vec::new();
            for token in observe.split_whitespace() {
                let expression = transpiler.parse_expression(token)?;
                paths.push(transpiler.generate(&expression));
            }
            builder.start_block();
            builder.add_line(&format!("const observerArray = [{}];", paths.join(", ")));
            builder.add_line("useVars(observerArray);");
            builder.end_block();
        }

        transpiler.transpile_nodes(builder, &element.children)?;
        transpiler.pop_context()?;

        builder.end_block();
        builder.end_block();
        Ok(())
    }
}
