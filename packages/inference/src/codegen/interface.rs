use crate::codegen::ShapeGenerator;
use crate::shape::{ShapeKind, ShapeNode, ShapeTree, LIST_ELEMENT_KEY};
use crate::walker::Inference;
use indexmap::IndexMap;

/// Type of a leaf the template only reads
const SCALAR: &str = "any|null|undefined";
const NULLABLE: &str = "null|undefined|";

/// Renders the inferred shape as a TypeScript interface declaration.
///
/// Every inferred type is widened with `null|undefined` so that a data
/// object which omits a property still satisfies the interface; the
/// template runtime tolerates missing values at every step of a path.
#[derive(Debug, Clone)]
pub struct InterfaceGenerator {
    interface_name: String,
}

impl InterfaceGenerator {
    pub fn new(interface_name: impl Into<String>) -> Self {
        Self {
            interface_name: interface_name.into(),
        }
    }

    pub fn render(&self, tree: &ShapeTree) -> String {
        let mut out = format!("export interface {} {{\n", self.interface_name);
        for (name, node) in &tree.roots {
            out.push_str(&format!("{}: {};\n", name, render_type(node)));
        }
        out.push_str("};");
        out
    }
}

impl Default for InterfaceGenerator {
    fn default() -> Self {
        Self::new("View")
    }
}

impl ShapeGenerator for InterfaceGenerator {
    fn generate(&self, inference: &Inference) -> String {
        self.render(&inference.shape)
    }
}

fn render_type(node: &ShapeNode) -> String {
    match node.kind {
        ShapeKind::Value => {
            if node.children.is_empty() {
                SCALAR.to_string()
            } else {
                format!("{}{}", NULLABLE, object_body(node.children.iter()))
            }
        }
        ShapeKind::List => render_list(&node.list_index_type, &node.children),
        ShapeKind::Function => {
            let arguments = (0..node.argument_count.unwrap_or(0))
                .map(|index| format!("arg{}: {}", index, SCALAR))
                .collect::<Vec<_>>()
                .join(", ");
            format!("({}) => {}", arguments, render_return(node))
        }
    }
}

fn render_return(node: &ShapeNode) -> String {
    if node.returns_list() {
        render_list(&node.list_index_type, &node.children)
    } else if node.children.is_empty() {
        SCALAR.to_string()
    } else {
        format!("{}{}", NULLABLE, object_body(node.children.iter()))
    }
}

/// `ArrayLike<element>` for the iterated uses, intersected with an object
/// type when the same value is also used as an object (`length`, custom
/// properties on the array value itself).
fn render_list(
    list_index: &IndexMap<String, ShapeNode>,
    children: &IndexMap<String, ShapeNode>,
) -> String {
    let mut rendered = format!("{}ArrayLike<{}>", NULLABLE, element_type(list_index));
    if !children.is_empty() || !list_index.is_empty() {
        rendered.push_str(&format!(" & {}{}", NULLABLE, object_body(children.iter())));
    }
    rendered
}

/// Element type of a list, from the properties its per-item uses touched.
///
/// A `[]` entry means the element is itself iterated, so the element type
/// becomes an ArrayLike intersected with any sibling named properties.
fn element_type(list_index: &IndexMap<String, ShapeNode>) -> String {
    if list_index.is_empty() {
        return SCALAR.to_string();
    }
    if let Some(bracket) = list_index.get(LIST_ELEMENT_KEY) {
        let named: Vec<(&String, &ShapeNode)> = list_index
            .iter()
            .filter(|(name, _)| *name != LIST_ELEMENT_KEY)
            .collect();
        let mut rendered = format!(
            "{}ArrayLike<{}>",
            NULLABLE,
            element_type(&bracket.list_index_type)
        );
        if !named.is_empty() || !bracket.list_index_type.is_empty() {
            rendered.push_str(&format!(
                " & {}{}",
                NULLABLE,
                object_body(named.into_iter())
            ));
        }
        return rendered;
    }
    format!(
        "{}{}|null|undefined",
        NULLABLE,
        object_body(list_index.iter())
    )
}

fn object_body<'a>(entries: impl Iterator<Item = (&'a String, &'a ShapeNode)>) -> String {
    let rendered: Vec<String> = entries
        .map(|(name, node)| format!("{}: {};", name, render_type(node)))
        .collect();
    if rendered.is_empty() {
        "{}".to_string()
    } else {
        format!("{{{}}}", rendered.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::infer_template;
    use bindshape_common::{ElementNode, ProblemLog, TemplateNode};

    fn render(nodes: Vec<TemplateNode>) -> String {
        let mut problems = ProblemLog::new();
        let inference = infer_template(&nodes, "test.html", &mut problems).unwrap();
        InterfaceGenerator::default().render(&inference.shape)
    }

    fn repeat(items: &str) -> ElementNode {
        ElementNode::new("template")
            .attr("is", "dom-repeat")
            .attr("items", items)
    }

    #[test]
    fn test_empty_template_renders_an_empty_interface() {
        assert_eq!(render(vec![]), "export interface View {\n};");
    }

    #[test]
    fn test_scalars_and_nested_objects() {
        let rendered = render(vec![TemplateNode::text("[[b]] [[a.d]] [[a.b.c]]")]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             b: any|null|undefined;\n\
             a: null|undefined|{d: any|null|undefined; b: null|undefined|{c: any|null|undefined;};};\n\
             };"
        );
    }

    #[test]
    fn test_function_returning_an_object() {
        let rendered = render(vec![TemplateNode::text("[[a().z]]")]);
        assert_eq!(
            rendered,
            "export interface View {\na: () => null|undefined|{z: any|null|undefined;};\n};"
        );
    }

    #[test]
    fn test_method_arguments_become_roots() {
        let rendered = render(vec![TemplateNode::text("[[b(c, d)]]")]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             b: (arg0: any|null|undefined, arg1: any|null|undefined) => any|null|undefined;\n\
             c: any|null|undefined;\n\
             d: any|null|undefined;\n\
             };"
        );
    }

    #[test]
    fn test_literal_arguments_still_count_toward_arity() {
        let rendered = render(vec![TemplateNode::text("[[foo(-1)]]")]);
        assert_eq!(
            rendered,
            "export interface View {\nfoo: (arg0: any|null|undefined) => any|null|undefined;\n};"
        );
    }

    #[test]
    fn test_event_handler_takes_one_argument() {
        let rendered = render(vec![ElementNode::new("p").attr("on-z", "wow").into()]);
        assert_eq!(
            rendered,
            "export interface View {\nwow: (arg0: any|null|undefined) => any|null|undefined;\n};"
        );
    }

    #[test]
    fn test_plain_repeat_is_an_array_like() {
        let rendered = render(vec![repeat("[[items]]").into()]);
        assert_eq!(
            rendered,
            "export interface View {\nitems: null|undefined|ArrayLike<any|null|undefined>;\n};"
        );
    }

    #[test]
    fn test_iterated_and_object_uses_intersect() {
        let rendered = render(vec![
            repeat("[[foo]]").into(),
            TemplateNode::text("[[foo.p]]"),
        ]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             foo: null|undefined|ArrayLike<any|null|undefined> & null|undefined|{p: any|null|undefined;};\n\
             };"
        );
    }

    #[test]
    fn test_item_uses_shape_the_element_type() {
        let rendered = render(vec![repeat("[[zap]]")
            .child(TemplateNode::text("[[item.foo]]"))
            .into()]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             zap: null|undefined|ArrayLike<null|undefined|{foo: any|null|undefined;}|null|undefined> & null|undefined|{};\n\
             };"
        );
    }

    #[test]
    fn test_function_valued_items() {
        let rendered = render(vec![repeat("[[foo()]]").into()]);
        assert_eq!(
            rendered,
            "export interface View {\nfoo: () => null|undefined|ArrayLike<any|null|undefined>;\n};"
        );
    }

    #[test]
    fn test_function_valued_items_with_element_uses() {
        let rendered = render(vec![repeat("[[foo()]]")
            .child(TemplateNode::text("[[item.ok]]"))
            .into()]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             foo: () => null|undefined|ArrayLike<null|undefined|{ok: any|null|undefined;}|null|undefined> & null|undefined|{};\n\
             };"
        );
    }

    #[test]
    fn test_nested_repeats_nest_array_likes() {
        let rendered = render(vec![repeat("[[items]]")
            .child(repeat("[[item]]").child(TemplateNode::text("[[item.tap]]")))
            .into()]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             items: null|undefined|ArrayLike<null|undefined|ArrayLike<null|undefined|{tap: any|null|undefined;}|null|undefined> & null|undefined|{}> & null|undefined|{};\n\
             };"
        );
    }

    #[test]
    fn test_triple_nesting() {
        let rendered = render(vec![repeat("[[items]]")
            .child(repeat("[[item]]").child(repeat("[[item]]").child(TemplateNode::text("[[item.a]]"))))
            .into()]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             items: null|undefined|ArrayLike<null|undefined|ArrayLike<null|undefined|ArrayLike<null|undefined|{a: any|null|undefined;}|null|undefined> & null|undefined|{}> & null|undefined|{}> & null|undefined|{};\n\
             };"
        );
    }

    #[test]
    fn test_two_repeats_over_one_source_merge() {
        let rendered = render(vec![
            repeat("[[foo]]").child(TemplateNode::text("[[item.zap]]")).into(),
            repeat("[[foo]]").child(TemplateNode::text("[[item.tap]]")).into(),
            TemplateNode::text("[[foo.abc]]"),
        ]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             foo: null|undefined|ArrayLike<null|undefined|{zap: any|null|undefined; tap: any|null|undefined;}|null|undefined> & null|undefined|{abc: any|null|undefined;};\n\
             };"
        );
    }

    #[test]
    fn test_deep_alias_chain_with_function_leaves() {
        let rendered = render(vec![repeat("[[foo]]")
            .child(
                repeat("[[item.tap]]").child(
                    repeat("[[item.zap]]")
                        .child(TemplateNode::text("[[item.foo(1, 2)]]"))
                        .child(repeat("[[item.wow]]")),
                ),
            )
            .into()]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             foo: null|undefined|ArrayLike<null|undefined|{tap: null|undefined|ArrayLike<null|undefined|{zap: null|undefined|ArrayLike<null|undefined|{foo: (arg0: any|null|undefined, arg1: any|null|undefined) => any|null|undefined; wow: null|undefined|ArrayLike<any|null|undefined>;}|null|undefined> & null|undefined|{};}|null|undefined> & null|undefined|{};}|null|undefined> & null|undefined|{};\n\
             };"
        );
    }

    #[test]
    fn test_method_items_keep_wildcard_argument_roots() {
        let rendered = render(vec![repeat("[[getFoo(bob.tap.*)]]")
            .child(repeat("[[item.foo]]"))
            .into()]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             getFoo: (arg0: any|null|undefined) => null|undefined|ArrayLike<null|undefined|{foo: null|undefined|ArrayLike<any|null|undefined>;}|null|undefined> & null|undefined|{};\n\
             bob: null|undefined|{tap: any|null|undefined;};\n\
             };"
        );
    }

    #[test]
    fn test_iterated_element_keeps_sibling_properties() {
        let rendered = render(vec![repeat("[[sections]]")
            .attr("as", "section")
            .child(repeat("[[section]]"))
            .child(TemplateNode::text("[[section.length]]"))
            .into()]);
        assert_eq!(
            rendered,
            "export interface View {\n\
             sections: null|undefined|ArrayLike<null|undefined|ArrayLike<any|null|undefined> & null|undefined|{length: any|null|undefined;}> & null|undefined|{};\n\
             };"
        );
    }

    #[test]
    fn test_custom_interface_name() {
        let mut problems = ProblemLog::new();
        let nodes: Vec<TemplateNode> = vec![TemplateNode::text("[[ready]]")];
        let inference = infer_template(&nodes, "test.html", &mut problems).unwrap();

        let generator = InterfaceGenerator::new("SettingsView");
        assert_eq!(
            generator.render(&inference.shape),
            "export interface SettingsView {\nready: any|null|undefined;\n};"
        );
        assert_eq!(generator.generate(&inference), generator.render(&inference.shape));
    }
}
