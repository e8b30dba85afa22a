use crate::codegen::ShapeGenerator;
use crate::observe::{PathObservation, PathSegment};
use crate::options::CheckerOptions;
use crate::shape::{ShapeKind, ShapeNode, LIST_ELEMENT_KEY};
use crate::walker::{Inference, PropertyBinding};
use bindshape_common::kebab_to_camel;

/// Renders the inferred shape as a class that dereferences every observed
/// use, so the host type checker verifies them against the real class.
///
/// Each inferred node becomes one statement. Non-null assertions keep the
/// statements independent: a statement only fails to check when its own
/// final step does not exist on the declared type.
#[derive(Debug, Clone)]
pub struct UseCheckerGenerator {
    class_name: String,
    options: CheckerOptions,
}

impl UseCheckerGenerator {
    pub fn new(class_name: impl Into<String>, options: CheckerOptions) -> Self {
        Self {
            class_name: class_name.into(),
            options,
        }
    }

    pub fn render(&self, inference: &Inference) -> String {
        let mut out = format!(
            "class {0}UseChecker extends {0} {{\n  __useCheckerTestFunc() {{\n",
            self.class_name
        );
        if self.options.check_property_bindings {
            for binding in &inference.property_bindings {
                self.write_property_probe(&mut out, binding);
            }
        }
        for (name, node) in &inference.shape.roots {
            self.write_node(&mut out, &format!("this.{}", name), node);
        }
        out.push_str("  }\n}");
        out
    }

    /// Assigning the bound expression to the element's property surfaces
    /// mismatches between the data shape and the element's declared type.
    fn write_property_probe(&self, out: &mut String, binding: &PropertyBinding) {
        let variable = format!("{}Elem", kebab_to_camel(&binding.tag_name));
        let property = kebab_to_camel(&binding.attribute);
        out.push_str("    {\n");
        out.push_str(&format!(
            "      const {}: ElementTagNameMap['{}'] = null!;\n",
            variable, binding.tag_name
        ));
        out.push_str(&format!(
            "      {}.{} = {};\n",
            variable,
            property,
            self.observation_path(&binding.observation)
        ));
        out.push_str("    }\n");
    }

    fn write_node(&self, out: &mut String, path: &str, node: &ShapeNode) {
        match node.kind {
            ShapeKind::Value => {
                out.push_str(&format!("    {};\n", path));
                self.write_children(out, path, node);
            }
            ShapeKind::Function => {
                let call = format!(
                    "{}!({})",
                    path,
                    self.placeholder_arguments(node.argument_count.unwrap_or(0))
                );
                out.push_str(&format!("    {};\n", call));
                if node.returns_list() {
                    self.write_array_probe(out, &call);
                }
                self.write_children(out, &call, node);
            }
            ShapeKind::List => {
                self.write_array_probe(out, path);
                self.write_children(out, path, node);
            }
        }
    }

    fn write_children(&self, out: &mut String, base: &str, node: &ShapeNode) {
        for (name, child) in &node.children {
            self.write_node(out, &format!("{}!.{}", base, name), child);
        }
        for (name, child) in &node.list_index_type {
            if name == LIST_ELEMENT_KEY {
                self.write_node(out, &format!("{}![0]", base), child);
            } else {
                self.write_node(out, &format!("{}![0]!.{}", base, name), child);
            }
        }
    }

    fn write_array_probe(&self, out: &mut String, value: &str) {
        out.push_str(&format!("    {{const _: Array<any> = {}!;}}\n", value));
    }

    fn observation_path(&self, observation: &PathObservation) -> String {
        let mut path = String::new();
        for (position, segment) in observation.segments.iter().enumerate() {
            if position == 0 {
                path.push_str("this.");
                path.push_str(&segment.name);
            } else {
                path.push_str("!.");
                path.push_str(&segment.name);
            }
            self.push_segment_suffix(&mut path, segment);
        }
        path
    }

    fn push_segment_suffix(&self, path: &mut String, segment: &PathSegment) {
        if let Some(argument_count) = segment.call {
            path.push_str(&format!("!({})", self.placeholder_arguments(argument_count)));
        }
        for _ in 0..segment.array_groups {
            path.push_str("![0]");
        }
    }

    fn placeholder_arguments(&self, count: usize) -> String {
        let placeholder = if self.options.undefined_check {
            "undefined"
        } else {
            "null!"
        };
        vec![placeholder; count].join(", ")
    }
}

impl ShapeGenerator for UseCheckerGenerator {
    fn generate(&self, inference: &Inference) -> String {
        self.render(inference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::infer_template;
    use bindshape_common::{ElementNode, ProblemLog, TemplateNode};

    fn check(nodes: Vec<TemplateNode>, options: CheckerOptions) -> String {
        let mut problems = ProblemLog::new();
        let inference = infer_template(&nodes, "test.html", &mut problems).unwrap();
        UseCheckerGenerator::new("Foo", options).render(&inference)
    }

    fn repeat(items: &str) -> ElementNode {
        ElementNode::new("template")
            .attr("is", "dom-repeat")
            .attr("items", items)
    }

    #[test]
    fn test_every_observed_path_becomes_a_statement() {
        let rendered = check(
            vec![
                TemplateNode::text("[[b.c.d]]"),
                TemplateNode::text("[[a.d]]"),
                TemplateNode::text("[[a.f(1, 2, a.b)]]"),
            ],
            CheckerOptions::default(),
        );
        assert_eq!(
            rendered,
            r#"class FooUseChecker extends Foo {
  __useCheckerTestFunc() {
    this.b;
    this.b!.c;
    this.b!.c!.d;
    this.a;
    this.a!.d;
    this.a!.f!(null!, null!, null!);
    this.a!.b;
  }
}"#
        );
    }

    #[test]
    fn test_undefined_check_switches_call_placeholders() {
        let rendered = check(
            vec![TemplateNode::text("[[a.f(1, 2, a.b)]]")],
            CheckerOptions {
                undefined_check: true,
                ..CheckerOptions::default()
            },
        );
        assert_eq!(
            rendered,
            r#"class FooUseChecker extends Foo {
  __useCheckerTestFunc() {
    this.a;
    this.a!.f!(undefined, undefined, undefined);
    this.a!.b;
  }
}"#
        );
    }

    #[test]
    fn test_lists_probe_as_arrays_instead_of_plain_reads() {
        let rendered = check(
            vec![repeat("[[items]]")
                .attr("index-as", "zap")
                .child(TemplateNode::text("[[item.wow]] [[zap]]"))
                .child(repeat("[[item.foo]]").child(TemplateNode::text("[[item.amaze]]")))
                .into()],
            CheckerOptions::default(),
        );
        assert_eq!(
            rendered,
            r#"class FooUseChecker extends Foo {
  __useCheckerTestFunc() {
    {const _: Array<any> = this.items!;}
    this.items![0]!.wow;
    {const _: Array<any> = this.items![0]!.foo!;}
    this.items![0]!.foo![0]!.amaze;
  }
}"#
        );
    }

    #[test]
    fn test_iterated_element_probes_before_indexing_deeper() {
        let rendered = check(
            vec![repeat("[[items]]")
                .child(repeat("[[item]]").child(TemplateNode::text("[[item.tap]]")))
                .into()],
            CheckerOptions::default(),
        );
        assert_eq!(
            rendered,
            r#"class FooUseChecker extends Foo {
  __useCheckerTestFunc() {
    {const _: Array<any> = this.items!;}
    {const _: Array<any> = this.items![0]!;}
    this.items![0]![0]!.tap;
  }
}"#
        );
    }

    #[test]
    fn test_list_returning_method_probes_its_result() {
        let rendered = check(
            vec![repeat("[[foo()]]")
                .child(TemplateNode::text("[[item.ok]]"))
                .into()],
            CheckerOptions::default(),
        );
        assert_eq!(
            rendered,
            r#"class FooUseChecker extends Foo {
  __useCheckerTestFunc() {
    this.foo!();
    {const _: Array<any> = this.foo!()!;}
    this.foo!()![0]!.ok;
  }
}"#
        );
    }

    #[test]
    fn test_property_binding_probes_precede_the_statements() {
        let rendered = check(
            vec![ElementNode::new("foo-bar").attr("baz", "{{qux.zot}}").into()],
            CheckerOptions::property_bindings(),
        );
        assert_eq!(
            rendered,
            r#"class FooUseChecker extends Foo {
  __useCheckerTestFunc() {
    {
      const fooBarElem: ElementTagNameMap['foo-bar'] = null!;
      fooBarElem.baz = this.qux!.zot;
    }
    this.qux;
    this.qux!.zot;
  }
}"#
        );
    }

    #[test]
    fn test_conditional_if_binding_probes_the_dom_if_property() {
        let rendered = check(
            vec![ElementNode::new("template")
                .attr("is", "dom-if")
                .attr("if", "{{good}}")
                .into()],
            CheckerOptions::property_bindings(),
        );
        assert_eq!(
            rendered,
            r#"class FooUseChecker extends Foo {
  __useCheckerTestFunc() {
    {
      const domIfElem: ElementTagNameMap['dom-if'] = null!;
      domIfElem.if = this.good;
    }
    this.good;
  }
}"#
        );
    }

    #[test]
    fn test_attr_and_multi_bindings_get_no_probe_blocks() {
        let rendered = check(
            vec![ElementNode::new("x-y")
                .attr("href$", "{{link}}")
                .attr("title", "a {{b}} c")
                .into()],
            CheckerOptions::property_bindings(),
        );
        assert_eq!(
            rendered,
            r#"class FooUseChecker extends Foo {
  __useCheckerTestFunc() {
    this.link;
    this.b;
  }
}"#
        );
    }

    #[test]
    fn test_probe_blocks_are_off_by_default() {
        let rendered = check(
            vec![ElementNode::new("foo-bar").attr("baz", "{{qux}}").into()],
            CheckerOptions::default(),
        );
        assert_eq!(
            rendered,
            r#"class FooUseChecker extends Foo {
  __useCheckerTestFunc() {
    this.qux;
  }
}"#
        );
    }

    #[test]
    fn test_empty_template_renders_an_empty_checker() {
        let rendered = check(vec![], CheckerOptions::full());
        assert_eq!(
            rendered,
            "class FooUseChecker extends Foo {\n  __useCheckerTestFunc() {\n  }\n}"
        );
    }
}
