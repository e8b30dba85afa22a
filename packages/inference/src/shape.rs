use crate::observe::{PathObservation, TerminalKind};
use bindshape_common::ProblemLog;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Map key routing repeat-element reads one array dimension deeper
pub const LIST_ELEMENT_KEY: &str = "[]";

/// Observed role of a shape node
/// Promotion only: a node seen as Function or List never falls back to Value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Value,
    Function,
    List,
}

/// One member of the inferred data context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeNode {
    pub kind: ShapeKind,

    /// Arity of the most recent invocation, for Function nodes
    pub argument_count: Option<usize>,

    /// Set to List when a Function node's call result is iterated
    pub return_kind: ShapeKind,

    /// Members reached by plain property access
    pub children: IndexMap<String, ShapeNode>,

    /// Members reached through one element of the node's array value
    pub list_index_type: IndexMap<String, ShapeNode>,
}

impl ShapeNode {
    pub fn new() -> Self {
        Self {
            kind: ShapeKind::Value,
            argument_count: None,
            return_kind: ShapeKind::Value,
            children: IndexMap::new(),
            list_index_type: IndexMap::new(),
        }
    }

    /// True when the node's call result is used as an array.
    pub fn returns_list(&self) -> bool {
        self.return_kind == ShapeKind::List || !self.list_index_type.is_empty()
    }

    /// Lattice join against a call observation. Returns the previously
    /// recorded arity when the two disagree; the new arity wins.
    fn join_function(&mut self, argument_count: usize) -> Option<usize> {
        self.kind = ShapeKind::Function;
        match self.argument_count.replace(argument_count) {
            Some(previous) if previous != argument_count => Some(previous),
            _ => None,
        }
    }

    /// Lattice join against an iteration observation. Function nodes keep
    /// their kind and record the listness on the return side.
    fn join_list(&mut self) {
        if self.kind == ShapeKind::Function {
            self.return_kind = ShapeKind::List;
        } else {
            self.kind = ShapeKind::List;
        }
    }
}

impl Default for ShapeNode {
    fn default() -> Self {
        Self::new()
    }
}

/// The inferred structural type of one template's data context
/// Root member order is template document order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeTree {
    pub roots: IndexMap<String, ShapeNode>,
}

impl ShapeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Folds one observation into the tree.
    ///
    /// Array groups route the remaining path through `list_index_type`
    /// maps, one `[]` entry per extra dimension. Disagreeing call arities
    /// are reported to `problems` rather than silently overwritten.
    pub fn merge(&mut self, observation: &PathObservation, template: &str, problems: &mut ProblemLog) {
        if observation.segments.is_empty() {
            return;
        }
        let last_position = observation.segments.len() - 1;
        let mut current = &mut self.roots;

        for (position, segment) in observation.segments.iter().enumerate() {
            let node = current
                .entry(segment.name.clone())
                .or_insert_with(ShapeNode::new);
            if let Some(argument_count) = segment.call {
                if let Some(previous) = node.join_function(argument_count) {
                    report_arity_conflict(problems, template, &segment.name, argument_count, previous);
                }
            }

            let at_end = position == last_position;
            if segment.array_groups > 0 {
                node.join_list();
                let mut elements = &mut node.list_index_type;
                for _ in 1..segment.array_groups {
                    let element = elements
                        .entry(LIST_ELEMENT_KEY.to_string())
                        .or_insert_with(ShapeNode::new);
                    element.join_list();
                    elements = &mut element.list_index_type;
                }
                if at_end {
                    apply_element_terminal(elements, observation.terminal, template, problems);
                    break;
                } else {
                    current = elements;
                }
            } else if at_end {
                match observation.terminal {
                    TerminalKind::Value => {}
                    TerminalKind::List => node.join_list(),
                    TerminalKind::Function { argument_count } => {
                        if let Some(previous) = node.join_function(argument_count) {
                            report_arity_conflict(
                                problems,
                                template,
                                &segment.name,
                                argument_count,
                                previous,
                            );
                        }
                    }
                }
                break;
            } else {
                current = &mut node.children;
            }
        }
    }
}

/// Terminal use landing on an array element rather than a named node:
/// the element entry itself is promoted.
fn apply_element_terminal(
    elements: &mut IndexMap<String, ShapeNode>,
    terminal: TerminalKind,
    template: &str,
    problems: &mut ProblemLog,
) {
    match terminal {
        TerminalKind::Value => {}
        TerminalKind::List => {
            let element = elements
                .entry(LIST_ELEMENT_KEY.to_string())
                .or_insert_with(ShapeNode::new);
            element.join_list();
        }
        TerminalKind::Function { argument_count } => {
            let element = elements
                .entry(LIST_ELEMENT_KEY.to_string())
                .or_insert_with(ShapeNode::new);
            if let Some(previous) = element.join_function(argument_count) {
                report_arity_conflict(problems, template, LIST_ELEMENT_KEY, argument_count, previous);
            }
        }
    }
}

fn report_arity_conflict(
    problems: &mut ProblemLog,
    template: &str,
    name: &str,
    argument_count: usize,
    previous: usize,
) {
    problems.problem(
        template,
        format!(
            "Method '{}' is called with {} argument(s) but was previously seen with {}",
            name, argument_count, previous
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::PathSegment;

    fn merge(tree: &mut ShapeTree, segments: Vec<PathSegment>, terminal: TerminalKind) -> ProblemLog {
        let mut problems = ProblemLog::new();
        tree.merge(
            &PathObservation { segments, terminal },
            "test.html",
            &mut problems,
        );
        problems
    }

    #[test]
    fn test_value_path_builds_children() {
        let mut tree = ShapeTree::new();
        merge(
            &mut tree,
            vec![
                PathSegment::named("a"),
                PathSegment::named("b"),
                PathSegment::named("c"),
            ],
            TerminalKind::Value,
        );

        let a = &tree.roots["a"];
        assert_eq!(a.kind, ShapeKind::Value);
        let b = &a.children["b"];
        assert_eq!(b.children["c"].kind, ShapeKind::Value);
    }

    #[test]
    fn test_object_use_and_iteration_share_one_node() {
        let mut tree = ShapeTree::new();
        merge(
            &mut tree,
            vec![PathSegment::named("foo"), PathSegment::named("bar")],
            TerminalKind::Value,
        );
        merge(&mut tree, vec![PathSegment::named("foo")], TerminalKind::List);

        assert_eq!(tree.roots.len(), 1);
        let foo = &tree.roots["foo"];
        assert_eq!(foo.kind, ShapeKind::List);
        assert!(foo.list_index_type.is_empty());
        assert!(foo.children.contains_key("bar"));
    }

    #[test]
    fn test_array_groups_route_into_list_index_type() {
        let mut tree = ShapeTree::new();
        merge(
            &mut tree,
            vec![
                PathSegment::named("foo").with_array_groups(1),
                PathSegment::named("zap"),
            ],
            TerminalKind::Value,
        );

        let foo = &tree.roots["foo"];
        assert_eq!(foo.kind, ShapeKind::List);
        assert!(foo.children.is_empty());
        assert_eq!(foo.list_index_type["zap"].kind, ShapeKind::Value);
    }

    #[test]
    fn test_extra_array_groups_nest_element_entries() {
        let mut tree = ShapeTree::new();
        merge(
            &mut tree,
            vec![
                PathSegment::named("sections").with_array_groups(2),
                PathSegment::named("name"),
            ],
            TerminalKind::Value,
        );

        let sections = &tree.roots["sections"];
        let element = &sections.list_index_type[LIST_ELEMENT_KEY];
        assert_eq!(element.kind, ShapeKind::List);
        assert_eq!(element.list_index_type["name"].kind, ShapeKind::Value);
    }

    #[test]
    fn test_list_terminal_on_trailing_group_promotes_the_element() {
        let mut tree = ShapeTree::new();
        merge(
            &mut tree,
            vec![PathSegment::named("items").with_array_groups(1)],
            TerminalKind::List,
        );

        let items = &tree.roots["items"];
        assert_eq!(items.kind, ShapeKind::List);
        assert_eq!(
            items.list_index_type[LIST_ELEMENT_KEY].kind,
            ShapeKind::List
        );
    }

    #[test]
    fn test_function_terminal_sets_arity() {
        let mut tree = ShapeTree::new();
        merge(
            &mut tree,
            vec![PathSegment::named("wow")],
            TerminalKind::Function { argument_count: 1 },
        );

        let wow = &tree.roots["wow"];
        assert_eq!(wow.kind, ShapeKind::Function);
        assert_eq!(wow.argument_count, Some(1));
    }

    #[test]
    fn test_iterated_call_result_is_recorded_on_the_return_side() {
        let mut tree = ShapeTree::new();
        merge(
            &mut tree,
            vec![PathSegment::called("getRows", 0)],
            TerminalKind::List,
        );

        let get_rows = &tree.roots["getRows"];
        assert_eq!(get_rows.kind, ShapeKind::Function);
        assert_eq!(get_rows.return_kind, ShapeKind::List);
        assert!(get_rows.returns_list());
    }

    #[test]
    fn test_call_on_iterated_node_keeps_its_elements() {
        let mut tree = ShapeTree::new();
        merge(
            &mut tree,
            vec![
                PathSegment::named("foo").with_array_groups(1),
                PathSegment::named("zap"),
            ],
            TerminalKind::Value,
        );
        merge(
            &mut tree,
            vec![PathSegment::called("foo", 1)],
            TerminalKind::Value,
        );

        let foo = &tree.roots["foo"];
        assert_eq!(foo.kind, ShapeKind::Function);
        assert_eq!(foo.argument_count, Some(1));
        assert!(foo.list_index_type.contains_key("zap"));
        assert!(foo.returns_list());
    }

    #[test]
    fn test_disagreeing_arity_reports_a_problem_and_keeps_the_last() {
        let mut tree = ShapeTree::new();
        merge(
            &mut tree,
            vec![PathSegment::called("format", 2)],
            TerminalKind::Value,
        );
        let problems = merge(
            &mut tree,
            vec![PathSegment::called("format", 3)],
            TerminalKind::Value,
        );

        assert_eq!(tree.roots["format"].argument_count, Some(3));
        assert_eq!(problems.len(), 1);
        assert!(problems.problems()[0].message.contains("'format'"));
    }

    #[test]
    fn test_repeated_merges_are_stable() {
        let mut tree = ShapeTree::new();
        for _ in 0..2 {
            merge(
                &mut tree,
                vec![PathSegment::named("a"), PathSegment::named("b")],
                TerminalKind::Value,
            );
        }

        let copy = tree.clone();
        merge(
            &mut tree,
            vec![PathSegment::named("a"), PathSegment::named("b")],
            TerminalKind::Value,
        );
        assert_eq!(tree, copy);
    }

    #[test]
    fn test_shape_tree_serializes_with_member_order() {
        let mut tree = ShapeTree::new();
        merge(&mut tree, vec![PathSegment::named("zeta")], TerminalKind::Value);
        merge(&mut tree, vec![PathSegment::named("alpha")], TerminalKind::Value);

        let json = serde_json::to_string(&tree).unwrap();
        let zeta = json.find("\"zeta\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        assert!(zeta < alpha);
    }
}
