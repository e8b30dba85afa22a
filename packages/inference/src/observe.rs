use crate::scope::{AliasScope, AliasTarget};
use bindshape_parser::Expression;
use serde::{Deserialize, Serialize};

/// One step of a canonicalized binding path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub name: String,

    /// Argument count when the segment is invoked
    pub call: Option<usize>,

    /// Trailing `[]` groups introduced by alias expansion
    pub array_groups: usize,
}

impl PathSegment {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            call: None,
            array_groups: 0,
        }
    }

    pub fn called(name: impl Into<String>, argument_count: usize) -> Self {
        Self {
            name: name.into(),
            call: Some(argument_count),
            array_groups: 0,
        }
    }

    pub fn with_array_groups(mut self, array_groups: usize) -> Self {
        self.array_groups = array_groups;
        self
    }
}

/// How a path's final node is used at the observation site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalKind {
    /// Plain read
    Value,

    /// Iterated by a repeating container
    List,

    /// Invoked as an event handler with the given arity
    Function { argument_count: usize },
}

/// One canonicalized use of a data path, ready for shape merging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathObservation {
    pub segments: Vec<PathSegment>,
    pub terminal: TerminalKind,
}

/// Observations extracted from one binding expression: the expression's
/// own path plus one per call argument, recursively.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationSet {
    /// The expression's own path. Absent for literal expressions and for
    /// paths rooted at a per-index alias.
    pub main: Option<PathObservation>,

    pub arguments: Vec<PathObservation>,
}

impl ObservationSet {
    /// Main observation first, then arguments in source order.
    pub fn iter(&self) -> impl Iterator<Item = &PathObservation> {
        self.main.iter().chain(self.arguments.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_none() && self.arguments.is_empty()
    }
}

/// Canonicalized observations for `expression` under the aliases in scope.
///
/// Negation prefixes and wildcard suffixes do not change what the template
/// reads, so they are stripped before the path is flattened.
pub fn observe_expression(
    expression: &Expression,
    scope: &AliasScope,
    terminal: TerminalKind,
) -> ObservationSet {
    let mut segments = Vec::new();
    let mut arguments = Vec::new();
    let main = flatten_spine(expression.unwrapped(), scope, &mut segments, &mut arguments)
        && resolve_root_alias(&mut segments, scope);

    ObservationSet {
        main: main.then_some(PathObservation { segments, terminal }),
        arguments,
    }
}

/// Flattens the spine of `expression` into path segments, spawning one
/// argument observation per non-literal call argument along the way.
/// Returns false for literal spines, which observe nothing.
fn flatten_spine(
    expression: &Expression,
    scope: &AliasScope,
    segments: &mut Vec<PathSegment>,
    arguments: &mut Vec<PathObservation>,
) -> bool {
    match expression {
        Expression::Identifier { name } => {
            segments.push(PathSegment::named(name.clone()));
            true
        }
        Expression::Literal { .. } => false,
        Expression::PropertyAccess { base, name } => {
            if !flatten_spine(base, scope, segments, arguments) {
                return false;
            }
            segments.push(PathSegment::named(name.clone()));
            true
        }
        Expression::MethodCall {
            callee,
            arguments: call_arguments,
        } => {
            if !flatten_spine(callee, scope, segments, arguments) {
                return false;
            }
            if let Some(last) = segments.last_mut() {
                last.call = Some(call_arguments.len());
            }
            for argument in call_arguments {
                let nested = observe_expression(argument, scope, TerminalKind::Value);
                arguments.extend(nested.main);
                arguments.extend(nested.arguments);
            }
            true
        }
        Expression::Negation { operand } => flatten_spine(operand, scope, segments, arguments),
        Expression::WildcardPath { base } => flatten_spine(base, scope, segments, arguments),
    }
}

/// Left-most-segment alias resolution. Only a plain, call-free root is
/// eligible. An item alias splices its canonical segments in front of the
/// remainder; an index alias drops the observation entirely.
fn resolve_root_alias(segments: &mut Vec<PathSegment>, scope: &AliasScope) -> bool {
    let root = match segments.first() {
        Some(root) if root.call.is_none() && root.array_groups == 0 => root,
        _ => return true,
    };
    match scope.lookup(&root.name) {
        Some(AliasTarget::Item(target)) => {
            let target = target.clone();
            segments.splice(0..1, target);
            true
        }
        Some(AliasTarget::Index) => false,
        None => true,
    }
}
