use crate::observe::PathSegment;
use std::collections::HashMap;
use std::rc::Rc;

/// What an alias name stands for inside a repeating container's subtree
#[derive(Debug, Clone, PartialEq)]
pub enum AliasTarget {
    /// Per-item alias: the canonical path of the `items` source, whose last
    /// segment carries one extra trailing array group
    Item(Vec<PathSegment>),

    /// Per-index alias; index reads carry no shape information
    Index,
}

/// Alias bindings visible at one point of the template walk
/// Uses Rc parents so sibling subtrees can never observe a leaked alias
#[derive(Debug, Clone, Default)]
pub struct AliasScope {
    parent: Option<Rc<AliasScope>>,
    aliases: HashMap<String, AliasTarget>,
}

impl AliasScope {
    /// Create the root scope for one template
    pub fn new() -> Self {
        Self {
            parent: None,
            aliases: HashMap::new(),
        }
    }

    /// Create a child scope covering one repeating container's subtree
    pub fn with_parent(parent: Rc<AliasScope>) -> Self {
        Self {
            parent: Some(parent),
            aliases: HashMap::new(),
        }
    }

    pub fn bind(&mut self, name: impl Into<String>, target: AliasTarget) {
        self.aliases.insert(name.into(), target);
    }

    /// Look up an alias here or in enclosing scopes; inner bindings shadow
    /// outer ones.
    pub fn lookup(&self, name: &str) -> Option<&AliasTarget> {
        self.aliases
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.lookup(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}
