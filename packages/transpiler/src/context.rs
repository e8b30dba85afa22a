use std::collections::{HashMap, HashSet};

/// Scope information carried while lowering a template subtree.
///
/// `local_vars` holds identifiers that resolve to generated local variables
/// rather than `this` properties. `repeat_var` names the innermost repeat
/// item so event listeners can wrap their event with the item model.
/// `expression_vars` maps a whole binding expression to a variable that
/// already holds its value.
#[derive(Debug, Clone, Default)]
pub struct TranspilerContext {
    pub local_vars: HashSet<String>,
    pub repeat_var: Option<String>,
    pub expression_vars: HashMap<String, String>,
}

/// Stack of contexts mirroring the nesting of scope-introducing elements.
///
/// Pushing snapshots the current context so a pop restores it exactly,
/// including any expression variables registered inside the scope.
#[derive(Debug, Default)]
pub struct ContextStack {
    stack: Vec<TranspilerContext>,
    current: TranspilerContext,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &TranspilerContext {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut TranspilerContext {
        &mut self.current
    }

    pub fn push(&mut self) {
        self.stack.push(self.current.clone());
    }

    /// Restores the context saved by the matching `push`. Returns the
    /// context that was current, or `None` when the stack is empty.
    pub fn pop(&mut self) -> Option<TranspilerContext> {
        let restored = self.stack.pop()?;
        Some(std::mem::replace(&mut self.current, restored))
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
