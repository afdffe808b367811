//! Deferred mutation staging
//!
//! While a scope is open (a tick, or a message dispatch), mutations that
//! would invalidate iteration are staged instead of applied. Scopes nest;
//! the staged operations are handed back when the outermost scope closes.

/// Staging area for operations postponed to a scope boundary
#[derive(Debug)]
pub struct Deferred<T> {
    staged: Vec<T>,
    depth: u32,
}

impl<T> Deferred<T> {
    pub fn new() -> Self {
        Self { staged: Vec::new(), depth: 0 }
    }

    /// Open a (possibly nested) scope
    pub fn enter(&mut self) {
        self.depth += 1;
    }

    /// Close a scope. Returns the staged operations when the outermost
    /// scope closes, in the order they were staged.
    pub fn exit(&mut self) -> Option<Vec<T>> {
        debug_assert!(self.depth > 0, "Deferred::exit without matching enter");
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 && !self.staged.is_empty() {
            Some(std::mem::take(&mut self.staged))
        } else {
            None
        }
    }

    /// Whether operations must currently be staged
    pub fn is_deferring(&self) -> bool {
        self.depth > 0
    }

    pub fn stage(&mut self, op: T) {
        self.staged.push(op);
    }

    pub fn pending(&self) -> usize {
        self.staged.len()
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}
