//! Per-attempt metavariable binding store.
//!
//! Bindings are recorded in an append-only log so that a snapshot is just
//! the current length and restoring truncates — backtracking over variadic
//! splits never re-derives earlier successful binds.

use smallvec::SmallVec;

use crate::tree::{seq_structural_eq, SyntaxNode};

/// What a metavariable is bound to: exactly one node for `$x`, an ordered
/// sequence of zero or more siblings for `$*xs`.
#[derive(Clone, Debug)]
pub enum Binding<'t> {
    One(&'t SyntaxNode),
    Many(SmallVec<[&'t SyntaxNode; 4]>),
}

/// Opaque marker for [`Bindings::restore`].
#[derive(Clone, Copy, Debug)]
pub struct Snapshot(usize);

#[derive(Debug, Default)]
pub struct Bindings<'p, 't> {
    entries: Vec<(&'p str, Binding<'t>)>,
}

impl<'p, 't> Bindings<'p, 't> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn get(&self, name: &str) -> Option<&Binding<'t>> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, b)| b)
    }

    /// Bind `name` to a single node. Returns `false` on a binding
    /// conflict: the name is already bound to something not structurally
    /// equal. A repeated equal occurrence is accepted without a new entry.
    pub fn bind_one(&mut self, name: &'p str, node: &'t SyntaxNode) -> bool {
        match self.get(name) {
            Some(Binding::One(prev)) => prev.structural_eq(node),
            Some(Binding::Many(_)) => false,
            None => {
                self.entries.push((name, Binding::One(node)));
                true
            }
        }
    }

    /// Bind `name` to an ordered node sequence (variadic metavariable).
    pub fn bind_many(&mut self, name: &'p str, nodes: &[&'t SyntaxNode]) -> bool {
        match self.get(name) {
            Some(Binding::Many(prev)) => seq_structural_eq(prev, nodes),
            Some(Binding::One(_)) => false,
            None => {
                self.entries
                    .push((name, Binding::Many(SmallVec::from_slice(nodes))));
                true
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.entries.len())
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.entries.truncate(snapshot.0);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
