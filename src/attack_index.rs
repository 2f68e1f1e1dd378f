use rustc_hash::FxHashSet;

use crate::core::Square;
use crate::NUM_SQUARES;

/// Two-way attack relation between squares.
///
/// `forwards(a)` holds the squares the piece on `a` attacks and
/// `backwards(b)` the squares whose pieces attack `b`. Every mutation
/// updates both sides, so `b ∈ forwards(a)` iff `a ∈ backwards(b)`.
///
/// # Examples
///
/// ```
/// use taikyoku::{AttackIndex, Square};
///
/// let a = Square::new(0, 0).unwrap();
/// let b = Square::new(0, 1).unwrap();
///
/// let mut index = AttackIndex::new();
/// index.set(a, b);
/// assert!(index.forwards(a).contains(&b));
/// assert!(index.backwards(b).contains(&a));
///
/// index.set_forwards(a, []);
/// assert!(index.backwards(b).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackIndex {
    forward: Vec<FxHashSet<Square>>,
    backward: Vec<FxHashSet<Square>>,
}

impl Default for AttackIndex {
    fn default() -> Self {
        AttackIndex::new()
    }
}

impl AttackIndex {
    pub fn new() -> AttackIndex {
        AttackIndex {
            forward: vec![FxHashSet::default(); NUM_SQUARES],
            backward: vec![FxHashSet::default(); NUM_SQUARES],
        }
    }

    /// Records that the piece on `from` attacks `to`.
    pub fn set(&mut self, from: Square, to: Square) {
        self.forward[from.index()].insert(to);
        self.backward[to.index()].insert(from);
    }

    /// Removes the edge `from -> to`, if present.
    pub fn delete(&mut self, from: Square, to: Square) {
        self.forward[from.index()].remove(&to);
        self.backward[to.index()].remove(&from);
    }

    /// Squares attacked from `sq`.
    pub fn forwards(&self, sq: Square) -> &FxHashSet<Square> {
        &self.forward[sq.index()]
    }

    /// Squares attacking `sq`.
    pub fn backwards(&self, sq: Square) -> &FxHashSet<Square> {
        &self.backward[sq.index()]
    }

    /// Replaces the forward set of `from`, touching only the edges that
    /// actually changed.
    pub fn set_forwards<I>(&mut self, from: Square, targets: I)
    where
        I: IntoIterator<Item = Square>,
    {
        let new: FxHashSet<Square> = targets.into_iter().collect();
        let old = std::mem::take(&mut self.forward[from.index()]);

        for removed in old.difference(&new) {
            self.backward[removed.index()].remove(&from);
        }
        for added in new.difference(&old) {
            self.backward[added.index()].insert(from);
        }

        self.forward[from.index()] = new;
    }

    /// Returns true if both sides of the relation agree.
    pub fn is_symmetric(&self) -> bool {
        let forward_ok = Square::iter().all(|a| self.forwards(a).iter().all(|b| self.backwards(*b).contains(&a)));
        let backward_ok = Square::iter().all(|b| self.backwards(b).iter().all(|a| self.forwards(*a).contains(&b)));
        forward_ok && backward_ok
    }
}
