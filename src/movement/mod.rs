//! Movement descriptors compiled from extended Betza notation.
//!
//! Every species carries one [`MovementDescriptor`], produced once by
//! [`parse`] and shared between all pieces of that species.
//!
//! # Notation summary
//!
//! | Element | Meaning |
//! |---------|---------|
//! | `W` `F` | one step orthogonally / diagonally (slides) |
//! | `D` `N` `A` `H` `C` `Z` `G` | leapers (2,0) (2,1) (2,2) (3,0) (3,1) (3,2) (3,3) |
//! | `(dx,dy)` | leaper with an explicit offset |
//! | `B` `R` `K` `Q` | `FF`, `WW`, `WF`, `FFWW` (Q keeps its modifiers and range) |
//! | `f b l r s v` | forward, backward, left, right, sideways, vertical |
//! | digit | range of the preceding slide; a doubled atom slides without limit |
//! | `(leg1-leg2)` | compound move; `c` on leg1, `s` or `a` on leg2 |
//! | `((cXcdX)-X)` | range-capturing slide along X |
//! | `{F,FR,...}>` | triple-slashed arrow directions |

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::{Direction, Offset};

mod parser;

pub use parser::parse;

/// The reach of a slide.
///
/// `Limited(n) < Unlimited` for every `n`, so merging two slides keeps the
/// longer one with `max`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize)]
pub enum Range {
    Limited(u8),
    Unlimited,
}

impl Range {
    /// Returns true if a slide of this range reaches `distance` squares.
    #[inline]
    pub fn reaches(self, distance: u32) -> bool {
        match self {
            Range::Limited(n) => distance <= n as u32,
            Range::Unlimited => true,
        }
    }
}

/// A two-leg move: the piece moves by `first`, then optionally by `second`
/// from where the first leg landed.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize)]
pub struct CompoundMove {
    pub first: MovementDescriptor,
    /// Whether the second leg may follow a capture made by the first leg.
    pub can_continue_after_capture: bool,
    pub second: MovementDescriptor,
}

/// Normalized movement of a species, in the owner's frame.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize)]
pub struct MovementDescriptor {
    pub slides: BTreeMap<Direction, Range>,
    pub jumps: Vec<Offset>,
    pub compound_moves: Vec<CompoundMove>,
    pub triple_slashed_arrow_dirs: Vec<Direction>,
}

/// One element of a movement descriptor, as consumed by move generation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MovementKind<'a> {
    Slide { direction: Direction, range: Range },
    Jump(Offset),
    Compound(&'a CompoundMove),
    TripleArrow(Direction),
}

impl MovementDescriptor {
    /// Returns every movement element of the descriptor.
    pub fn kinds(&self) -> impl Iterator<Item = MovementKind<'_>> {
        let slides = self
            .slides
            .iter()
            .map(|(&direction, &range)| MovementKind::Slide { direction, range });
        let jumps = self.jumps.iter().map(|&o| MovementKind::Jump(o));
        let compounds = self.compound_moves.iter().map(MovementKind::Compound);
        let arrows = self
            .triple_slashed_arrow_dirs
            .iter()
            .map(|&d| MovementKind::TripleArrow(d));

        slides.chain(jumps).chain(compounds).chain(arrows)
    }

    /// Returns true if the descriptor allows no movement at all.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
            && self.jumps.is_empty()
            && self.compound_moves.is_empty()
            && self.triple_slashed_arrow_dirs.is_empty()
    }

    /// Returns the range of the slide in `direction`, if any.
    pub fn slide_range(&self, direction: Direction) -> Option<Range> {
        self.slides.get(&direction).copied()
    }

    /// Returns true if `direction` is one of the triple-slashed arrow directions.
    pub fn has_triple_arrow(&self, direction: Direction) -> bool {
        self.triple_slashed_arrow_dirs.contains(&direction)
    }

    pub(crate) fn add_slide(&mut self, direction: Direction, range: Range) {
        self.slides
            .entry(direction)
            .and_modify(|r| *r = (*r).max(range))
            .or_insert(range);
    }

    pub(crate) fn add_jump(&mut self, offset: Offset) {
        if !self.jumps.contains(&offset) {
            self.jumps.push(offset);
        }
    }

    /// Unions another descriptor's slides and jumps into this one.
    pub(crate) fn absorb(&mut self, other: &MovementDescriptor) {
        for (&d, &r) in &other.slides {
            self.add_slide(d, r);
        }
        for &o in &other.jumps {
            self.add_jump(o);
        }
    }
}
