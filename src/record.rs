//! Move recording.
//!
//! Every applied move leaves a [`MoveRecord`] in the game history holding
//! what is needed to undo it.

use std::fmt;

use crate::core::{Player, Square};
use crate::moves::Move;
use crate::piece::Piece;

/// MoveRecord stores information necessary to undo the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    /// The piece as it stood on the start square.
    pub moved: Piece,
    /// The piece as it was placed on the end square.
    pub placed: Piece,
    /// Every piece removed by the move, with the square it stood on.
    pub captured: Vec<(Square, Piece)>,
}

impl MoveRecord {
    pub fn promoted(&self) -> bool {
        self.placed.promoted && !self.moved.promoted
    }

    pub fn player(&self) -> Player {
        self.moved.owner
    }

    /// Formats the move in the usual Western style: the piece code, the
    /// squares joined by `-` (or `x` before a capture), then `+` when the
    /// piece promoted.
    ///
    /// # Examples
    ///
    /// ```
    /// use taikyoku::{Game, Move, PieceCatalog};
    /// use std::sync::Arc;
    ///
    /// let catalog = Arc::new(PieceCatalog::standard().unwrap());
    /// let mut game = Game::initial(catalog).unwrap();
    /// game.make_move(&"34gg 34ff".parse::<Move>().unwrap()).unwrap();
    ///
    /// assert_eq!("P 34gg-34ff", game.move_history()[0].to_notation());
    /// ```
    pub fn to_notation(&self) -> String {
        let mut out = format!("{} {}", self.moved.species, self.mv.start);

        for sq in self.mv.touched_squares() {
            let capture = self.captured.iter().any(|(s, _)| *s == sq);
            out.push(if capture { 'x' } else { '-' });
            out.push_str(&sq.to_string());
        }

        if self.promoted() {
            out.push('+');
        }
        out
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

impl PartialEq<Move> for MoveRecord {
    fn eq(&self, other: &Move) -> bool {
        self.mv == *other
    }
}
