//! Board trait definitions.

use crate::core::Square;
use crate::piece::Piece;

/// Read-only access to the occupant of each square.
pub trait BoardView {
    /// Returns the piece at the given square, if any.
    fn piece_at(&self, sq: Square) -> Option<&Piece>;

    /// Returns true if no piece stands on the square.
    fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }
}

/// A view of `board` where `vacated` reads as empty.
///
/// Compound legs are evaluated against this view so a piece does not block
/// its own path back across its starting square.
pub struct Vacated<'a, B: ?Sized> {
    pub board: &'a B,
    pub vacated: Square,
}

impl<B: BoardView + ?Sized> BoardView for Vacated<'_, B> {
    fn piece_at(&self, sq: Square) -> Option<&Piece> {
        if sq == self.vacated {
            None
        } else {
            self.board.piece_at(sq)
        }
    }
}
