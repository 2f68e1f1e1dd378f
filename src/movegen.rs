//! Move and attack generation.
//!
//! A [`MovementDescriptor`] is evaluated element by element against a
//! [`BoardView`]. Compound moves recurse into their legs with the starting
//! square read as empty, so evaluation always goes through `&dyn BoardView`
//! to keep the recursion from instantiating a new view type per level.

use rustc_hash::FxHashSet;

use crate::core::{Direction, Offset, Square};
use crate::movement::{CompoundMove, MovementDescriptor, MovementKind, Range};
use crate::moves::Move;
use crate::piece::Piece;
use crate::traits::board::Vacated;
use crate::traits::BoardView;
use crate::TRIPLE_ARROW_JUMP_LIMIT;

/// Returns the moves of `piece` standing on `from` and the squares it
/// attacks, both free of duplicates and in generation order.
pub fn moves_and_attacks<B>(piece: &Piece, from: Square, board: &B) -> (Vec<Move>, Vec<Square>)
where
    B: BoardView + ?Sized,
{
    let view = Borrowed(board);
    let mut out = Generated::default();
    evaluate(piece, &piece.movement, from, from, &view, &mut out);
    (out.moves, out.attacks)
}

/// Adapts an unsized board so it can be handed out as `&dyn BoardView`.
struct Borrowed<'a, B: ?Sized>(&'a B);

impl<B: BoardView + ?Sized> BoardView for Borrowed<'_, B> {
    fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.0.piece_at(sq)
    }
}

#[derive(Debug, Default)]
struct Generated {
    moves: Vec<Move>,
    seen_moves: FxHashSet<Move>,
    attacks: Vec<Square>,
    seen_attacks: FxHashSet<Square>,
}

impl Generated {
    fn push_move(&mut self, mv: Move) {
        if self.seen_moves.insert(mv.clone()) {
            self.moves.push(mv);
        }
    }

    fn push_attack(&mut self, sq: Square) {
        if self.seen_attacks.insert(sq) {
            self.attacks.push(sq);
        }
    }
}

fn evaluate(
    piece: &Piece,
    movement: &MovementDescriptor,
    origin: Square,
    from: Square,
    board: &dyn BoardView,
    out: &mut Generated,
) {
    for kind in movement.kinds() {
        match kind {
            MovementKind::Slide { direction, range } => slide(piece, from, direction, range, board, out),
            MovementKind::Jump(offset) => jump(piece, from, offset, board, out),
            MovementKind::Compound(compound) => compound_move(piece, origin, from, compound, board, out),
            MovementKind::TripleArrow(direction) => triple_arrow(piece, from, direction, board, out),
        }
    }
}

fn slide(
    piece: &Piece,
    from: Square,
    direction: Direction,
    range: Range,
    board: &dyn BoardView,
    out: &mut Generated,
) {
    let (df, dr) = direction.unit().to_absolute(piece.owner);
    let mut sq = from;
    let mut distance = 0;

    while let Some(next) = sq.shift(df, dr) {
        distance += 1;
        if !range.reaches(distance) {
            break;
        }
        sq = next;
        out.push_attack(sq);

        match board.piece_at(sq) {
            None => out.push_move(Move::new(from, sq)),
            // flying pieces pass over anything of lower rank, friend or foe
            Some(target) if piece.range_capturing => {
                if target.rank >= piece.rank {
                    break;
                }
                out.push_move(Move::new(from, sq));
            }
            Some(target) => {
                if target.owner != piece.owner {
                    out.push_move(Move::new(from, sq));
                }
                break;
            }
        }
    }
}

fn jump(piece: &Piece, from: Square, offset: Offset, board: &dyn BoardView, out: &mut Generated) {
    let (df, dr) = offset.to_absolute(piece.owner);
    let Some(sq) = from.shift(df, dr) else {
        return;
    };

    out.push_attack(sq);
    if board.piece_at(sq).map_or(true, |p| p.owner != piece.owner) {
        out.push_move(Move::new(from, sq));
    }
}

fn compound_move(
    piece: &Piece,
    origin: Square,
    from: Square,
    compound: &CompoundMove,
    board: &dyn BoardView,
    out: &mut Generated,
) {
    let view = Vacated {
        board,
        vacated: origin,
    };

    let mut first = Generated::default();
    evaluate(piece, &compound.first, origin, from, &view, &mut first);
    for &sq in &first.attacks {
        out.push_attack(sq);
    }

    for leg in first.moves {
        let landing = leg.end;
        let continues = view.is_empty(landing) || compound.can_continue_after_capture;
        out.push_move(Move::with_steps(from, leg.intermediate_steps.clone(), landing));

        if !continues || compound.second.is_empty() {
            continue;
        }

        let mut second = Generated::default();
        evaluate(piece, &compound.second, origin, landing, &view, &mut second);
        for &sq in second.attacks.iter().filter(|&&sq| sq != origin) {
            out.push_attack(sq);
        }

        for tail in second.moves {
            if tail.end == origin {
                continue;
            }
            let mut steps = Vec::with_capacity(leg.intermediate_steps.len() + tail.intermediate_steps.len() + 1);
            steps.extend_from_slice(&leg.intermediate_steps);
            steps.push(landing);
            steps.extend(tail.intermediate_steps);
            out.push_move(Move::with_steps(from, steps, tail.end));
        }
    }
}

fn triple_arrow(piece: &Piece, from: Square, direction: Direction, board: &dyn BoardView, out: &mut Generated) {
    let (df, dr) = direction.unit().to_absolute(piece.owner);
    let mut occupied = 0;
    let mut sq = from;

    while let Some(next) = sq.shift(df, dr) {
        sq = next;
        let occupant = board.piece_at(sq);

        if occupied > 0 {
            out.push_attack(sq);
            if occupant.map_or(true, |p| p.owner != piece.owner) {
                out.push_move(Move::new(from, sq));
            }
        }

        if occupant.is_some() {
            occupied += 1;
            if occupied > TRIPLE_ARROW_JUMP_LIMIT {
                break;
            }
        }
    }
}
