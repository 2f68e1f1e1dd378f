//! TSFEN, the position string of Taikyoku Shogi.
//!
//! A TSFEN string is `<board> <move counter>`. The board lists the 36 ranks
//! separated by `/`, and each rank lists comma-separated cells from file 0:
//!
//! - a number is a run of empty squares;
//! - a lower-case code is a Sente piece and an upper-case code a Gote piece,
//!   optionally followed by a repeat count (`p32` is 32 Sente pawns).
//!
//! Promotion state is not recorded: a promoted piece is written with the
//! code of the species it became.

use itertools::Itertools;

use crate::catalog::{PieceCatalog, Species};
use crate::core::error::TsfenError;
use crate::core::{Player, Square};
use crate::piece::Piece;
use crate::traits::BoardView;
use crate::{BOARD_SIZE, INITIAL_TSFEN};

/// Alias accepted in place of [`INITIAL_TSFEN`].
pub const INITIAL_ALIAS: &str = "initial";

/// The content of a TSFEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub pieces: Vec<(Square, Piece)>,
    pub move_counter: u32,
}

/// Parses a TSFEN string, or the literal `initial`.
pub fn parse(catalog: &PieceCatalog, tsfen: &str) -> Result<Placement, TsfenError> {
    let tsfen = match tsfen.trim() {
        INITIAL_ALIAS => INITIAL_TSFEN,
        s => s,
    };

    let fields: Vec<&str> = tsfen.split_whitespace().collect();
    let &[board, counter] = fields.as_slice() else {
        return Err(TsfenError::FieldCount(fields.len()));
    };

    let rows: Vec<&str> = board.split('/').collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(TsfenError::RowCount(rows.len()));
    }

    let mut pieces = Vec::new();
    for (rank, row) in rows.iter().enumerate() {
        parse_row(catalog, rank, row, &mut pieces)?;
    }

    let move_counter = counter
        .parse()
        .map_err(|_| TsfenError::InvalidCounter(counter.to_string()))?;

    Ok(Placement { pieces, move_counter })
}

fn parse_row(
    catalog: &PieceCatalog,
    rank: usize,
    row: &str,
    pieces: &mut Vec<(Square, Piece)>,
) -> Result<(), TsfenError> {
    let cells = row
        .split(',')
        .map(|cell| parse_cell(catalog, rank, cell))
        .collect::<Result<Vec<_>, _>>()?;

    let width: usize = cells.iter().map(|(_, n)| n).sum();
    if width != BOARD_SIZE as usize {
        return Err(TsfenError::RowWidth { row: rank, width });
    }

    let mut file = 0;
    for (piece, count) in cells {
        if let Some(piece) = piece {
            for f in file..file + count {
                if let Some(sq) = Square::new(f as u8, rank as u8) {
                    pieces.push((sq, piece.clone()));
                }
            }
        }
        file += count;
    }

    Ok(())
}

fn parse_cell(catalog: &PieceCatalog, row: usize, cell: &str) -> Result<(Option<Piece>, usize), TsfenError> {
    let invalid = || TsfenError::InvalidCell {
        row,
        cell: cell.to_string(),
    };

    let letters = cell.bytes().take_while(u8::is_ascii_alphabetic).count();
    let (code, digits) = cell.split_at(letters);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let count = match digits {
        "" if letters > 0 => 1,
        "" => return Err(invalid()),
        n => n.parse::<usize>().map_err(|_| invalid())?,
    };
    if count == 0 {
        return Err(invalid());
    }
    if code.is_empty() {
        return Ok((None, count));
    }

    let owner = if code.bytes().all(|b| b.is_ascii_lowercase()) {
        Player::Sente
    } else if code.bytes().all(|b| b.is_ascii_uppercase()) {
        Player::Gote
    } else {
        return Err(invalid());
    };

    let species = Species::new(&code.to_ascii_uppercase()).ok_or_else(invalid)?;
    let piece = Piece::new(catalog, species, owner).map_err(|_| TsfenError::UnknownSpecies {
        row,
        species: code.to_string(),
    })?;

    Ok((Some(piece), count))
}

/// Writes a board and move counter as TSFEN, grouping identical
/// neighbouring cells.
pub fn format<B>(board: &B, move_counter: u32) -> String
where
    B: BoardView + ?Sized,
{
    let rows = (0..BOARD_SIZE)
        .map(|rank| {
            (0..BOARD_SIZE)
                .map(|file| {
                    Square::new(file, rank)
                        .and_then(|sq| board.piece_at(sq))
                        .map(Piece::tsfen_code)
                })
                .dedup_with_count()
                .map(|(n, cell)| match cell {
                    None => n.to_string(),
                    Some(code) if n == 1 => code,
                    Some(code) => format!("{code}{n}"),
                })
                .join(",")
        })
        .join("/");

    format!("{rows} {move_counter}")
}
