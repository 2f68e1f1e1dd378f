use std::fmt;
use std::iter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::color::Player;
use crate::{BOARD_SIZE, NUM_SQUARES, PROMOTION_ZONE_DEPTH};

const ASCII_LOWER_A: u8 = b'a';

/// Ranks that are named with a single letter (`a`..`z`); the rest use a
/// doubled letter (`aa`..`jj`).
const SINGLE_LETTER_RANKS: u8 = 26;

/// Represents a position of each cell on the 36×36 board.
///
/// Internally the square is the dense index `file * 36 + rank`, which is used
/// as the key of every per-square table in the engine.
///
/// # Examples
///
/// ```
/// use taikyoku::Square;
///
/// let sq = Square::new(0, 0).unwrap();
/// assert_eq!("36a", sq.to_string());
///
/// let sq: Square = "1jj".parse().unwrap();
/// assert_eq!((35, 35), sq.coordinates());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    inner: u16,
}

impl Square {
    /// Creates a new instance of `Square`.
    ///
    /// `file` and `rank` can take a value from 0 to 35.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file >= BOARD_SIZE || rank >= BOARD_SIZE {
            return None;
        }

        Some(Square {
            inner: file as u16 * BOARD_SIZE as u16 + rank as u16,
        })
    }

    /// Creates a square from signed coordinates, returning `None` when off the board.
    pub fn from_coords(file: i16, rank: i16) -> Option<Self> {
        if !(0..BOARD_SIZE as i16).contains(&file) || !(0..BOARD_SIZE as i16).contains(&rank) {
            return None;
        }
        Square::new(file as u8, rank as u8)
    }

    /// Creates a new instance of `Square` with the given index value.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_SQUARES {
            return None;
        }

        Some(Square {
            inner: index as u16,
        })
    }

    /// Parses the algebraic name used by the engine protocol.
    ///
    /// The file is written as `36 - file` and the rank as `a`..`z` followed by
    /// `aa`..`jj` for the last ten ranks.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let digits = s.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || digits > 2 || digits == s.len() {
            return None;
        }

        let (num, letters) = s.split_at(digits);
        if num.starts_with('0') {
            return None;
        }
        let file_num: u8 = num.parse().ok()?;
        if file_num == 0 || file_num > BOARD_SIZE {
            return None;
        }

        let letters = letters.as_bytes();
        let rank = match *letters {
            [c] if c.is_ascii_lowercase() => c - ASCII_LOWER_A,
            [c, d] if c == d && (b'a'..=b'j').contains(&c) => {
                SINGLE_LETTER_RANKS + (c - ASCII_LOWER_A)
            }
            _ => return None,
        };

        Square::new(BOARD_SIZE - file_num, rank)
    }

    /// Returns an iterator of all squares on the board in index order.
    pub fn iter() -> SquareIter {
        SquareIter { current: 0 }
    }

    /// Returns the file (column) of the square (0-indexed).
    #[inline(always)]
    pub fn file(self) -> u8 {
        (self.inner / BOARD_SIZE as u16) as u8
    }

    /// Returns the rank (row) of the square (0-indexed).
    #[inline(always)]
    pub fn rank(self) -> u8 {
        (self.inner % BOARD_SIZE as u16) as u8
    }

    /// Returns a new `Square` instance by moving the file and the rank values.
    ///
    /// # Examples
    ///
    /// ```
    /// use taikyoku::Square;
    ///
    /// let sq = Square::new(1, 1).unwrap();
    /// let shifted = sq.shift(2, 3).unwrap();
    ///
    /// assert_eq!(3, shifted.file());
    /// assert_eq!(4, shifted.rank());
    /// assert_eq!(None, sq.shift(-2, 0));
    /// ```
    #[must_use]
    pub fn shift(self, df: i16, dr: i16) -> Option<Self> {
        Square::from_coords(self.file() as i16 + df, self.rank() as i16 + dr)
    }

    /// Returns a relative rank as if the specified player is Gote.
    ///
    /// Rank 0 is always the player's own back rank.
    pub fn relative_rank(self, p: Player) -> u8 {
        match p {
            Player::Gote => self.rank(),
            Player::Sente => BOARD_SIZE - 1 - self.rank(),
        }
    }

    /// Returns true if the square lies in the promotion zone of the given player.
    ///
    /// # Examples
    ///
    /// ```
    /// use taikyoku::{Player, Square};
    ///
    /// assert!(Square::new(0, 10).unwrap().in_promotion_zone(Player::Sente));
    /// assert!(!Square::new(0, 11).unwrap().in_promotion_zone(Player::Sente));
    /// assert!(Square::new(0, 25).unwrap().in_promotion_zone(Player::Gote));
    /// ```
    pub fn in_promotion_zone(self, p: Player) -> bool {
        self.relative_rank(p) >= BOARD_SIZE - PROMOTION_ZONE_DEPTH
    }

    /// Converts the instance into the unique number for array indexing purpose.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.inner as usize
    }

    /// Returns both file and rank as a tuple.
    #[inline(always)]
    pub fn coordinates(self) -> (u8, u8) {
        (self.file(), self.rank())
    }

    /// Returns the offset from `self` to `other` as `(dfile, drank)`.
    pub fn delta(self, other: Square) -> (i16, i16) {
        (
            other.file() as i16 - self.file() as i16,
            other.rank() as i16 - self.rank() as i16,
        )
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", BOARD_SIZE - self.file())?;

        let rank = self.rank();
        if rank < SINGLE_LETTER_RANKS {
            write!(f, "{}", (rank + ASCII_LOWER_A) as char)
        } else {
            let c = (rank - SINGLE_LETTER_RANKS + ASCII_LOWER_A) as char;
            write!(f, "{c}{c}")
        }
    }
}

/// Error type for parsing a square from algebraic notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid square notation")
    }
}

impl std::error::Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s).ok_or(ParseSquareError)
    }
}

/// This struct is created by the [`Square::iter()`] method.
pub struct SquareIter {
    current: u16,
}

impl iter::Iterator for SquareIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.current;

        if cur as usize >= NUM_SQUARES {
            return None;
        }

        self.current += 1;

        Some(Square { inner: cur })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = NUM_SQUARES - self.current as usize;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for SquareIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        for file in 0..BOARD_SIZE {
            for rank in 0..BOARD_SIZE {
                let sq = Square::new(file, rank).unwrap();
                assert_eq!(file, sq.file());
                assert_eq!(rank, sq.rank());
                assert_eq!(file as usize * 36 + rank as usize, sq.index());
            }
        }

        assert_eq!(None, Square::new(36, 0));
        assert_eq!(None, Square::new(0, 36));
        assert_eq!(None, Square::from_coords(-1, 3));
    }

    #[test]
    fn from_algebraic() {
        let ok_cases = [
            ("36a", 0, 0),
            ("1a", 35, 0),
            ("36z", 0, 25),
            ("36aa", 0, 26),
            ("18jj", 18, 35),
            ("1jj", 35, 35),
            ("12e", 24, 4),
        ];
        let ng_cases = [
            "", "0a", "37a", "36", "a", "36ab", "36kk", "36A", "036a", "36aaa", "100a",
        ];

        for case in ok_cases.iter() {
            let sq = Square::from_algebraic(case.0);
            assert!(sq.is_some(), "{} should be valid", case.0);
            assert_eq!((case.1, case.2), sq.unwrap().coordinates());
        }

        for case in ng_cases.iter() {
            assert!(
                Square::from_algebraic(case).is_none(),
                "{case} should cause an error"
            );
        }
    }

    #[test]
    fn to_string() {
        for sq in Square::iter() {
            let parsed: Square = sq.to_string().parse().unwrap();
            assert_eq!(sq, parsed);
        }
        assert_eq!("1jj", Square::new(35, 35).unwrap().to_string());
        assert_eq!("35bb", Square::new(1, 27).unwrap().to_string());
    }

    #[test]
    fn iter() {
        assert_eq!(NUM_SQUARES, Square::iter().count());
        assert_eq!(Some(Square::new(0, 0).unwrap()), Square::iter().next());
    }

    #[test]
    fn promotion_zone() {
        for rank in 0..BOARD_SIZE {
            let sq = Square::new(7, rank).unwrap();
            assert_eq!(rank <= 10, sq.in_promotion_zone(Player::Sente));
            assert_eq!(rank >= 25, sq.in_promotion_zone(Player::Gote));
        }
    }

    #[test]
    fn delta() {
        let a = Square::new(3, 4).unwrap();
        let b = Square::new(1, 9).unwrap();
        assert_eq!((-2, 5), a.delta(b));
        assert_eq!((2, -5), b.delta(a));
    }
}
