use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Square;

/// Represents a move of one piece.
///
/// `intermediate_steps` lists the squares a compound move stopped on before
/// reaching `end`; any piece on them is captured, and they count toward
/// promotion.
///
/// # Examples
///
/// ```
/// use taikyoku::{Move, Square};
///
/// let mv: Move = "20x 20w 20v".parse().unwrap();
/// assert_eq!(Square::from_algebraic("20x").unwrap(), mv.start);
/// assert_eq!(vec![Square::from_algebraic("20w").unwrap()], mv.intermediate_steps);
/// assert_eq!("20x 20w 20v", mv.to_string());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intermediate_steps: Vec<Square>,
}

impl Move {
    /// Creates a single-leg move.
    pub fn new(start: Square, end: Square) -> Self {
        Move {
            start,
            end,
            intermediate_steps: Vec::new(),
        }
    }

    /// Creates a move that stops on `steps` before landing on `end`.
    pub fn with_steps(start: Square, steps: Vec<Square>, end: Square) -> Self {
        Move {
            start,
            end,
            intermediate_steps: steps,
        }
    }

    /// Returns true if the move passes through intermediate squares.
    pub fn is_compound(&self) -> bool {
        !self.intermediate_steps.is_empty()
    }

    /// Returns the squares that decide promotion: the end square and every
    /// intermediate step.
    pub fn touched_squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.intermediate_steps
            .iter()
            .copied()
            .chain(std::iter::once(self.end))
    }

    /// Parses the protocol notation: space-separated algebraic squares,
    /// start first and end last.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let squares = s
            .split_whitespace()
            .map(Square::from_algebraic)
            .collect::<Option<Vec<_>>>()?;

        match squares.as_slice() {
            [start, steps @ .., end] if start != end => {
                Some(Move::with_steps(*start, steps.to_vec(), *end))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.start)?;
        for step in &self.intermediate_steps {
            write!(f, " {step}")?;
        }
        write!(f, " {}", self.end)
    }
}

/// Error type for parsing a move from protocol notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoveError;

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid move notation")
    }
}

impl std::error::Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s).ok_or(ParseMoveError)
    }
}
