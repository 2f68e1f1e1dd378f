//! Core types shared by every part of the engine.
//!
//! This module contains the board geometry, the players, the error types and
//! the match clock. None of it depends on piece data.

pub mod color;
pub mod direction;
pub mod error;
pub mod square;
pub mod time;

pub use color::{Player, PlayerIter};
pub use direction::{Direction, Offset};
pub use error::{CatalogError, GameError, NotationError, ProtocolError, TsfenError};
pub use square::{ParseSquareError, Square, SquareIter};
pub use time::TimeControl;
