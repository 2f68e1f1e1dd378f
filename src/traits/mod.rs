//! Trait definitions shared by the engine components.
//!
//! Move generation only needs to read squares, so it is written against
//! [`BoardView`] instead of the full game state.

pub mod board;

pub use board::BoardView;
