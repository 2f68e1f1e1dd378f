//! Error types for the engine, the notation parser, the catalog, the
//! position codec and the protocol host.

use thiserror::Error;

use super::square::Square;

/// Errors raised by board and game operations.
///
/// These indicate caller bugs or internal inconsistencies, never user input
/// mistakes. The protocol host validates moves before they reach the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A position passed to a mutating board operation is off the board.
    #[error("square ({file}, {rank}) is outside the 36x36 board")]
    OutOfBounds { file: i16, rank: i16 },

    /// `make_move` was called with an empty start square.
    #[error("no piece at start square {0}")]
    NoPieceAtStart(Square),

    /// `promote` was called on a piece that cannot promote.
    #[error("{species} cannot promote: {reason}")]
    InvalidPromotion {
        species: String,
        reason: &'static str,
    },

    /// Both players have lost every royal piece.
    #[error("both players have no royal pieces left")]
    InvalidGameState,

    /// A species code is not present in the catalog.
    #[error("unknown species {0:?}")]
    UnknownSpecies(String),

    /// `unmake_move` was called with an empty history.
    #[error("no move to undo")]
    NoMoveToUndo,
}

/// Errors raised while parsing movement notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Error parsing Betza notation {notation}: \"{character}\" is not a valid character")]
    InvalidCharacter { character: char, notation: String },

    #[error("Error parsing Betza notation {notation}: unbalanced bracket")]
    UnbalancedBracket { notation: String },

    #[error("Error parsing Betza notation {notation}: malformed offset {literal:?}")]
    InvalidOffset { literal: String, notation: String },

    #[error("Error parsing Betza notation {notation}: {name:?} is not an arrow direction")]
    InvalidArrowDirection { name: String, notation: String },

    #[error("Error parsing Betza notation {notation}: compound move has an empty leg")]
    EmptyLeg { notation: String },

    #[error("Error parsing Betza notation {notation}: a slide range must be at least 1")]
    ZeroRange { notation: String },
}

/// Errors raised while building a piece catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("malformed catalog data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid species code {0:?}")]
    InvalidCode(String),

    #[error("species {0} is listed twice")]
    DuplicateSpecies(String),

    #[error("species {species} promotes to unknown species {target}")]
    UnknownPromotion { species: String, target: String },

    #[error("movement of species {species}: {source}")]
    Notation {
        species: String,
        #[source]
        source: NotationError,
    },
}

/// Errors raised by the TSFEN codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TsfenError {
    #[error("TSFEN must have a board and a move counter field, got {0} fields")]
    FieldCount(usize),

    #[error("TSFEN board must have 36 rows, got {0}")]
    RowCount(usize),

    #[error("TSFEN row {row} describes {width} squares instead of 36")]
    RowWidth { row: usize, width: usize },

    #[error("TSFEN row {row} has an invalid cell {cell:?}")]
    InvalidCell { row: usize, cell: String },

    #[error("TSFEN row {row} names unknown species {species:?}")]
    UnknownSpecies { row: usize, species: String },

    #[error("invalid TSFEN move counter {0:?}")]
    InvalidCounter(String),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Errors detected by the protocol host while handling client input.
///
/// Move errors are turned into a resignation of the offending player; the
/// others are logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("invalid square {0:?}")]
    InvalidSquare(String),

    #[error("malformed move command")]
    MalformedMove,

    #[error("not player {0}'s turn")]
    NotYourTurn(usize),

    #[error("no piece at {0}")]
    NoPiece(Square),

    #[error("the piece at {0} belongs to the opponent")]
    NotYourPiece(Square),

    #[error("cannot capture own piece at {0}")]
    SelfCapture(Square),

    #[error("{end} is not a legal destination from {start}")]
    IllegalDestination { start: Square, end: Square },

    #[error("path from {start} to {end} is blocked")]
    PathBlocked { start: Square, end: Square },

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("the game has not started")]
    GameNotStarted,

    #[error("both clients must complete the handshake first")]
    HandshakeIncomplete,

    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Engine(#[from] GameError),
}
