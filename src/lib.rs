//! A rules engine for Taikyoku Shogi.
//!
//! `taikyoku` models the largest historical shogi variant, played on a
//! 36×36 board by pieces of many species with unusual powers. The
//! movement of each species is written in an extended Betza notation and
//! compiled once into a [`MovementDescriptor`]. A [`Game`] keeps the legal
//! moves of every piece and a two-way attack index up to date on each board
//! change, so asking for moves, attackers or the royal status of a player is
//! a lookup rather than a board scan.
//!
//! # Module Organization
//!
//! - **core**: board geometry, players, errors and the match clock
//! - **movement**: the notation parser and the compiled movement types
//! - **catalog**: species metadata, loaded from JSON
//! - **piece**, **movegen**: pieces and move generation
//! - **game**, **attack_index**, **record**: game state, the attack index and move history
//! - **tsfen**: the position string format
//! - **protocol**: a transport-free host for the remote engine protocol
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use taikyoku::{Game, Move, PieceCatalog, Player};
//!
//! let catalog = Arc::new(PieceCatalog::standard().unwrap());
//! let mut game = Game::initial(catalog).unwrap();
//!
//! // Moves use algebraic squares: the file counted from the right, then the rank.
//! let m: Move = "34gg 34ff".parse().unwrap();
//! assert!(game.moves_at(m.start).contains(&m));
//! game.make_move(&m).unwrap();
//!
//! assert_eq!(Player::Gote, game.current_player());
//! assert!(game.to_tsfen().ends_with(" 1"));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod attack_index;
pub mod catalog;
pub mod core;
pub mod game;
pub mod movegen;
pub mod movement;
pub mod moves;
pub mod piece;
pub mod protocol;
pub mod record;
pub mod traits;
pub mod tsfen;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::attack_index::AttackIndex;
pub use self::catalog::{PieceCatalog, PieceEntry, Species, SpeciesInfo};
pub use self::core::error::{CatalogError, GameError, NotationError, ProtocolError, TsfenError};
pub use self::core::{Direction, Offset, ParseSquareError, Player, Square, TimeControl};
pub use self::game::{Game, GameStatus};
pub use self::movement::{CompoundMove, MovementDescriptor, MovementKind, Range};
pub use self::moves::{Move, ParseMoveError};
pub use self::piece::Piece;
pub use self::protocol::{GameHost, Outgoing};
pub use self::record::MoveRecord;
pub use self::traits::BoardView;

// ============================================================================
// Rule constants
// ============================================================================

/// Number of files and ranks.
pub const BOARD_SIZE: u8 = 36;

pub const NUM_SQUARES: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Number of ranks on the far side of the board where pieces promote.
pub const PROMOTION_ZONE_DEPTH: u8 = 11;

/// Number of occupied squares a triple-slashed arrow may jump over.
pub const TRIPLE_ARROW_JUMP_LIMIT: usize = 3;

/// The starting position in TSFEN.
///
/// This is a reduced layout built from the species of
/// [`PieceCatalog::standard`]: four occupied ranks per side instead of the
/// full Taikyoku setup. Sente has 684 legal moves from it.
pub const INITIAL_TSFEN: &str = concat!(
    "7,L,N,SVG,IG,CG,GOG,D,GB,FK,DE,K,CP,DE,FK,GB,D,GOG,CG,IG,SVG,N,L,7/",
    "RC,9,VM,SM,B,R,LN,HF,SE,GG,VG,SE,HF,LN,R,B,SM,VM,9,RC/",
    "8,FLG,AG,FID,FCR,GDR,WH,MUG,HHW,DH,DK2,DH,HHW,MUG,WH,GDR,FCR,FID,AG,FLG,8/",
    "CS,GT,P32,GT,CS/",
    "36/36/36/36/36/36/36/",
    "36/36/36/36/36/36/36/",
    "36/36/36/36/36/36/36/",
    "36/36/36/36/36/36/36/",
    "cs,gt,p32,gt,cs/",
    "8,flg,ag,fid,fcr,gdr,wh,mug,hhw,dh,dk2,dh,hhw,mug,wh,gdr,fcr,fid,ag,flg,8/",
    "rc,9,vm,sm,b,r,ln,hf,se,vg,gg,se,hf,ln,r,b,sm,vm,9,rc/",
    "7,l,n,svg,ig,cg,gog,d,gb,fk,de,cp,k,de,fk,gb,d,gog,cg,ig,svg,n,l,7 0"
);
