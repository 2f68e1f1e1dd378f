//! Game state.
//!
//! [`Game`] owns the grid and keeps two derived structures in step with it
//! on every mutation: the per-square move cache and the [`AttackIndex`].
//! Changing one square only regenerates the piece on it and the pieces whose
//! generation visited it, which the backward side of the index lists.

use std::sync::Arc;

use crate::attack_index::AttackIndex;
use crate::catalog::{PieceCatalog, Species};
use crate::core::error::{GameError, TsfenError};
use crate::core::{Direction, Player, Square};
use crate::moves::Move;
use crate::piece::Piece;
use crate::record::MoveRecord;
use crate::traits::BoardView;
use crate::tsfen;
use crate::{INITIAL_TSFEN, NUM_SQUARES};

/// Piece grid for the 36×36 board.
#[derive(Debug, Clone)]
struct Board {
    squares: Vec<Option<Piece>>,
}

impl Board {
    fn empty() -> Self {
        Board {
            squares: vec![None; NUM_SQUARES],
        }
    }
}

impl BoardView for Board {
    fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.index()].as_ref()
    }
}

/// Result of checking game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Won(Player),
}

/// Represents the state of a Taikyoku Shogi game.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use taikyoku::{Game, GameStatus, PieceCatalog, Player, Square};
///
/// let catalog = Arc::new(PieceCatalog::standard().unwrap());
/// let mut game = Game::initial(catalog).unwrap();
/// assert_eq!(Player::Sente, game.current_player());
/// assert_eq!(Ok(GameStatus::Playing), game.status());
///
/// let pawn = Square::from_algebraic("20gg").unwrap();
/// let mv = game.moves_at(pawn)[0].clone();
/// game.make_move(&mv).unwrap();
///
/// assert_eq!(Player::Gote, game.current_player());
/// assert!(game.moves_at(mv.end).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    catalog: Arc<PieceCatalog>,
    board: Board,
    move_counter: u32,
    royals_left: [u32; 2],
    move_cache: Vec<Vec<Move>>,
    attacks: AttackIndex,
    history: Vec<MoveRecord>,
    resigned: Option<Player>,
}

impl Game {
    /// Creates a game with an empty board.
    pub fn new(catalog: Arc<PieceCatalog>) -> Game {
        Game {
            catalog,
            board: Board::empty(),
            move_counter: 0,
            royals_left: [0; 2],
            move_cache: vec![Vec::new(); NUM_SQUARES],
            attacks: AttackIndex::new(),
            history: Vec::new(),
            resigned: None,
        }
    }

    /// Creates a game with the standard starting setup.
    pub fn initial(catalog: Arc<PieceCatalog>) -> Result<Game, TsfenError> {
        Game::from_tsfen(catalog, INITIAL_TSFEN)
    }

    /// Creates a game from a TSFEN string, or the literal `initial`.
    pub fn from_tsfen(catalog: Arc<PieceCatalog>, s: &str) -> Result<Game, TsfenError> {
        let position = tsfen::parse(&catalog, s)?;

        let mut game = Game::new(catalog);
        game.move_counter = position.move_counter;
        for (sq, piece) in position.pieces {
            if piece.royal {
                game.royals_left[piece.owner.index()] += 1;
            }
            game.board.squares[sq.index()] = Some(piece);
        }
        game.refresh_all();

        log::debug!("loaded position at move {}", game.move_counter);
        Ok(game)
    }

    /// Converts the game into a TSFEN string.
    pub fn to_tsfen(&self) -> String {
        tsfen::format(&self.board, self.move_counter)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn catalog(&self) -> &Arc<PieceCatalog> {
        &self.catalog
    }

    /// Returns the piece at the given square.
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.board.piece_at(sq)
    }

    /// Returns the piece at the given coordinates; `None` when off the board.
    pub fn piece_at_coords(&self, file: i16, rank: i16) -> Option<&Piece> {
        Square::from_coords(file, rank).and_then(|sq| self.piece_at(sq))
    }

    /// Returns every occupied square with its piece, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> {
        Square::iter().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn move_counter(&self) -> u32 {
        self.move_counter
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        Player::from_parity(self.move_counter)
    }

    /// Returns the applied moves, oldest first.
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns the number of royal pieces the player still has.
    pub fn royals_left(&self, p: Player) -> u32 {
        self.royals_left[p.index()]
    }

    /// Returns the squares of the player's royal pieces.
    pub fn royal_squares(&self, p: Player) -> Vec<Square> {
        self.pieces()
            .filter(|(_, piece)| piece.royal && piece.owner == p)
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Counts the pieces of a species owned by the player.
    pub fn count_pieces(&self, species: Species, owner: Player) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.species == species && piece.owner == owner)
            .count()
    }

    // =========================================================================
    // Moves and attacks
    // =========================================================================

    /// Returns the moves of the piece on `sq` if it belongs to the player to
    /// move, or nothing otherwise.
    pub fn moves_at(&self, sq: Square) -> &[Move] {
        match self.piece_at(sq) {
            Some(p) if p.owner == self.current_player() => &self.move_cache[sq.index()],
            _ => &[],
        }
    }

    /// Returns the cached moves of the piece on `sq` regardless of turn.
    pub fn moves_at_ignoring_turn(&self, sq: Square) -> &[Move] {
        &self.move_cache[sq.index()]
    }

    /// Returns every move of the player to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        let player = self.current_player();
        self.pieces()
            .filter(|(_, p)| p.owner == player)
            .flat_map(|(sq, _)| self.move_cache[sq.index()].iter().cloned())
            .collect()
    }

    /// Squares attacked by the piece on `sq`.
    pub fn attacked_by(&self, sq: Square) -> impl Iterator<Item = Square> + '_ {
        self.attacks.forwards(sq).iter().copied()
    }

    /// Squares holding pieces that attack `sq`.
    pub fn attackers_of(&self, sq: Square) -> impl Iterator<Item = Square> + '_ {
        self.attacks.backwards(sq).iter().copied()
    }

    /// Returns true if any piece of `p` attacks `sq`.
    pub fn is_attacked_by(&self, sq: Square, p: Player) -> bool {
        self.attackers_of(sq)
            .any(|from| self.piece_at(from).is_some_and(|piece| piece.owner == p))
    }

    pub fn attack_index(&self) -> &AttackIndex {
        &self.attacks
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Puts a piece on a square, or clears it with `None`.
    pub fn set_square(&mut self, sq: Square, piece: Option<Piece>) {
        if piece.is_some() && self.board.piece_at(sq).is_some() {
            self.put(sq, None);
        }
        self.put(sq, piece);
    }

    /// Same as [`Game::set_square`], addressed by raw coordinates.
    pub fn set_square_at(&mut self, file: i16, rank: i16, piece: Option<Piece>) -> Result<(), GameError> {
        let sq = Square::from_coords(file, rank).ok_or(GameError::OutOfBounds { file, rank })?;
        self.set_square(sq, piece);
        Ok(())
    }

    fn put(&mut self, sq: Square, piece: Option<Piece>) {
        if let Some(old) = self.board.squares[sq.index()].take() {
            if old.royal {
                self.royals_left[old.owner.index()] -= 1;
            }
        }
        if let Some(new) = &piece {
            if new.royal {
                self.royals_left[new.owner.index()] += 1;
            }
        }
        self.board.squares[sq.index()] = piece;

        let mut dirty: Vec<Square> = self.attacks.backwards(sq).iter().copied().collect();
        dirty.push(sq);
        for s in dirty {
            self.refresh(s);
        }
    }

    fn refresh(&mut self, sq: Square) {
        let (moves, attacks) = match self.board.piece_at(sq) {
            Some(piece) => piece.moves_and_attacks(sq, &self.board),
            None => (Vec::new(), Vec::new()),
        };
        self.move_cache[sq.index()] = moves;
        self.attacks.set_forwards(sq, attacks);
    }

    fn refresh_all(&mut self) {
        for sq in Square::iter() {
            self.refresh(sq);
        }
    }

    /// Applies a move.
    ///
    /// The mover promotes when it can and the end square or any intermediate
    /// step lies in its promotion zone. A range-capturing mover also removes
    /// everything strictly between start and end when both lie on a line.
    /// The move is not checked for legality.
    pub fn make_move(&mut self, mv: &Move) -> Result<(), GameError> {
        let moved = self
            .board
            .piece_at(mv.start)
            .cloned()
            .ok_or(GameError::NoPieceAtStart(mv.start))?;

        let placed = if moved.can_promote() && mv.touched_squares().any(|sq| sq.in_promotion_zone(moved.owner)) {
            moved.promote(&self.catalog)?
        } else {
            moved.clone()
        };

        let mut captured = Vec::new();
        if let Some(target) = self.board.piece_at(mv.end) {
            captured.push((mv.end, target.clone()));
        }
        self.set_square(mv.end, Some(placed.clone()));
        self.set_square(mv.start, None);

        if moved.range_capturing {
            let (df, dr) = mv.start.delta(mv.end);
            if Direction::of_line(moved.owner, df, dr).is_some() {
                let distance = df.abs().max(dr.abs());
                let between = (1..distance).filter_map(|i| mv.start.shift(df.signum() * i, dr.signum() * i));
                for sq in between.collect::<Vec<_>>() {
                    self.capture(sq, &mut captured);
                }
            }
        }

        for &sq in mv.intermediate_steps.iter().filter(|&&sq| sq != mv.end) {
            self.capture(sq, &mut captured);
        }

        self.move_counter += 1;
        let record = MoveRecord {
            mv: mv.clone(),
            moved,
            placed,
            captured,
        };
        log::debug!("move {}: {}", self.move_counter, record);
        self.history.push(record);

        Ok(())
    }

    fn capture(&mut self, sq: Square, captured: &mut Vec<(Square, Piece)>) {
        if let Some(piece) = self.board.piece_at(sq).cloned() {
            captured.push((sq, piece));
            self.set_square(sq, None);
        }
    }

    /// Undoes the last move.
    pub fn unmake_move(&mut self) -> Result<(), GameError> {
        let record = self.history.pop().ok_or(GameError::NoMoveToUndo)?;

        self.set_square(record.mv.end, None);
        for (sq, piece) in record.captured.into_iter().rev() {
            self.set_square(sq, Some(piece));
        }
        self.set_square(record.mv.start, Some(record.moved));
        self.move_counter -= 1;

        Ok(())
    }

    /// Makes `p` lose the game.
    pub fn resign(&mut self, p: Player) {
        if self.resigned.is_none() {
            log::info!("{p} resigned");
            self.resigned = Some(p);
        }
    }

    // =========================================================================
    // Game status
    // =========================================================================

    /// Returns whether the game goes on or who won.
    ///
    /// A player without royal pieces has lost; a resigned player has lost.
    /// Both sides without royals is an inconsistent position.
    pub fn status(&self) -> Result<GameStatus, GameError> {
        if let Some(p) = self.resigned {
            return Ok(GameStatus::Won(p.flip()));
        }

        match self.royals_left {
            [0, 0] => Err(GameError::InvalidGameState),
            [0, _] => Ok(GameStatus::Won(Player::Gote)),
            [_, 0] => Ok(GameStatus::Won(Player::Sente)),
            _ => Ok(GameStatus::Playing),
        }
    }
}

impl BoardView for Game {
    fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.board.piece_at(sq)
    }
}
