use std::fmt;
use std::sync::Arc;

use crate::catalog::{PieceCatalog, Species, SpeciesInfo};
use crate::core::error::GameError;
use crate::core::{Player, Square};
use crate::movegen;
use crate::movement::MovementDescriptor;
use crate::moves::Move;
use crate::traits::BoardView;

/// Represents a piece on the board.
///
/// A piece is an immutable value. Promotion produces a new piece; the
/// catalog data it needs during move generation is copied in at creation so
/// the hot path never consults the catalog.
///
/// Two pieces compare equal when species, owner, promotion state and the
/// species promoted from all match.
///
/// # Examples
///
/// ```
/// use taikyoku::{Piece, PieceCatalog, Player, Species};
///
/// let catalog = PieceCatalog::standard().unwrap();
/// let pawn = Piece::new(&catalog, Species::new("P").unwrap(), Player::Sente).unwrap();
/// assert!(pawn.can_promote());
///
/// let promoted = pawn.promote(&catalog).unwrap();
/// assert_eq!("GOG", promoted.species.as_str());
/// assert_eq!(Some(pawn.species), promoted.promoted_from);
/// assert!(promoted.promote(&catalog).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Piece {
    pub species: Species,
    pub promoted: bool,
    pub owner: Player,
    /// The species this piece had before promoting.
    pub promoted_from: Option<Species>,
    pub rank: u8,
    pub royal: bool,
    pub range_capturing: bool,
    pub promotion: Option<Species>,
    pub movement: Arc<MovementDescriptor>,
}

impl Piece {
    /// Creates an unpromoted piece of the given species.
    pub fn new(catalog: &PieceCatalog, species: Species, owner: Player) -> Result<Piece, GameError> {
        let info = catalog.info(species)?;
        Ok(Piece::from_info(info, owner, false, None))
    }

    fn from_info(info: &SpeciesInfo, owner: Player, promoted: bool, promoted_from: Option<Species>) -> Piece {
        Piece {
            species: info.species,
            promoted,
            owner,
            promoted_from,
            rank: info.rank,
            royal: info.royal,
            range_capturing: info.range_capturing,
            promotion: info.promotion,
            movement: Arc::clone(&info.movement),
        }
    }

    /// Returns true if the piece has not promoted yet and its species has a
    /// promotion target.
    pub fn can_promote(&self) -> bool {
        !self.promoted && self.promotion.is_some()
    }

    /// Returns the promoted form of this piece.
    pub fn promote(&self, catalog: &PieceCatalog) -> Result<Piece, GameError> {
        if self.promoted {
            return Err(GameError::InvalidPromotion {
                species: self.species.to_string(),
                reason: "already promoted",
            });
        }

        let target = self.promotion.ok_or_else(|| GameError::InvalidPromotion {
            species: self.species.to_string(),
            reason: "species has no promotion",
        })?;

        let info = catalog.info(target)?;
        Ok(Piece::from_info(info, self.owner, true, Some(self.species)))
    }

    /// Returns true if the piece may promote when a move touches `sq`.
    pub fn promotes_on(&self, sq: Square) -> bool {
        self.can_promote() && sq.in_promotion_zone(self.owner)
    }

    /// Generates every move of this piece standing on `from`, together with
    /// the squares it attacks.
    pub fn moves_and_attacks<B>(&self, from: Square, board: &B) -> (Vec<Move>, Vec<Square>)
    where
        B: BoardView + ?Sized,
    {
        movegen::moves_and_attacks(self, from, board)
    }

    /// Returns the code written in TSFEN: lower-case for Sente.
    pub fn tsfen_code(&self) -> String {
        match self.owner {
            Player::Sente => self.species.to_lowercase(),
            Player::Gote => self.species.to_string(),
        }
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species
            && self.promoted == other.promoted
            && self.owner == other.owner
            && self.promoted_from == other.promoted_from
    }
}

impl Eq for Piece {}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.tsfen_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(code: &str) -> Species {
        Species::new(code).unwrap()
    }

    #[test]
    fn memoizes_catalog_data() {
        let catalog = PieceCatalog::standard().unwrap();
        let gg = Piece::new(&catalog, sp("GG"), Player::Gote).unwrap();
        assert_eq!(3, gg.rank);
        assert!(gg.range_capturing);
        assert!(!gg.royal);
        assert!(!gg.can_promote());

        let king = Piece::new(&catalog, sp("K"), Player::Sente).unwrap();
        assert!(king.royal);
    }

    #[test]
    fn promotion() {
        let catalog = PieceCatalog::standard().unwrap();
        let prince = Piece::new(&catalog, sp("CP"), Player::Gote).unwrap();
        let king = prince.promote(&catalog).unwrap();
        assert_eq!(sp("K"), king.species);
        assert!(king.promoted);
        assert!(king.royal);
        assert_eq!(Player::Gote, king.owner);
        assert_ne!(Piece::new(&catalog, sp("K"), Player::Gote).unwrap(), king);

        // both promote to a gold general, but remember where they came from
        let from_pawn = Piece::new(&catalog, sp("P"), Player::Sente).unwrap().promote(&catalog).unwrap();
        let from_knight = Piece::new(&catalog, sp("N"), Player::Sente).unwrap().promote(&catalog).unwrap();
        assert_eq!(from_pawn.species, from_knight.species);
        assert_ne!(from_pawn, from_knight);
        assert_eq!(from_pawn, Piece::new(&catalog, sp("P"), Player::Sente).unwrap().promote(&catalog).unwrap());

        let err = king.promote(&catalog).unwrap_err();
        assert_eq!(
            GameError::InvalidPromotion {
                species: "K".to_string(),
                reason: "already promoted"
            },
            err
        );

        let gg = Piece::new(&catalog, sp("GG"), Player::Gote).unwrap();
        assert!(matches!(gg.promote(&catalog), Err(GameError::InvalidPromotion { .. })));
    }

    #[test]
    fn unknown_species() {
        let catalog = PieceCatalog::standard().unwrap();
        assert_eq!(
            Err(GameError::UnknownSpecies("ZZZ".to_string())),
            Piece::new(&catalog, sp("ZZZ"), Player::Sente)
        );
    }

    #[test]
    fn promotes_on() {
        let catalog = PieceCatalog::standard().unwrap();
        let pawn = Piece::new(&catalog, sp("P"), Player::Sente).unwrap();
        assert!(pawn.promotes_on(Square::new(4, 10).unwrap()));
        assert!(!pawn.promotes_on(Square::new(4, 11).unwrap()));
        assert!(!pawn.promotes_on(Square::new(4, 30).unwrap()));
    }

    #[test]
    fn display() {
        let catalog = PieceCatalog::standard().unwrap();
        assert_eq!("fid", Piece::new(&catalog, sp("FID"), Player::Sente).unwrap().to_string());
        assert_eq!("FID", Piece::new(&catalog, sp("FID"), Player::Gote).unwrap().to_string());
    }
}
