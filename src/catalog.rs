//! Species metadata.
//!
//! A [`PieceCatalog`] is an immutable table from [`Species`] to everything
//! the engine needs to know about it: compiled movement, promotion target,
//! capture rank and the royal / range-capturing flags. It is built once and
//! shared by reference (usually through an `Arc`) with every [`Piece`] and
//! [`Game`], so independent catalogs can coexist.
//!
//! [`Piece`]: crate::Piece
//! [`Game`]: crate::Game

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{CatalogError, GameError};
use crate::movement::{self, MovementDescriptor};

const MAX_CODE_LEN: usize = 4;

const STANDARD_PIECES: &str = include_str!("../data/pieces.json");

/// A piece species code such as `K`, `GG` or `FLG`.
///
/// Codes are 1 to 4 upper-case ASCII letters and are `Copy`, so pieces can
/// carry them without allocation.
///
/// # Examples
///
/// ```
/// use taikyoku::Species;
///
/// let gg: Species = "GG".parse().unwrap();
/// assert_eq!("GG", gg.as_str());
/// assert_eq!("gg", gg.to_lowercase());
/// assert!(Species::new("gg").is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Species {
    code: [u8; MAX_CODE_LEN],
    len: u8,
}

impl Species {
    /// Creates a species code, returning `None` unless `code` is 1-4
    /// upper-case ASCII letters.
    pub fn new(code: &str) -> Option<Species> {
        let bytes = code.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_CODE_LEN || !bytes.iter().all(u8::is_ascii_uppercase) {
            return None;
        }

        let mut buf = [0u8; MAX_CODE_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);
        Some(Species {
            code: buf,
            len: bytes.len() as u8,
        })
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.code[..self.len as usize]).unwrap_or_default()
    }

    /// Returns the code as written for Sente in TSFEN.
    pub fn to_lowercase(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Species {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Species({})", self.as_str())
    }
}

impl FromStr for Species {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::new(s).ok_or_else(|| CatalogError::InvalidCode(s.to_string()))
    }
}

impl TryFrom<String> for Species {
    type Error = CatalogError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Species> for String {
    fn from(s: Species) -> String {
        s.as_str().to_string()
    }
}

/// One row of catalog source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceEntry {
    pub code: String,
    pub name: String,
    /// Movement in extended Betza notation.
    pub movement: String,
    /// Promotion target; absent or `"-"` when the species does not promote.
    #[serde(default)]
    pub promotion: Option<String>,
    #[serde(default)]
    pub rank: u8,
    #[serde(default)]
    pub royal: bool,
    #[serde(default)]
    pub range_capturing: bool,
}

/// Compiled metadata of one species.
#[derive(Debug, Clone)]
pub struct SpeciesInfo {
    pub species: Species,
    pub name: String,
    pub notation: String,
    pub movement: Arc<MovementDescriptor>,
    pub promotion: Option<Species>,
    /// Capture priority for range-capturing slides; 0 for ordinary pieces.
    pub rank: u8,
    pub royal: bool,
    pub range_capturing: bool,
}

/// Immutable table of species metadata.
#[derive(Debug, Clone, Default)]
pub struct PieceCatalog {
    species: FxHashMap<Species, SpeciesInfo>,
    order: Vec<Species>,
}

impl PieceCatalog {
    /// Builds a catalog from source rows, compiling every movement notation.
    ///
    /// Fails on malformed codes, duplicate species, notation errors and
    /// promotions to species missing from the table.
    pub fn from_entries<I>(entries: I) -> Result<PieceCatalog, CatalogError>
    where
        I: IntoIterator<Item = PieceEntry>,
    {
        let mut catalog = PieceCatalog::default();
        let mut promotions = Vec::new();

        for entry in entries {
            let species: Species = entry.code.parse()?;
            if catalog.species.contains_key(&species) {
                return Err(CatalogError::DuplicateSpecies(entry.code));
            }

            let movement = movement::parse(&entry.movement).map_err(|source| CatalogError::Notation {
                species: entry.code.clone(),
                source,
            })?;

            let promotion = match entry.promotion.as_deref() {
                None | Some("-") | Some("") => None,
                Some(target) => {
                    let target = Species::new(target).ok_or_else(|| CatalogError::UnknownPromotion {
                        species: entry.code.clone(),
                        target: target.to_string(),
                    })?;
                    promotions.push((species, target));
                    Some(target)
                }
            };

            catalog.order.push(species);
            catalog.species.insert(
                species,
                SpeciesInfo {
                    species,
                    name: entry.name,
                    notation: entry.movement,
                    movement: Arc::new(movement),
                    promotion,
                    rank: entry.rank,
                    royal: entry.royal,
                    range_capturing: entry.range_capturing,
                },
            );
        }

        for (species, target) in promotions {
            if !catalog.species.contains_key(&target) {
                return Err(CatalogError::UnknownPromotion {
                    species: species.to_string(),
                    target: target.to_string(),
                });
            }
        }

        log::debug!("built piece catalog with {} species", catalog.len());
        Ok(catalog)
    }

    /// Builds a catalog from a JSON array of [`PieceEntry`] objects.
    pub fn from_json(json: &str) -> Result<PieceCatalog, CatalogError> {
        let entries: Vec<PieceEntry> = serde_json::from_str(json)?;
        PieceCatalog::from_entries(entries)
    }

    /// Builds the catalog bundled with the crate.
    ///
    /// The bundled table is a sample of 35 species covering every movement
    /// kind (steps, slides, leaps, flying slides, compound moves, triple
    /// arrows), not the full Taikyoku roster. Use [`PieceCatalog::from_json`]
    /// to load a complete table.
    ///
    /// # Examples
    ///
    /// ```
    /// use taikyoku::{PieceCatalog, Species};
    ///
    /// let catalog = PieceCatalog::standard().unwrap();
    /// let king = catalog.get(Species::new("K").unwrap()).unwrap();
    /// assert!(king.royal);
    /// assert_eq!(4, king.rank);
    /// ```
    pub fn standard() -> Result<PieceCatalog, CatalogError> {
        PieceCatalog::from_json(STANDARD_PIECES)
    }

    pub fn get(&self, species: Species) -> Option<&SpeciesInfo> {
        self.species.get(&species)
    }

    /// Looks a species up, failing with [`GameError::UnknownSpecies`].
    pub fn info(&self, species: Species) -> Result<&SpeciesInfo, GameError> {
        self.get(species)
            .ok_or_else(|| GameError::UnknownSpecies(species.to_string()))
    }

    pub fn contains(&self, species: Species) -> bool {
        self.species.contains_key(&species)
    }

    /// Returns the species in table order.
    pub fn iter(&self) -> impl Iterator<Item = &SpeciesInfo> {
        self.order.iter().filter_map(|s| self.species.get(s))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the species that promote into `species`, in table order.
    pub fn promotion_sources(&self, species: Species) -> Vec<Species> {
        self.iter()
            .filter(|info| info.promotion == Some(species))
            .map(|info| info.species)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(code: &str) -> Species {
        Species::new(code).unwrap()
    }

    fn entry(code: &str, movement: &str, promotion: Option<&str>) -> PieceEntry {
        PieceEntry {
            code: code.to_string(),
            name: code.to_string(),
            movement: movement.to_string(),
            promotion: promotion.map(str::to_string),
            rank: 0,
            royal: false,
            range_capturing: false,
        }
    }

    #[test]
    fn species_codes() {
        let ok_cases = ["K", "GG", "FLG", "ABCD"];
        let ng_cases = ["", "k", "Gg", "ABCDE", "G1", "G G"];

        for case in ok_cases.iter() {
            assert_eq!(*case, sp(case).as_str());
        }
        for case in ng_cases.iter() {
            assert!(Species::new(case).is_none(), "{case} should be rejected");
        }
    }

    #[test]
    fn standard_catalog() {
        let catalog = PieceCatalog::standard().unwrap();
        assert!(!catalog.is_empty());

        let ranked = [("K", 4), ("CP", 4), ("GG", 3), ("VG", 2), ("FLG", 1), ("AG", 1), ("FID", 1), ("FCR", 1)];
        for (code, rank) in ranked {
            assert_eq!(rank, catalog.get(sp(code)).unwrap().rank, "{code}");
        }
        assert_eq!(0, catalog.get(sp("P")).unwrap().rank);

        let range_capturing: Vec<_> = catalog
            .iter()
            .filter(|info| info.range_capturing)
            .map(|info| info.species.to_string())
            .collect();
        assert_eq!(vec!["GG", "VG", "FLG", "AG", "FID", "FCR"], range_capturing);

        let royals: Vec<_> = catalog.iter().filter(|i| i.royal).map(|i| i.species.to_string()).collect();
        assert_eq!(vec!["K", "CP"], royals);
    }

    #[test]
    fn every_standard_species_moves() {
        let catalog = PieceCatalog::standard().unwrap();
        for info in catalog.iter() {
            assert!(!info.movement.is_empty(), "{} cannot move", info.species);
        }
    }

    #[test]
    fn promotion_sources() {
        let catalog = PieceCatalog::standard().unwrap();
        assert_eq!(vec![sp("N"), sp("P")], catalog.promotion_sources(sp("GOG")));
        assert_eq!(vec![sp("CP")], catalog.promotion_sources(sp("K")));
        assert!(catalog.promotion_sources(sp("P")).is_empty());
    }

    #[test]
    fn rejects_bad_tables() {
        let dup = PieceCatalog::from_entries(vec![entry("P", "fW", None), entry("P", "fW", None)]);
        assert!(matches!(dup, Err(CatalogError::DuplicateSpecies(_))));

        let dangling = PieceCatalog::from_entries(vec![entry("P", "fW", Some("T"))]);
        assert!(matches!(dangling, Err(CatalogError::UnknownPromotion { .. })));

        let bad_notation = PieceCatalog::from_entries(vec![entry("P", "fX", None)]);
        match bad_notation {
            Err(CatalogError::Notation { species, .. }) => assert_eq!("P", species),
            other => panic!("expected a notation error, got {other:?}"),
        }

        let bad_code = PieceCatalog::from_entries(vec![entry("p", "fW", None)]);
        assert!(matches!(bad_code, Err(CatalogError::InvalidCode(_))));

        assert!(matches!(PieceCatalog::from_json("{"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn dash_means_no_promotion() {
        let catalog = PieceCatalog::from_entries(vec![entry("P", "fW", Some("-"))]).unwrap();
        assert_eq!(None, catalog.get(sp("P")).unwrap().promotion);
    }

    #[test]
    fn json_defaults() {
        let catalog = PieceCatalog::from_json(r#"[{"code": "P", "name": "Pawn", "movement": "fW"}]"#).unwrap();
        let pawn = catalog.get(sp("P")).unwrap();
        assert_eq!(0, pawn.rank);
        assert!(!pawn.royal);
        assert!(!pawn.range_capturing);
        assert_eq!(None, pawn.promotion);
    }
}
