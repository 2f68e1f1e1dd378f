use std::fmt;
use std::iter;

use serde::{Deserialize, Serialize};

/// Represents each side of the game.
///
/// `Sente` moves first and advances toward rank 0. `Gote` moves second and
/// advances toward the last rank.
///
/// # Examples
///
/// ```
/// use taikyoku::Player;
///
/// assert_eq!(Player::Gote, Player::Sente.flip());
/// assert_eq!(1, Player::Gote.index());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    Sente,
    Gote,
}

impl Player {
    /// Returns an iterator of both players, Sente first.
    pub fn iter() -> PlayerIter {
        PlayerIter {
            current: Some(Player::Sente),
        }
    }

    /// Returns the player matching a move counter parity.
    pub fn from_parity(counter: u32) -> Player {
        if counter % 2 == 0 {
            Player::Sente
        } else {
            Player::Gote
        }
    }

    /// Returns the player with the given protocol index (0 or 1).
    pub fn from_index(index: usize) -> Option<Player> {
        match index {
            0 => Some(Player::Sente),
            1 => Some(Player::Gote),
            _ => None,
        }
    }

    /// Converts the instance into the unique number for array indexing purpose.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Flips the player.
    #[must_use]
    pub fn flip(self) -> Player {
        match self {
            Player::Sente => Player::Gote,
            Player::Gote => Player::Sente,
        }
    }

    /// Vertical sign of this player's forward direction in board coordinates.
    #[inline(always)]
    pub fn forward_sign(self) -> i8 {
        match self {
            Player::Sente => -1,
            Player::Gote => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::Sente => write!(f, "sente"),
            Player::Gote => write!(f, "gote"),
        }
    }
}

/// This struct is created by the [`Player::iter()`] method.
pub struct PlayerIter {
    current: Option<Player>,
}

impl iter::Iterator for PlayerIter {
    type Item = Player;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current;

        if let Some(current) = self.current {
            self.current = match current {
                Player::Sente => Some(Player::Gote),
                Player::Gote => None,
            };
        }

        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip() {
        assert_eq!(Player::Gote, Player::Sente.flip());
        assert_eq!(Player::Sente, Player::Gote.flip());
    }

    #[test]
    fn parity() {
        assert_eq!(Player::Sente, Player::from_parity(0));
        assert_eq!(Player::Gote, Player::from_parity(1));
        assert_eq!(Player::Sente, Player::from_parity(36));
    }

    #[test]
    fn iter() {
        let players: Vec<_> = Player::iter().collect();
        assert_eq!(vec![Player::Sente, Player::Gote], players);
    }

    #[test]
    fn from_index() {
        assert_eq!(Some(Player::Sente), Player::from_index(0));
        assert_eq!(Some(Player::Gote), Player::from_index(1));
        assert_eq!(None, Player::from_index(2));
    }
}
