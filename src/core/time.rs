use std::time::Duration;

use super::color::Player;

/// Represents the clock of a match.
///
/// [Byo-yomi](https://en.wikipedia.org/wiki/Time_control#Byo-yomi) and
/// [Fischer Clock](https://en.wikipedia.org/wiki/Time_control#Increment_and_delay_methods)
/// are supported. The protocol host charges the mover after every accepted
/// move.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taikyoku::{Player, TimeControl};
///
/// let mut fischer = TimeControl::fischer(Duration::from_secs(10), Duration::from_secs(1));
///
/// // Sente gets the 1 second increment back after moving.
/// fischer.consume(Player::Sente, Duration::from_secs(3));
/// assert_eq!(Duration::from_secs(8), fischer.sente_time());
/// assert_eq!(Duration::from_secs(10), fischer.gote_time());
/// ```
///
/// ```
/// use std::time::Duration;
/// use taikyoku::{Player, TimeControl};
///
/// let mut byoyomi = TimeControl::Byoyomi {
///     sente_time: Duration::from_secs(10),
///     gote_time: Duration::from_secs(10),
///     byoyomi: Duration::from_secs(5),
/// };
///
/// // A move may use up the main time plus one byoyomi period.
/// assert!(byoyomi.consume(Player::Sente, Duration::from_secs(12)));
/// assert_eq!(Duration::ZERO, byoyomi.sente_time());
///
/// assert!(byoyomi.consume(Player::Sente, Duration::from_secs(5)));
/// assert!(!byoyomi.consume(Player::Sente, Duration::from_secs(6)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeControl {
    /// `sente_time` and `gote_time` hold the main time. Once it runs out,
    /// every move must be made within `byoyomi`.
    Byoyomi {
        sente_time: Duration,
        gote_time: Duration,
        byoyomi: Duration,
    },
    FischerClock {
        sente_time: Duration,
        gote_time: Duration,
        sente_inc: Duration,
        gote_inc: Duration,
    },
}

impl Default for TimeControl {
    /// Ten minutes each with a ten second increment.
    fn default() -> Self {
        TimeControl::fischer(Duration::from_secs(600), Duration::from_secs(10))
    }
}

impl TimeControl {
    /// Creates a symmetric Fischer clock.
    pub fn fischer(initial: Duration, increment: Duration) -> TimeControl {
        TimeControl::FischerClock {
            sente_time: initial,
            gote_time: initial,
            sente_inc: increment,
            gote_inc: increment,
        }
    }

    pub fn sente_time(&self) -> Duration {
        match *self {
            TimeControl::Byoyomi { sente_time, .. } => sente_time,
            TimeControl::FischerClock { sente_time, .. } => sente_time,
        }
    }

    pub fn gote_time(&self) -> Duration {
        match *self {
            TimeControl::Byoyomi { gote_time, .. } => gote_time,
            TimeControl::FischerClock { gote_time, .. } => gote_time,
        }
    }

    /// Returns the remaining time of the given player.
    pub fn remaining(&self, p: Player) -> Duration {
        match p {
            Player::Sente => self.sente_time(),
            Player::Gote => self.gote_time(),
        }
    }

    /// Returns the time credited to the player after each move: the Fischer
    /// increment, or the byoyomi period.
    pub fn increment(&self, p: Player) -> Duration {
        match (*self, p) {
            (TimeControl::Byoyomi { byoyomi, .. }, _) => byoyomi,
            (TimeControl::FischerClock { sente_inc, .. }, Player::Sente) => sente_inc,
            (TimeControl::FischerClock { gote_inc, .. }, Player::Gote) => gote_inc,
        }
    }

    pub fn byoyomi(&self) -> Option<Duration> {
        match *self {
            TimeControl::Byoyomi { byoyomi, .. } => Some(byoyomi),
            _ => None,
        }
    }

    /// Charges `d` to the given player.
    ///
    /// Returns false if the player ran out of time, true otherwise.
    pub fn consume(&mut self, p: Player, d: Duration) -> bool {
        match self {
            TimeControl::Byoyomi {
                sente_time,
                gote_time,
                byoyomi,
            } => {
                let remaining = match p {
                    Player::Sente => sente_time,
                    Player::Gote => gote_time,
                };
                // the byoyomi period is renewed on every move
                if d > *remaining + *byoyomi {
                    return false;
                }
                *remaining = remaining.saturating_sub(d);
            }
            TimeControl::FischerClock {
                sente_time,
                gote_time,
                sente_inc,
                gote_inc,
            } => {
                let (remaining, inc) = match p {
                    Player::Sente => (sente_time, *sente_inc),
                    Player::Gote => (gote_time, *gote_inc),
                };
                match (*remaining + inc).checked_sub(d) {
                    Some(left) => *remaining = left,
                    None => return false,
                }
            }
        }

        true
    }
}
