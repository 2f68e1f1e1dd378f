use std::fmt;

use serde::{Deserialize, Serialize};

use super::color::Player;

/// A relative offset in the piece owner's frame: `dx` grows to the owner's
/// right and `dy` grows forward.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i8,
    pub dy: i8,
}

impl Offset {
    pub const fn new(dx: i8, dy: i8) -> Self {
        Offset { dx, dy }
    }

    /// Converts the owner-relative offset into absolute board coordinates.
    ///
    /// Gote's frame is Sente's mirrored about the horizontal axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use taikyoku::{Offset, Player};
    ///
    /// let knight = Offset::new(1, 2);
    /// assert_eq!((1, -2), knight.to_absolute(Player::Sente));
    /// assert_eq!((1, 2), knight.to_absolute(Player::Gote));
    /// ```
    #[inline]
    pub fn to_absolute(self, owner: Player) -> (i16, i16) {
        (self.dx as i16, self.dy as i16 * owner.forward_sign() as i16)
    }

    /// Converts an absolute board delta into the owner's frame.
    #[inline]
    pub fn from_absolute(owner: Player, df: i16, dr: i16) -> (i16, i16) {
        (df, dr * owner.forward_sign() as i16)
    }

    /// Returns the compass direction pointed to by the signs of this offset.
    pub fn direction(self) -> Option<Direction> {
        Direction::from_signs(self.dx.signum(), self.dy.signum())
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.dx, self.dy)
    }
}

/// One of the eight compass directions, in the piece owner's frame.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    F,
    FR,
    R,
    BR,
    B,
    BL,
    L,
    FL,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::F,
        Direction::FR,
        Direction::R,
        Direction::BR,
        Direction::B,
        Direction::BL,
        Direction::L,
        Direction::FL,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [Direction::F, Direction::R, Direction::B, Direction::L];

    pub const DIAGONAL: [Direction; 4] = [Direction::FR, Direction::BR, Direction::BL, Direction::FL];

    /// Unit step of this direction in the owner's frame.
    pub fn unit(self) -> Offset {
        match self {
            Direction::F => Offset::new(0, 1),
            Direction::FR => Offset::new(1, 1),
            Direction::R => Offset::new(1, 0),
            Direction::BR => Offset::new(1, -1),
            Direction::B => Offset::new(0, -1),
            Direction::BL => Offset::new(-1, -1),
            Direction::L => Offset::new(-1, 0),
            Direction::FL => Offset::new(-1, 1),
        }
    }

    /// Looks up the direction with the given unit components.
    pub fn from_signs(dx: i8, dy: i8) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| d.unit() == Offset::new(dx, dy))
    }

    /// Parses the upper-case direction names used in arrow sets (`F`, `FR`, ...).
    pub fn from_name(name: &str) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::F => "F",
            Direction::FR => "FR",
            Direction::R => "R",
            Direction::BR => "BR",
            Direction::B => "B",
            Direction::BL => "BL",
            Direction::L => "L",
            Direction::FL => "FL",
        }
    }

    pub fn is_orthogonal(self) -> bool {
        Direction::ORTHOGONAL.contains(&self)
    }

    /// Returns true when the two directions are at right angles.
    pub fn is_perpendicular_to(self, other: Direction) -> bool {
        let (a, b) = (self.unit(), other.unit());
        a.dx * b.dx + a.dy * b.dy == 0
    }

    /// Returns the direction of an absolute board delta as seen by `owner`,
    /// if the delta lies on a rank, file or diagonal.
    pub fn of_line(owner: Player, df: i16, dr: i16) -> Option<Direction> {
        if (df, dr) == (0, 0) || !(df == 0 || dr == 0 || df.abs() == dr.abs()) {
            return None;
        }
        let (dx, dy) = Offset::from_absolute(owner, df, dr);
        Direction::from_signs(dx.signum() as i8, dy.signum() as i8)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
