//! Domain types for observations and actions.
//!
//! The engine exchanges typed records with the host instead of positional
//! integer lists: the host builds observations from what the agent can see,
//! and receives a [`MoveAction`] or [`ShootAction`] back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the game board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Compass direction of the wind, parsed from the host's label set.
///
/// The basic variant only observes the four cardinal directions; the advanced
/// variant adds the intercardinals. Labels outside the closed set parse to
/// [`WindDirection::Unknown`], which encodes to a sentinel index outside every
/// table axis — the host is expected to never feed such a state back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindDirection {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Unknown,
}

impl WindDirection {
    /// Parse a wind label as supplied by the host ("N", "S", ..., "SW").
    pub fn from_label(label: &str) -> Self {
        match label {
            "N" => Self::North,
            "S" => Self::South,
            "E" => Self::East,
            "W" => Self::West,
            "NE" => Self::NorthEast,
            "NW" => Self::NorthWest,
            "SE" => Self::SouthEast,
            "SW" => Self::SouthWest,
            _ => Self::Unknown,
        }
    }
}

/// Wind observation: direction plus integer strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wind {
    pub direction: WindDirection,
    pub strength: usize,
}

impl Wind {
    pub fn new(direction: WindDirection, strength: usize) -> Self {
        Self {
            direction,
            strength,
        }
    }
}

/// The three shell types the advanced variant tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmmoType {
    Light,
    Medium,
    Heavy,
}

impl AmmoType {
    pub const ALL: [AmmoType; 3] = [AmmoType::Light, AmmoType::Medium, AmmoType::Heavy];

    /// Index of this type within the ammo axes of the shoot table.
    pub fn index(self) -> usize {
        match self {
            AmmoType::Light => 0,
            AmmoType::Medium => 1,
            AmmoType::Heavy => 2,
        }
    }
}

/// Remaining shell counts per type, in [`AmmoType::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoStock([usize; 3]);

impl AmmoStock {
    pub fn new(light: usize, medium: usize, heavy: usize) -> Self {
        Self([light, medium, heavy])
    }

    pub fn count(&self, ammo: AmmoType) -> usize {
        self.0[ammo.index()]
    }

    /// Types with at least one shell left, in declaration order.
    pub fn available(&self) -> impl Iterator<Item = AmmoType> + '_ {
        AmmoType::ALL
            .into_iter()
            .filter(|ammo| self.count(*ammo) > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&count| count == 0)
    }

    /// Stock after firing one shell of `ammo`, floored at zero.
    pub fn consume(&self, ammo: AmmoType) -> Self {
        let mut counts = self.0;
        counts[ammo.index()] = counts[ammo.index()].saturating_sub(1);
        Self(counts)
    }

    pub fn counts(&self) -> [usize; 3] {
        self.0
    }
}

/// What the agent perceives when deciding where to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveObservation {
    pub position: GridPos,
    pub fuel: usize,
}

/// What the agent perceives when deciding where to shoot.
///
/// The basic variant ignores `enemy` and `ammo`; its reduced encoding only
/// covers own position and wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootObservation {
    pub position: GridPos,
    pub enemy: GridPos,
    pub wind: Wind,
    pub ammo: AmmoStock,
}

/// Chosen movement: drive to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAction {
    pub target: GridPos,
}

/// Chosen shot: fire at `target`, with the shell type in the advanced
/// variant (`ammo` is `None` under the basic variant's reduced action space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootAction {
    pub target: GridPos,
    pub ammo: Option<AmmoType>,
}
