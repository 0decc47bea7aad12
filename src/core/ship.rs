//! Ship types and deployed ships.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::core::config::FLEET;
use crate::core::coordinate::Coordinate;

/// One of the five fixed kinds of ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipType {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipType {
    /// Number of cells a ship of this type occupies.
    pub const fn length(self) -> usize {
        match self {
            ShipType::Carrier => 5,
            ShipType::Battleship => 4,
            ShipType::Cruiser => 3,
            ShipType::Submarine => 3,
            ShipType::Destroyer => 2,
        }
    }

    /// Display name, also the canonical wire name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipType::Carrier => "Carrier",
            ShipType::Battleship => "Battleship",
            ShipType::Cruiser => "Cruiser",
            ShipType::Submarine => "Submarine",
            ShipType::Destroyer => "Destroyer",
        }
    }

    /// Look a type up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        FLEET
            .iter()
            .copied()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a name matches none of the five ship types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShipType;

impl FromStr for ShipType {
    type Err = UnknownShipType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(UnknownShipType)
    }
}

/// A deployed ship: its type and the cells it covers.
///
/// The coordinate list is fixed at deployment; hits are recorded on the
/// owning [`Board`](crate::core::board::Board), not on the ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    coordinates: Vec<Coordinate>,
}

impl Ship {
    pub(crate) fn new(ship_type: ShipType, coordinates: Vec<Coordinate>) -> Self {
        Self {
            ship_type,
            coordinates,
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}
