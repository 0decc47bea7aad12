//! Fleet deployment: placement requests, validation, and random fleets.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use rand::Rng;

use crate::core::bitboard::CellMask;
use crate::core::config::{BOARD_SIZE, FLEET, NUM_SHIPS};
use crate::core::coordinate::{Coordinate, CoordinateError};
use crate::core::ship::{Ship, ShipType};

/// Why a proposed fleet was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum DeploymentError {
    #[error("unknown ship type {0:?}")]
    UnknownShipType(String),
    #[error("ship type {0} deployed more than once")]
    DuplicateShipType(ShipType),
    #[error("ship type {0} is missing from the fleet")]
    MissingShipType(ShipType),
    #[error("{ship_type} needs {expected} cells, got {actual}")]
    WrongLength {
        ship_type: ShipType,
        expected: usize,
        actual: usize,
    },
    #[error("{0} is not placed on consecutive cells of one row or column")]
    NotContiguous(ShipType),
    #[error("{ship_type} has cell (row {row}, column {column}) outside the board")]
    OutOfBounds {
        ship_type: ShipType,
        row: usize,
        column: usize,
    },
    #[error("more than one ship claims {0}")]
    Overlap(Coordinate),
    #[error("bad coordinate for {ship_type}: {source}")]
    InvalidCoordinate {
        ship_type: String,
        source: CoordinateError,
    },
}

/// One ship of a proposed fleet, as requested by a player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    pub ship_type: String,
    pub coordinates: Vec<Coordinate>,
}

impl ShipPlacement {
    pub fn new(ship_type: impl Into<String>, coordinates: Vec<Coordinate>) -> Self {
        Self {
            ship_type: ship_type.into(),
            coordinates,
        }
    }

    /// Decode a placement given as coordinate labels.
    pub fn from_labels<S: AsRef<str>>(
        ship_type: impl Into<String>,
        labels: &[S],
    ) -> Result<Self, DeploymentError> {
        let ship_type = ship_type.into();
        let coordinates = labels
            .iter()
            .map(|label| Coordinate::decode(label.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| DeploymentError::InvalidCoordinate {
                ship_type: ship_type.clone(),
                source,
            })?;
        Ok(Self {
            ship_type,
            coordinates,
        })
    }

    /// The coordinates as canonical labels.
    pub fn labels(&self) -> Vec<String> {
        self.coordinates.iter().map(|c| c.to_string()).collect()
    }
}

/// A fleet that passed [`FleetValidator::validate`]. Only the validator
/// can produce one, so boards are never built from unchecked input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFleet {
    ships: Vec<Ship>,
}

impl ValidatedFleet {
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn into_ships(self) -> Vec<Ship> {
        self.ships
    }
}

/// Checks a proposed fleet against the classic layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct FleetValidator;

impl FleetValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate `placements`, reporting the first failure in check order:
    /// ship types, lengths, contiguity, bounds, then overlap.
    pub fn validate(
        &self,
        placements: &[ShipPlacement],
    ) -> Result<ValidatedFleet, DeploymentError> {
        let types = Self::check_types(placements)?;

        for (placement, &ship_type) in placements.iter().zip(&types) {
            if placement.coordinates.len() != ship_type.length() {
                return Err(DeploymentError::WrongLength {
                    ship_type,
                    expected: ship_type.length(),
                    actual: placement.coordinates.len(),
                });
            }
        }

        for (placement, &ship_type) in placements.iter().zip(&types) {
            if !is_contiguous(&placement.coordinates) {
                return Err(DeploymentError::NotContiguous(ship_type));
            }
        }

        for (placement, &ship_type) in placements.iter().zip(&types) {
            if let Some(coord) = placement.coordinates.iter().find(|c| !c.in_bounds()) {
                return Err(DeploymentError::OutOfBounds {
                    ship_type,
                    row: coord.row(),
                    column: coord.column(),
                });
            }
        }

        let mut claimed = CellMask::new();
        for placement in placements {
            for &coord in &placement.coordinates {
                let fresh = claimed
                    .insert(coord)
                    .map_err(|_| DeploymentError::Overlap(coord))?;
                if !fresh {
                    return Err(DeploymentError::Overlap(coord));
                }
            }
        }

        let ships = placements
            .iter()
            .zip(types)
            .map(|(placement, ship_type)| Ship::new(ship_type, placement.coordinates.clone()))
            .collect();
        Ok(ValidatedFleet { ships })
    }

    fn check_types(placements: &[ShipPlacement]) -> Result<Vec<ShipType>, DeploymentError> {
        let mut seen = [false; NUM_SHIPS];
        let mut types = Vec::with_capacity(placements.len());
        for placement in placements {
            let ship_type = ShipType::from_name(&placement.ship_type)
                .ok_or_else(|| DeploymentError::UnknownShipType(placement.ship_type.clone()))?;
            let slot = ship_type as usize;
            if seen[slot] {
                return Err(DeploymentError::DuplicateShipType(ship_type));
            }
            seen[slot] = true;
            types.push(ship_type);
        }
        if let Some(missing) = FLEET.iter().zip(seen).find(|(_, present)| !present) {
            return Err(DeploymentError::MissingShipType(*missing.0));
        }
        Ok(types)
    }
}

/// Same row with consecutive columns, or same column with consecutive rows.
/// Order of the input does not matter; repeated cells are not contiguous.
fn is_contiguous(coords: &[Coordinate]) -> bool {
    let Some(first) = coords.first() else {
        return false;
    };
    let mut line: Vec<usize> = if coords.iter().all(|c| c.row() == first.row()) {
        coords.iter().map(|c| c.column()).collect()
    } else if coords.iter().all(|c| c.column() == first.column()) {
        coords.iter().map(|c| c.row()).collect()
    } else {
        return false;
    };
    line.sort_unstable();
    line.windows(2).all(|w| w[0].checked_add(1) == Some(w[1]))
}

/// Place the whole fleet at random without overlaps.
pub fn random_fleet<R: Rng + ?Sized>(rng: &mut R) -> Vec<ShipPlacement> {
    loop {
        if let Some(fleet) = try_random_fleet(rng) {
            return fleet;
        }
    }
}

fn try_random_fleet<R: Rng + ?Sized>(rng: &mut R) -> Option<Vec<ShipPlacement>> {
    let mut occupied = CellMask::new();
    let mut fleet = Vec::with_capacity(FLEET.len());
    for ship_type in FLEET {
        let len = ship_type.length();
        let mut placed = false;
        for _ in 0..100 {
            let horizontal: bool = rng.random();
            let (max_row, max_col) = if horizontal {
                (BOARD_SIZE - 1, BOARD_SIZE - len)
            } else {
                (BOARD_SIZE - len, BOARD_SIZE - 1)
            };
            let row = rng.random_range(0..=max_row);
            let col = rng.random_range(0..=max_col);
            let coords: Vec<Coordinate> = (0..len)
                .map(|k| {
                    if horizontal {
                        Coordinate::new(row, col + k)
                    } else {
                        Coordinate::new(row + k, col)
                    }
                })
                .collect();
            if coords.iter().any(|&c| occupied.contains(c)) {
                continue;
            }
            for &c in &coords {
                occupied.insert(c).ok()?;
            }
            fleet.push(ShipPlacement::new(ship_type.name(), coords));
            placed = true;
            break;
        }
        if !placed {
            return None;
        }
    }
    Some(fleet)
}
