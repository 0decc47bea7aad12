//! One player's grid: which cells hold which ship, and which cells were hit.

use alloc::vec::Vec;

use crate::core::bitboard::CellMask;
use crate::core::config::BOARD_SIZE;
use crate::core::coordinate::{Coordinate, CoordinateError};
use crate::core::ship::Ship;

/// Index of a ship within its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipId(usize);

impl ShipId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Snapshot of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    ship: Option<ShipId>,
    hit: bool,
}

impl Cell {
    pub fn is_water(&self) -> bool {
        self.ship.is_none()
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// The ship occupying this cell, if any.
    pub fn ship(&self) -> Option<ShipId> {
        self.ship
    }
}

/// An N×N grid of cells plus the ships stamped onto it.
///
/// The board does not check for overlaps; boards are only built from a
/// validated fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    ships: Vec<Ship>,
    occupancy: [[Option<ShipId>; BOARD_SIZE]; BOARD_SIZE],
    ship_map: CellMask,
    hits: CellMask,
}

impl Board {
    /// A board with every cell water and nothing hit.
    pub fn water() -> Self {
        Board {
            ships: Vec::new(),
            occupancy: [[None; BOARD_SIZE]; BOARD_SIZE],
            ship_map: CellMask::new(),
            hits: CellMask::new(),
        }
    }

    /// Stamp `ship` onto its cells. Off-board cells are skipped.
    pub(crate) fn stamp(&mut self, ship: Ship) -> ShipId {
        let id = ShipId(self.ships.len());
        for &coord in ship.coordinates() {
            if coord.in_bounds() {
                self.occupancy[coord.row()][coord.column()] = Some(id);
                // in bounds, cannot fail
                let _ = self.ship_map.insert(coord);
            }
        }
        self.ships.push(ship);
        id
    }

    /// The cell at `coord`, or `None` off the board.
    pub fn cell_at(&self, coord: Coordinate) -> Option<Cell> {
        if !coord.in_bounds() {
            return None;
        }
        Some(Cell {
            ship: self.occupancy[coord.row()][coord.column()],
            hit: self.hits.contains(coord),
        })
    }

    /// Mark `coord` as hit and return the updated cell. Idempotent.
    pub fn mark_hit(&mut self, coord: Coordinate) -> Result<Cell, CoordinateError> {
        self.hits.insert(coord)?;
        Ok(Cell {
            ship: self.occupancy[coord.row()][coord.column()],
            hit: true,
        })
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, Cell)> + '_ {
        (0..BOARD_SIZE).flat_map(move |row| {
            (0..BOARD_SIZE).map(move |column| {
                let coord = Coordinate::new(row, column);
                let cell = Cell {
                    ship: self.occupancy[row][column],
                    hit: self.hits.contains(coord),
                };
                (coord, cell)
            })
        })
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    /// Cells occupied by any ship.
    pub fn ship_map(&self) -> CellMask {
        self.ship_map
    }

    /// Cells marked hit, water or not.
    pub fn hits(&self) -> CellMask {
        self.hits
    }

    /// Number of `ship`'s cells that have been hit.
    pub fn hit_count(&self, ship: &Ship) -> usize {
        ship.coordinates()
            .iter()
            .filter(|&&coord| self.hits.contains(coord))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::water()
    }
}
