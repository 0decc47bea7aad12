//! Stateless board construction and sink queries.

use crate::core::board::Board;
use crate::core::deployment::ValidatedFleet;
use crate::core::ship::Ship;

/// Board operations the match needs while resolving fire.
///
/// Both queries are pure functions of the board's current hit flags.
pub trait FieldOperations {
    /// Lay a validated fleet onto an all-water board.
    fn build_board(&self, fleet: ValidatedFleet) -> Board;

    /// True iff every cell of `ship` is hit on `board`.
    fn is_ship_sunk(&self, board: &Board, ship: &Ship) -> bool;

    /// True iff every ship cell on `board` is hit.
    fn all_ships_sunk(&self, board: &Board) -> bool;
}

/// The standard [`FieldOperations`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldService;

impl FieldService {
    pub fn new() -> Self {
        Self
    }
}

impl FieldOperations for FieldService {
    fn build_board(&self, fleet: ValidatedFleet) -> Board {
        let mut board = Board::water();
        for ship in fleet.into_ships() {
            board.stamp(ship);
        }
        board
    }

    fn is_ship_sunk(&self, board: &Board, ship: &Ship) -> bool {
        ship.coordinates()
            .iter()
            .all(|&coord| board.cell_at(coord).is_some_and(|cell| cell.is_hit()))
    }

    fn all_ships_sunk(&self, board: &Board) -> bool {
        (board.ship_map() & !board.hits()).is_empty()
    }
}
