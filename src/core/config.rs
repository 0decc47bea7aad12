use super::ship::ShipType;

/// Width and height of every board.
pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// The fleet every player must deploy, one ship of each type, in
/// `ShipType` discriminant order.
pub const FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::Carrier,
    ShipType::Battleship,
    ShipType::Cruiser,
    ShipType::Submarine,
    ShipType::Destroyer,
];

/// Total number of ship segments in the fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;
