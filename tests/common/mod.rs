#![allow(dead_code)]

use broadside::{
    Coordinate, FieldService, FleetValidator, Match, ShipDeployment, ShipPlacement, Transition,
};

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";

/// Every ship stands upright in its own column, Destroyer on A1-A2 and the
/// rest on C, E, G and I. Columns B, D, F, H and J are open water.
pub const FLEET_LABELS: [(&str, &[&str]); 5] = [
    ("Carrier", &["C1", "C2", "C3", "C4", "C5"]),
    ("Battleship", &["E1", "E2", "E3", "E4"]),
    ("Cruiser", &["G1", "G2", "G3"]),
    ("Submarine", &["I1", "I2", "I3"]),
    ("Destroyer", &["A1", "A2"]),
];

pub fn classic_fleet() -> Vec<ShipPlacement> {
    FLEET_LABELS
        .iter()
        .map(|(name, labels)| ShipPlacement::from_labels(*name, *labels).unwrap())
        .collect()
}

pub fn deployments() -> Vec<ShipDeployment> {
    FLEET_LABELS
        .iter()
        .map(|(name, labels)| ShipDeployment::new(*name, labels.iter().copied()))
        .collect()
}

/// Ship cells of the fixture fleet, Destroyer last.
pub fn ship_cells() -> Vec<Coordinate> {
    let mut cells: Vec<Coordinate> = FLEET_LABELS[..4]
        .iter()
        .flat_map(|(_, labels)| labels.iter().map(|l| Coordinate::decode(l).unwrap()))
        .collect();
    cells.extend(FLEET_LABELS[4].1.iter().map(|l| Coordinate::decode(l).unwrap()));
    cells
}

/// Cells of the fixture board that hold no ship.
pub fn water_cells() -> Vec<Coordinate> {
    [1usize, 3, 5, 7, 9]
        .into_iter()
        .flat_map(|column| (0..10).map(move |row| Coordinate::new(row, column)))
        .collect()
}

pub fn coord(label: &str) -> Coordinate {
    Coordinate::decode(label).unwrap()
}

/// Alice against Bob, both fleets deployed, Alice to move.
pub fn started_match(vs_computer: bool) -> Match {
    let Transition { outcome: mut game, .. } = Match::start("m1", ALICE, vs_computer, 1_000);
    game.join(BOB).unwrap();
    let validator = FleetValidator::new();
    let field = FieldService::new();
    game.deploy_fleet(ALICE, &classic_fleet(), &validator, &field, 2_000)
        .unwrap();
    game.deploy_fleet(BOB, &classic_fleet(), &validator, &field, 3_000)
        .unwrap();
    game
}
