mod common;

use broadside::{
    random_fleet, Coordinate, CoordinateError, DeploymentError, FleetValidator, ShipPlacement,
    ShipType, FLEET, TOTAL_SHIP_CELLS,
};
use common::{classic_fleet, coord};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn validate(fleet: &[ShipPlacement]) -> Result<(), DeploymentError> {
    FleetValidator::new().validate(fleet).map(|_| ())
}

fn replace(fleet: &mut [ShipPlacement], ship_type: &str, labels: &[&str]) {
    let placement = fleet
        .iter_mut()
        .find(|p| p.ship_type == ship_type)
        .unwrap();
    *placement = ShipPlacement::from_labels(ship_type, labels).unwrap();
}

#[test]
fn classic_fleet_is_valid() {
    let fleet = FleetValidator::new().validate(&classic_fleet()).unwrap();
    assert_eq!(fleet.ships().len(), FLEET.len());
    let cells: usize = fleet.ships().iter().map(|s| s.len()).sum();
    assert_eq!(cells, TOTAL_SHIP_CELLS);
}

#[test]
fn ship_lengths_follow_the_classic_layout() {
    let lengths: Vec<usize> = FLEET.iter().map(|t| t.length()).collect();
    assert_eq!(lengths, vec![5, 4, 3, 3, 2]);
    assert_eq!(ShipType::Submarine.length(), 3);
}

#[test]
fn ship_names_are_case_insensitive() {
    assert_eq!(ShipType::from_name("destroyer"), Some(ShipType::Destroyer));
    assert_eq!("CARRIER".parse::<ShipType>(), Ok(ShipType::Carrier));
    assert_eq!(ShipType::from_name("Frigate"), None);

    let mut fleet = classic_fleet();
    fleet[0].ship_type = "carrier".into();
    assert!(validate(&fleet).is_ok());
}

#[test]
fn unknown_ship_type_is_named() {
    let mut fleet = classic_fleet();
    fleet[2].ship_type = "Frigate".into();
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::UnknownShipType("Frigate".into()))
    );
}

#[test]
fn duplicate_ship_type_is_rejected() {
    let mut fleet = classic_fleet();
    fleet[3] = ShipPlacement::from_labels("Cruiser", &["J1", "J2", "J3"]).unwrap();
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::DuplicateShipType(ShipType::Cruiser))
    );
}

#[test]
fn missing_ship_type_is_rejected() {
    let mut fleet = classic_fleet();
    fleet.retain(|p| p.ship_type != "Submarine");
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::MissingShipType(ShipType::Submarine))
    );
    assert_eq!(
        validate(&[]),
        Err(DeploymentError::MissingShipType(ShipType::Carrier))
    );
}

#[test]
fn wrong_length_is_rejected() {
    let mut fleet = classic_fleet();
    replace(&mut fleet, "Battleship", &["E1", "E2", "E3"]);
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::WrongLength {
            ship_type: ShipType::Battleship,
            expected: 4,
            actual: 3,
        })
    );
}

#[test]
fn gaps_and_diagonals_are_not_contiguous() {
    let mut fleet = classic_fleet();
    replace(&mut fleet, "Destroyer", &["A1", "A3"]);
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::NotContiguous(ShipType::Destroyer))
    );

    let mut fleet = classic_fleet();
    replace(&mut fleet, "Destroyer", &["A1", "B2"]);
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::NotContiguous(ShipType::Destroyer))
    );

    let mut fleet = classic_fleet();
    replace(&mut fleet, "Destroyer", &["A1", "A1"]);
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::NotContiguous(ShipType::Destroyer))
    );
}

#[test]
fn unordered_cells_are_contiguous() {
    let mut fleet = classic_fleet();
    replace(&mut fleet, "Cruiser", &["G3", "G1", "G2"]);
    assert!(validate(&fleet).is_ok());
}

#[test]
fn off_board_cells_are_rejected() {
    let mut fleet = classic_fleet();
    let destroyer = fleet
        .iter_mut()
        .find(|p| p.ship_type == "Destroyer")
        .unwrap();
    destroyer.coordinates = vec![Coordinate::new(9, 9), Coordinate::new(9, 10)];
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::OutOfBounds {
            ship_type: ShipType::Destroyer,
            row: 9,
            column: 10,
        })
    );
}

#[test]
fn overlapping_ships_are_rejected() {
    let mut fleet = classic_fleet();
    replace(&mut fleet, "Destroyer", &["B1", "C1"]);
    assert_eq!(validate(&fleet), Err(DeploymentError::Overlap(coord("C1"))));
}

#[test]
fn bad_labels_are_reported_with_their_ship() {
    let err = ShipPlacement::from_labels("Destroyer", &["A1", "Z9"]).unwrap_err();
    assert_eq!(
        err,
        DeploymentError::InvalidCoordinate {
            ship_type: "Destroyer".into(),
            source: CoordinateError::ColumnOutOfRange('Z'),
        }
    );
}

#[test]
fn placement_labels_are_canonical() {
    let placement = ShipPlacement::from_labels("Destroyer", &["a1", "a02"]).unwrap();
    assert_eq!(placement.labels(), vec!["A1".to_string(), "A2".to_string()]);
}

#[test]
fn repeated_edge_index_is_rejected_without_overflow() {
    let mut fleet = classic_fleet();
    let destroyer = fleet
        .iter_mut()
        .find(|p| p.ship_type == "Destroyer")
        .unwrap();
    destroyer.coordinates = vec![Coordinate::new(0, usize::MAX), Coordinate::new(0, usize::MAX)];
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::NotContiguous(ShipType::Destroyer))
    );
}

#[test]
fn unknown_type_wins_over_wrong_length() {
    let mut fleet = classic_fleet();
    fleet[0] = ShipPlacement::from_labels("Frigate", &["C1", "C2"]).unwrap();
    fleet[1] = ShipPlacement::from_labels("Battleship", &["E1"]).unwrap();
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::UnknownShipType("Frigate".into()))
    );
}

#[test]
fn wrong_length_wins_over_overlap() {
    let mut fleet = classic_fleet();
    replace(&mut fleet, "Battleship", &["E1", "E2", "E3"]);
    replace(&mut fleet, "Destroyer", &["B1", "C1"]);
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::WrongLength {
            ship_type: ShipType::Battleship,
            expected: 4,
            actual: 3,
        })
    );
}

#[test]
fn gap_wins_over_off_board_cell() {
    let mut fleet = classic_fleet();
    let cruiser = fleet.iter_mut().find(|p| p.ship_type == "Cruiser").unwrap();
    cruiser.coordinates = vec![
        Coordinate::new(0, 6),
        Coordinate::new(2, 6),
        Coordinate::new(3, 6),
    ];
    let destroyer = fleet
        .iter_mut()
        .find(|p| p.ship_type == "Destroyer")
        .unwrap();
    destroyer.coordinates = vec![Coordinate::new(9, 9), Coordinate::new(9, 10)];
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::NotContiguous(ShipType::Cruiser))
    );
}

#[test]
fn off_board_wins_over_overlap() {
    let mut fleet = classic_fleet();
    replace(&mut fleet, "Cruiser", &["C1", "D1", "E1"]);
    let destroyer = fleet
        .iter_mut()
        .find(|p| p.ship_type == "Destroyer")
        .unwrap();
    destroyer.coordinates = vec![Coordinate::new(10, 0), Coordinate::new(10, 1)];
    assert_eq!(
        validate(&fleet),
        Err(DeploymentError::OutOfBounds {
            ship_type: ShipType::Destroyer,
            row: 10,
            column: 0,
        })
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn random_fleets_always_validate(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = random_fleet(&mut rng);
        prop_assert_eq!(fleet.len(), FLEET.len());
        prop_assert!(FleetValidator::new().validate(&fleet).is_ok());
    }
}
