//! Pure battleship match engine (no_std + alloc).
//!
//! Nothing in here performs I/O or reads the clock: callers pass timestamps
//! in and receive emitted events back as data.

pub mod bitboard;
pub mod board;
pub mod config;
pub mod coordinate;
pub mod deployment;
pub mod error;
pub mod event;
pub mod field;
pub mod game;
pub mod ship;

pub use bitboard::{BitBoard, CellMask};
pub use board::{Board, Cell, ShipId};
pub use config::*;
pub use coordinate::{Coordinate, CoordinateError};
pub use deployment::{random_fleet, DeploymentError, FleetValidator, ShipPlacement, ValidatedFleet};
pub use error::GameError;
pub use event::{MatchEvent, Transition};
pub use field::{FieldOperations, FieldService};
pub use game::{
    FireOutcome, FireResult, Match, MatchId, MatchState, MatchSummary, PlayerId, PlayerSlot,
    Timestamp,
};
pub use ship::{Ship, ShipType, UnknownShipType};
