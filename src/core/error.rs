//! Caller-facing failures of match operations.

use alloc::string::String;

use crate::core::coordinate::CoordinateError;
use crate::core::deployment::DeploymentError;

/// Every way a match operation can be refused. None of them leave the match
/// modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),
    #[error("fleet rejected: {0}")]
    Deployment(#[from] DeploymentError),
    #[error("match {0} not found")]
    MatchNotFound(String),
    #[error("cannot join match: {0}")]
    MatchJoin(String),
    #[error("player {0} has already deployed a fleet")]
    ShipsAlreadyDeployed(String),
    #[error("match is finished, {winner} won")]
    MatchFinished { winner: String },
    #[error("match has not started, both fleets must be deployed")]
    MatchNotStarted,
    #[error("it is not {0}'s turn")]
    NotPlayersTurn(String),
    #[error("player {0} is not part of this match")]
    UnknownPlayer(String),
}
