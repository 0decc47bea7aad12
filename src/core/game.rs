//! The match aggregate: two players, their boards, the turn pointer and the
//! lifecycle from creation to a winner.
//!
//! Every operation checks lifecycle, ownership and turn before touching any
//! state, so a refused call leaves the match exactly as it was.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::core::board::Board;
use crate::core::coordinate::{Coordinate, CoordinateError};
use crate::core::deployment::{FleetValidator, ShipPlacement};
use crate::core::error::GameError;
use crate::core::event::{MatchEvent, Transition};
use crate::core::field::FieldOperations;
use crate::core::ship::ShipType;

pub type MatchId = String;
pub type PlayerId = String;
/// Milliseconds since the Unix epoch, supplied by the caller.
pub type Timestamp = u64;

/// Seat at the table. Player one created the match and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn other(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}

/// Lifecycle stage, derived from which players and boards are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchState {
    /// Only the initiating player is known.
    Created,
    /// Both players known, at least one fleet missing.
    AwaitingDeployment,
    /// Both fleets deployed, turns proceed.
    InProgress,
    /// A winner has been decided.
    Finished,
}

/// Kind of a fire result, as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum FireOutcome {
    Miss,
    Hit,
    Sunk,
}

/// What a successful fire did to the opponent's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum FireResult {
    Miss,
    Hit,
    /// The shot completed `ship_type`; `match_won` when it was the last ship.
    Sunk { ship_type: ShipType, match_won: bool },
}

impl FireResult {
    pub fn outcome(&self) -> FireOutcome {
        match self {
            FireResult::Miss => FireOutcome::Miss,
            FireResult::Hit => FireOutcome::Hit,
            FireResult::Sunk { .. } => FireOutcome::Sunk,
        }
    }

    pub fn sunk_ship(&self) -> Option<ShipType> {
        match self {
            FireResult::Sunk { ship_type, .. } => Some(*ship_type),
            _ => None,
        }
    }

    pub fn is_match_won(&self) -> bool {
        matches!(self, FireResult::Sunk { match_won: true, .. })
    }
}

/// Read-only view of a match, safe to hand to any client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSummary {
    pub id: MatchId,
    pub state: MatchState,
    pub player_one: PlayerId,
    pub player_two: Option<PlayerId>,
    pub vs_computer: bool,
    /// Player whose turn it is, once known.
    pub next_player: Option<PlayerId>,
    pub winner: Option<PlayerId>,
    pub created_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub finished_at: Option<Timestamp>,
}

/// One game between two players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    id: MatchId,
    players: [Option<PlayerId>; 2],
    vs_computer: bool,
    turn: PlayerSlot,
    boards: [Option<Board>; 2],
    created_at: Timestamp,
    started_at: Option<Timestamp>,
    finished_at: Option<Timestamp>,
    winner: Option<PlayerId>,
}

impl Match {
    /// Create a match with `initiator` in slot one and holding the turn.
    ///
    /// Emits [`MatchEvent::MatchCreated`] when the opponent is the computer.
    pub fn start(
        id: impl Into<MatchId>,
        initiator: impl Into<PlayerId>,
        vs_computer: bool,
        now: Timestamp,
    ) -> Transition<Match> {
        let game = Match {
            id: id.into(),
            players: [Some(initiator.into()), None],
            vs_computer,
            turn: PlayerSlot::One,
            boards: [None, None],
            created_at: now,
            started_at: None,
            finished_at: None,
            winner: None,
        };
        let events = if vs_computer {
            vec![MatchEvent::MatchCreated {
                match_id: game.id.clone(),
            }]
        } else {
            Vec::new()
        };
        Transition::with_events(game, events)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn player(&self, slot: PlayerSlot) -> Option<&str> {
        self.players[slot.index()].as_deref()
    }

    pub fn is_vs_computer(&self) -> bool {
        self.vs_computer
    }

    /// Slot allowed to fire next.
    pub fn turn(&self) -> PlayerSlot {
        self.turn
    }

    pub fn board(&self, slot: PlayerSlot) -> Option<&Board> {
        self.boards[slot.index()].as_ref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Timestamp> {
        self.finished_at
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Both fleets are on the table.
    pub fn players_ready(&self) -> bool {
        self.boards.iter().all(Option::is_some)
    }

    pub fn state(&self) -> MatchState {
        if self.is_finished() {
            MatchState::Finished
        } else if self.players_ready() {
            MatchState::InProgress
        } else if self.players[1].is_some() {
            MatchState::AwaitingDeployment
        } else {
            MatchState::Created
        }
    }

    /// Slot held by `player`.
    pub fn slot_of(&self, player: &str) -> Result<PlayerSlot, GameError> {
        [PlayerSlot::One, PlayerSlot::Two]
            .into_iter()
            .find(|slot| self.player(*slot) == Some(player))
            .ok_or_else(|| GameError::UnknownPlayer(player.into()))
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            id: self.id.clone(),
            state: self.state(),
            player_one: self.player(PlayerSlot::One).unwrap_or_default().into(),
            player_two: self.players[1].clone(),
            vs_computer: self.vs_computer,
            next_player: self.players[self.turn.index()].clone(),
            winner: self.winner.clone(),
            created_at: self.created_at,
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }

    /// Take the second seat.
    pub fn join(&mut self, player: impl Into<PlayerId>) -> Result<Transition<()>, GameError> {
        let player = player.into();
        if self.players[1].is_some() {
            return Err(GameError::MatchJoin(
                "another player is already playing this match".into(),
            ));
        }
        if self.player(PlayerSlot::One) == Some(player.as_str()) {
            return Err(GameError::MatchJoin(
                "player already holds the first seat".into(),
            ));
        }
        self.players[1] = Some(player);
        Ok(Transition::quiet(()))
    }

    /// Validate `placements` and attach the resulting board to `player`.
    ///
    /// Stamps the start time once both boards are present.
    pub fn deploy_fleet<F: FieldOperations>(
        &mut self,
        player: &str,
        placements: &[ShipPlacement],
        validator: &FleetValidator,
        field: &F,
        now: Timestamp,
    ) -> Result<Transition<()>, GameError> {
        let slot = self.slot_of(player)?;
        if self.boards[slot.index()].is_some() {
            return Err(GameError::ShipsAlreadyDeployed(player.into()));
        }
        let fleet = validator.validate(placements)?;
        self.boards[slot.index()] = Some(field.build_board(fleet));
        if self.players_ready() && self.started_at.is_none() {
            self.started_at = Some(now);
        }
        Ok(Transition::quiet(()))
    }

    /// Fire at `target` on the opponent's board.
    ///
    /// Order on success: resolve the shot, finish the match if the last ship
    /// sank, then hand the turn to the other player, even after a win.
    /// [`MatchEvent::FireOccurred`] is emitted when the computer moves next,
    /// judged by the turn as it stood before this shot.
    pub fn fire<F: FieldOperations>(
        &mut self,
        player: &str,
        target: Coordinate,
        field: &F,
        now: Timestamp,
    ) -> Result<Transition<FireResult>, GameError> {
        if let Some(winner) = &self.winner {
            return Err(GameError::MatchFinished {
                winner: winner.clone(),
            });
        }
        if !self.players_ready() {
            return Err(GameError::MatchNotStarted);
        }
        let slot = self.slot_of(player)?;
        if slot != self.turn {
            return Err(GameError::NotPlayersTurn(player.into()));
        }
        if !target.in_bounds() {
            return Err(CoordinateError::OutOfBounds {
                row: target.row(),
                column: target.column(),
            }
            .into());
        }

        let computer_moves_next = self.vs_computer && self.turn == PlayerSlot::One;
        let mut events = Vec::new();

        let board = self.boards[slot.other().index()]
            .as_mut()
            .ok_or(GameError::MatchNotStarted)?;
        let cell = board.mark_hit(target)?;
        let result = match cell.ship().and_then(|id| board.ship(id)) {
            None => FireResult::Miss,
            Some(ship) if !field.is_ship_sunk(board, ship) => FireResult::Hit,
            Some(ship) => {
                let ship_type = ship.ship_type();
                let match_won = field.all_ships_sunk(board);
                FireResult::Sunk {
                    ship_type,
                    match_won,
                }
            }
        };

        if result.is_match_won() {
            self.winner = Some(player.into());
            self.finished_at = Some(now);
            events.push(MatchEvent::MatchFinished {
                match_id: self.id.clone(),
                winner: player.into(),
            });
        }

        self.turn = self.turn.other();

        if computer_moves_next {
            events.push(MatchEvent::FireOccurred {
                match_id: self.id.clone(),
            });
        }
        Ok(Transition::with_events(result, events))
    }
}
