#![cfg(feature = "std")]

//! Match use-cases: every call is one atomic repository update followed by
//! publication of whatever events the transition emitted.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};
use rand::Rng;

use crate::core::{
    Coordinate, FieldService, FleetValidator, GameError, Match, MatchEvent, MatchSummary,
    ShipPlacement, Timestamp, Transition,
};
use crate::notify::Notifier;
use crate::protocol::{FireRequest, FireResponse, MatchApi, ShipDeployment};
use crate::repository::MatchRepository;

/// Wall-clock milliseconds since the Unix epoch.
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or_default()
}

pub struct MatchService<R, N> {
    repository: Arc<R>,
    notifier: N,
    validator: FleetValidator,
    field: FieldService,
}

impl<R: MatchRepository, N: Notifier> MatchService<R, N> {
    pub fn new(repository: Arc<R>, notifier: N) -> Self {
        Self {
            repository,
            notifier,
            validator: FleetValidator::new(),
            field: FieldService::new(),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    fn publish(&self, events: Vec<MatchEvent>) {
        for event in events {
            self.notifier.publish(event);
        }
    }

    fn commit<T>(&self, transition: Transition<T>) -> T {
        self.publish(transition.events);
        transition.outcome
    }

    /// Create a match with `player_id` moving first.
    pub fn start(&self, player_id: &str, vs_computer: bool) -> MatchSummary {
        let id = format!("{:016x}", rand::rng().random::<u64>());
        let Transition { outcome: game, events } =
            Match::start(id, player_id, vs_computer, now_millis());
        let summary = game.summary();
        self.repository.put(game);
        info!(
            "[match={}] created by {} (vs computer: {})",
            summary.id, player_id, vs_computer
        );
        self.publish(events);
        summary
    }

    pub fn join(&self, match_id: &str, player_id: &str) -> Result<(), GameError> {
        let transition = self
            .repository
            .update(match_id, |game| game.join(player_id))?;
        info!("[match={}] {} joined", match_id, player_id);
        Ok(self.commit(transition))
    }

    /// Decode and deploy `player_id`'s fleet.
    pub fn deploy_fleet(
        &self,
        match_id: &str,
        player_id: &str,
        ships: &[ShipDeployment],
    ) -> Result<(), GameError> {
        let placements = ships
            .iter()
            .map(|ship| ShipPlacement::from_labels(ship.ship_type.as_str(), &ship.coordinates))
            .collect::<Result<Vec<_>, _>>()?;
        self.deploy_placements(match_id, player_id, &placements)
    }

    /// Deploy an already decoded fleet.
    pub fn deploy_placements(
        &self,
        match_id: &str,
        player_id: &str,
        placements: &[ShipPlacement],
    ) -> Result<(), GameError> {
        let now = now_millis();
        let (transition, started) = self.repository.update(match_id, |game| {
            let transition =
                game.deploy_fleet(player_id, placements, &self.validator, &self.field, now)?;
            Ok((transition, game.started_at().is_some()))
        })?;
        info!("[match={}] {} deployed a fleet", match_id, player_id);
        if started {
            debug!("[match={}] both fleets deployed", match_id);
        }
        Ok(self.commit(transition))
    }

    pub fn fire(&self, match_id: &str, request: &FireRequest) -> Result<FireResponse, GameError> {
        let target = Coordinate::decode(&request.coordinate)?;
        let now = now_millis();
        let transition = self.repository.update(match_id, |game| {
            game.fire(&request.player_id, target, &self.field, now)
        })?;
        let result = transition.outcome;
        debug!(
            "[match={}] {} fired at {}: {:?}",
            match_id, request.player_id, target, result
        );
        if result.is_match_won() {
            info!("[match={}] {} won", match_id, request.player_id);
        }
        Ok(FireResponse::from(self.commit(transition)))
    }

    pub fn status(&self, match_id: &str) -> Result<MatchSummary, GameError> {
        self.repository
            .get(match_id)
            .map(|game| game.summary())
            .ok_or_else(|| GameError::MatchNotFound(match_id.to_owned()))
    }
}

#[async_trait::async_trait]
impl<R: MatchRepository, N: Notifier> MatchApi for MatchService<R, N> {
    async fn start(&self, player_id: &str, vs_computer: bool) -> anyhow::Result<MatchSummary> {
        Ok(MatchService::start(self, player_id, vs_computer))
    }

    async fn join(&self, match_id: &str, player_id: &str) -> anyhow::Result<()> {
        Ok(MatchService::join(self, match_id, player_id)?)
    }

    async fn deploy_fleet(
        &self,
        match_id: &str,
        player_id: &str,
        ships: Vec<ShipDeployment>,
    ) -> anyhow::Result<()> {
        Ok(MatchService::deploy_fleet(self, match_id, player_id, &ships)?)
    }

    async fn fire(&self, match_id: &str, request: FireRequest) -> anyhow::Result<FireResponse> {
        Ok(MatchService::fire(self, match_id, &request)?)
    }

    async fn status(&self, match_id: &str) -> anyhow::Result<MatchSummary> {
        Ok(MatchService::status(self, match_id)?)
    }
}
