#![cfg(feature = "std")]

//! The automated opponent: an ordinary [`MatchApi`] client driven by match
//! events.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::Rng;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep, Duration};

use crate::core::{random_fleet, CellMask, Coordinate, GameError, MatchEvent, BOARD_SIZE};
use crate::protocol::{FireRequest, MatchApi, ShipDeployment};

/// Pick a random cell not yet in `fired`, or `None` when every cell is.
pub fn random_target<R: Rng + ?Sized>(rng: &mut R, fired: &CellMask) -> Option<Coordinate> {
    let open = BOARD_SIZE * BOARD_SIZE - fired.len();
    if open == 0 {
        return None;
    }
    (!*fired).iter().nth(rng.random_range(0..open))
}

/// Joins computer matches, deploys a random fleet and fires back whenever
/// the human has moved.
///
/// Fired cells are tracked per match and dropped on `MatchFinished`. A match
/// the human abandons before it finishes keeps its entry until the opponent
/// is dropped.
pub struct ComputerOpponent<A: MatchApi> {
    api: Arc<A>,
    player_id: String,
    think_delay: Duration,
    rng: SmallRng,
    fired: HashMap<String, CellMask>,
}

impl<A: MatchApi> ComputerOpponent<A> {
    pub fn new(
        api: Arc<A>,
        player_id: impl Into<String>,
        think_delay: Duration,
        rng: SmallRng,
    ) -> Self {
        Self {
            api,
            player_id: player_id.into(),
            think_delay,
            rng,
            fired: HashMap::new(),
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Consume events until the channel closes.
    pub async fn run(mut self, mut events: UnboundedReceiver<MatchEvent>) {
        while let Some(event) = events.recv().await {
            if let Err(e) = self.handle(&event).await {
                warn!("[match={}] computer failed on {:?}: {}", event.match_id(), event, e);
            }
        }
        debug!("event channel closed, computer opponent stopping");
    }

    /// React to one event.
    pub async fn handle(&mut self, event: &MatchEvent) -> anyhow::Result<()> {
        match event {
            MatchEvent::MatchCreated { match_id } => {
                self.api.join(match_id, &self.player_id).await?;
                info!("[match={}] computer joined the match", match_id);
                let ships: Vec<ShipDeployment> = random_fleet(&mut self.rng)
                    .iter()
                    .map(ShipDeployment::from)
                    .collect();
                self.api
                    .deploy_fleet(match_id, &self.player_id, ships)
                    .await?;
                info!("[match={}] computer deployed its ships", match_id);
                self.fired.insert(match_id.clone(), CellMask::new());
                Ok(())
            }
            MatchEvent::FireOccurred { match_id } => self.fire(match_id).await,
            MatchEvent::MatchFinished { match_id, winner } => {
                self.fired.remove(match_id);
                info!("[match={}] finished, {} won", match_id, winner);
                Ok(())
            }
        }
    }

    async fn fire(&mut self, match_id: &str) -> anyhow::Result<()> {
        if !self.think_delay.is_zero() {
            sleep(self.think_delay).await;
        }
        let fired = self.fired.entry(match_id.to_owned()).or_default();
        let Some(target) = random_target(&mut self.rng, fired) else {
            return Err(anyhow::anyhow!("no cells left to fire at"));
        };
        let _ = fired.insert(target);

        let request = FireRequest::new(self.player_id.as_str(), target.to_string());
        match self.api.fire(match_id, request).await {
            Ok(response) => {
                info!(
                    "[match={}] computer fired at {}: {:?}",
                    match_id, target, response.outcome
                );
                if response.game_won {
                    info!("[match={}] computer WON the match", match_id);
                }
                Ok(())
            }
            Err(e) => match e.downcast_ref::<GameError>() {
                Some(GameError::MatchFinished { winner }) => {
                    info!(
                        "[match={}] already finished ({} won), dropping shot",
                        match_id, winner
                    );
                    self.fired.remove(match_id);
                    Ok(())
                }
                _ => Err(e),
            },
        }
    }
}
