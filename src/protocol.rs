#![cfg(feature = "std")]

//! Request/response shapes shared by the service, the TCP server and the
//! remote client, plus the [`MatchApi`] both sides implement.

use serde::{Deserialize, Serialize};

use crate::core::{FireOutcome, FireResult, GameError, MatchSummary, ShipPlacement};

/// Protocol version exchanged in the `Hello` handshake.
pub const PROTOCOL_VERSION: u32 = 1;

/// A fire action: who shoots, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireRequest {
    pub player_id: String,
    /// Coordinate label such as `"C7"`.
    pub coordinate: String,
}

impl FireRequest {
    pub fn new(player_id: impl Into<String>, coordinate: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            coordinate: coordinate.into(),
        }
    }
}

/// Outcome of a fire action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireResponse {
    pub outcome: FireOutcome,
    /// Name of the sunk ship; only set for [`FireOutcome::Sunk`].
    pub ship_type_sunk: Option<String>,
    /// True only when the shot sank the opponent's last ship.
    pub game_won: bool,
}

impl From<FireResult> for FireResponse {
    fn from(result: FireResult) -> Self {
        FireResponse {
            outcome: result.outcome(),
            ship_type_sunk: result.sunk_ship().map(|ty| ty.name().to_owned()),
            game_won: result.is_match_won(),
        }
    }
}

/// One ship of a deployment request, coordinates given as labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipDeployment {
    pub ship_type: String,
    pub coordinates: Vec<String>,
}

impl ShipDeployment {
    pub fn new<S: Into<String>>(
        ship_type: impl Into<String>,
        coordinates: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            ship_type: ship_type.into(),
            coordinates: coordinates.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&ShipPlacement> for ShipDeployment {
    fn from(placement: &ShipPlacement) -> Self {
        ShipDeployment {
            ship_type: placement.ship_type.clone(),
            coordinates: placement.labels(),
        }
    }
}

/// Operations a client can ask of the match service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    Start {
        player_id: String,
        vs_computer: bool,
    },
    Join {
        match_id: String,
        player_id: String,
    },
    Deploy {
        match_id: String,
        player_id: String,
        ships: Vec<ShipDeployment>,
    },
    Fire {
        match_id: String,
        fire: FireRequest,
    },
    Status {
        match_id: String,
    },
}

/// Replies to [`Request`]s. Engine refusals travel as `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Started(MatchSummary),
    Joined,
    Deployed,
    Fired(FireResponse),
    Status(MatchSummary),
    Error(GameError),
}

/// Frames exchanged over a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Handshake, sent by the client and echoed by the server.
    Hello { version: u32 },
    Request { seq: u64, body: Request },
    Response { seq: u64, body: Response },
}

/// The match contract, served locally by
/// [`MatchService`](crate::service::MatchService) and remotely by
/// [`MatchClient`](crate::client::MatchClient).
///
/// Engine refusals come back as a [`GameError`] inside the `anyhow::Error`;
/// use `err.downcast_ref::<GameError>()` to inspect them.
#[async_trait::async_trait]
pub trait MatchApi: Send + Sync {
    async fn start(&self, player_id: &str, vs_computer: bool) -> anyhow::Result<MatchSummary>;
    async fn join(&self, match_id: &str, player_id: &str) -> anyhow::Result<()>;
    async fn deploy_fleet(
        &self,
        match_id: &str,
        player_id: &str,
        ships: Vec<ShipDeployment>,
    ) -> anyhow::Result<()>;
    async fn fire(&self, match_id: &str, request: FireRequest) -> anyhow::Result<FireResponse>;
    async fn status(&self, match_id: &str) -> anyhow::Result<MatchSummary>;
}

/// Run `request` against `api`, folding engine refusals into
/// [`Response::Error`]. Other failures are returned as errors.
pub async fn dispatch<A: MatchApi + ?Sized>(api: &A, request: Request) -> anyhow::Result<Response> {
    let result = match request {
        Request::Start {
            player_id,
            vs_computer,
        } => api.start(&player_id, vs_computer).await.map(Response::Started),
        Request::Join {
            match_id,
            player_id,
        } => api.join(&match_id, &player_id).await.map(|()| Response::Joined),
        Request::Deploy {
            match_id,
            player_id,
            ships,
        } => api
            .deploy_fleet(&match_id, &player_id, ships)
            .await
            .map(|()| Response::Deployed),
        Request::Fire { match_id, fire } => api.fire(&match_id, fire).await.map(Response::Fired),
        Request::Status { match_id } => api.status(&match_id).await.map(Response::Status),
    };
    match result {
        Ok(response) => Ok(response),
        Err(err) => match err.downcast::<GameError>() {
            Ok(game_err) => Ok(Response::Error(game_err)),
            Err(other) => Err(other),
        },
    }
}
