#![cfg(feature = "std")]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::core::MatchSummary;
use crate::protocol::{
    FireRequest, FireResponse, MatchApi, Message, Request, Response, ShipDeployment,
    PROTOCOL_VERSION,
};
use crate::transport::Transport;

/// Remote [`MatchApi`] speaking the wire protocol over any transport.
///
/// Requests are serialised through one lock, so a client can be shared
/// between tasks. Engine refusals are returned as a
/// [`GameError`](crate::core::GameError) inside the `anyhow::Error`.
pub struct MatchClient<T: Transport> {
    transport: Mutex<T>,
    next_seq: AtomicU64,
    handshaken: AtomicBool,
}

impl<T: Transport> MatchClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
            next_seq: AtomicU64::new(0),
            handshaken: AtomicBool::new(false),
        }
    }

    async fn handshake(&self, transport: &mut T) -> anyhow::Result<()> {
        transport
            .send(Message::Hello {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.handshaken.store(true, Ordering::SeqCst);
                Ok(())
            }
            Message::Hello { version } => Err(anyhow::anyhow!(
                "Protocol version mismatch: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            )),
            other => Err(anyhow::anyhow!("Expected Hello, got {:?}", other)),
        }
    }

    async fn call(&self, body: Request) -> anyhow::Result<Response> {
        let mut transport = self.transport.lock().await;
        if !self.handshaken.load(Ordering::SeqCst) {
            self.handshake(&mut *transport).await?;
        }
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        transport.send(Message::Request { seq, body }).await?;
        match transport.recv().await? {
            Message::Response {
                seq: resp_seq,
                body: Response::Error(err),
            } if resp_seq == seq => Err(anyhow::Error::new(err)),
            Message::Response {
                seq: resp_seq,
                body,
            } if resp_seq == seq => Ok(body),
            Message::Response { seq: resp_seq, .. } => Err(anyhow::anyhow!(
                "Sequence mismatch: expected {}, got {}",
                seq,
                resp_seq
            )),
            other => Err(anyhow::anyhow!("Unexpected message: {:?}", other)),
        }
    }
}

fn unexpected(response: Response) -> anyhow::Error {
    anyhow::anyhow!("Unexpected response: {:?}", response)
}

#[async_trait::async_trait]
impl<T: Transport> MatchApi for MatchClient<T> {
    async fn start(&self, player_id: &str, vs_computer: bool) -> anyhow::Result<MatchSummary> {
        let request = Request::Start {
            player_id: player_id.to_owned(),
            vs_computer,
        };
        match self.call(request).await? {
            Response::Started(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }

    async fn join(&self, match_id: &str, player_id: &str) -> anyhow::Result<()> {
        let request = Request::Join {
            match_id: match_id.to_owned(),
            player_id: player_id.to_owned(),
        };
        match self.call(request).await? {
            Response::Joined => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    async fn deploy_fleet(
        &self,
        match_id: &str,
        player_id: &str,
        ships: Vec<ShipDeployment>,
    ) -> anyhow::Result<()> {
        let request = Request::Deploy {
            match_id: match_id.to_owned(),
            player_id: player_id.to_owned(),
            ships,
        };
        match self.call(request).await? {
            Response::Deployed => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    async fn fire(&self, match_id: &str, request: FireRequest) -> anyhow::Result<FireResponse> {
        let request = Request::Fire {
            match_id: match_id.to_owned(),
            fire: request,
        };
        match self.call(request).await? {
            Response::Fired(response) => Ok(response),
            other => Err(unexpected(other)),
        }
    }

    async fn status(&self, match_id: &str) -> anyhow::Result<MatchSummary> {
        let request = Request::Status {
            match_id: match_id.to_owned(),
        };
        match self.call(request).await? {
            Response::Status(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }
}
