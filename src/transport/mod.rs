#![cfg(feature = "std")]

//! Message transports between a [`MatchClient`](crate::client::MatchClient)
//! and the server loop.

use crate::protocol::Message;

/// Bidirectional, ordered message pipe.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;
pub mod tcp;
