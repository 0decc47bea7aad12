#![cfg(feature = "std")]

//! Serves a [`MatchApi`] to remote clients.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::net::TcpListener;
use tokio::time::Duration;

use crate::protocol::{dispatch, MatchApi, Message, PROTOCOL_VERSION};
use crate::transport::tcp::TcpTransport;
use crate::transport::Transport;

/// Handle one connection: handshake, then answer requests until the peer
/// goes away.
pub async fn serve_connection<A, T>(api: &A, transport: &mut T) -> anyhow::Result<()>
where
    A: MatchApi + ?Sized,
    T: Transport,
{
    match transport.recv().await? {
        Message::Hello { version } if version == PROTOCOL_VERSION => {
            transport.send(Message::Hello { version }).await?;
        }
        Message::Hello { version } => {
            // echo our version so the client can report the mismatch
            transport
                .send(Message::Hello {
                    version: PROTOCOL_VERSION,
                })
                .await?;
            return Err(anyhow::anyhow!(
                "Protocol version mismatch: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            ));
        }
        other => return Err(anyhow::anyhow!("Expected Hello, got {:?}", other)),
    }

    while let Ok(msg) = transport.recv().await {
        match msg {
            Message::Request { seq, body } => {
                debug!("request {}: {:?}", seq, body);
                let body = dispatch(api, body).await?;
                transport.send(Message::Response { seq, body }).await?;
            }
            other => warn!("ignoring unexpected message {:?}", other),
        }
    }
    Ok(())
}

/// Accept TCP connections forever, one task per connection.
pub async fn serve<A>(
    listener: TcpListener,
    api: Arc<A>,
    io_timeout: Duration,
    max_message_size: u32,
) -> anyhow::Result<()>
where
    A: MatchApi + 'static,
{
    info!("listening on {}", listener.local_addr()?);
    loop {
        let (stream, addr) = listener.accept().await?;
        info!("client connected from {}", addr);
        let api = Arc::clone(&api);
        tokio::spawn(async move {
            let mut transport = TcpTransport::with_config(stream, io_timeout, max_message_size);
            match serve_connection(api.as_ref(), &mut transport).await {
                Ok(()) => info!("client {} disconnected", addr),
                Err(e) => warn!("client {} dropped: {}", addr, e),
            }
        });
    }
}
