#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;

#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod notify;
#[cfg(feature = "std")]
pub mod opponent;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod repository;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod service;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;

#[cfg(feature = "std")]
pub use client::MatchClient;
#[cfg(feature = "std")]
pub use config::ServerConfig;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use notify::{ChannelNotifier, NoopNotifier, Notifier};
#[cfg(feature = "std")]
pub use opponent::ComputerOpponent;
#[cfg(feature = "std")]
pub use protocol::{FireRequest, FireResponse, MatchApi, ShipDeployment, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use repository::{InMemoryMatchRepository, MatchRepository};
#[cfg(feature = "std")]
pub use service::MatchService;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
