#![cfg(feature = "std")]

//! Runtime settings for the server and the computer opponent.

use std::time::Duration;

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:7878";
/// Player id the computer opponent joins matches with.
pub const DEFAULT_COMPUTER_ID: &str = "computer";
/// Pause before the computer fires back.
pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(600);
/// How long the server waits on a silent client before dropping it.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub computer_player_id: String,
    pub think_delay: Duration,
    pub io_timeout: Duration,
    pub max_message_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_owned(),
            computer_player_id: DEFAULT_COMPUTER_ID.to_owned(),
            think_delay: DEFAULT_THINK_DELAY,
            io_timeout: DEFAULT_IO_TIMEOUT,
            max_message_size: crate::transport::tcp::MAX_MESSAGE_SIZE,
        }
    }
}
