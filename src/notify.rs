#![cfg(feature = "std")]

//! Publication of match events to the automated opponent.

use log::{debug, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::MatchEvent;

/// Fire-and-forget sink for [`MatchEvent`]s.
pub trait Notifier: Send + Sync {
    fn publish(&self, event: MatchEvent);
}

/// Notifier that drops every event. Used when nobody plays the computer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn publish(&self, event: MatchEvent) {
        debug!("[match={}] dropping event {:?}", event.match_id(), event);
    }
}

/// Notifier backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<MatchEvent>,
}

impl ChannelNotifier {
    /// A notifier and the receiving end to hand to a consumer.
    pub fn channel() -> (Self, UnboundedReceiver<MatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn publish(&self, event: MatchEvent) {
        debug!("[match={}] publishing {:?}", event.match_id(), event);
        if let Err(err) = self.tx.send(event) {
            warn!(
                "[match={}] no subscriber for event {:?}",
                err.0.match_id(),
                err.0
            );
        }
    }
}
