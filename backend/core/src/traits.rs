use anyhow::Result;
use async_trait::async_trait;

use crate::message::OutboundMessage;

/// Identity lookup consumed from the surrounding chat server.
///
/// Returns the account name a session is authenticated as, if any.
pub trait AccountLookup: Send + Sync {
    fn account_name(&self, session_id: &str) -> Option<String>;
}

/// Capability negotiation consumed from the surrounding chat server.
///
/// A peer only receives vendor tags it has explicitly negotiated.
pub trait CapabilityCheck: Send + Sync {
    fn is_enabled(&self, session_id: &str) -> bool;
}

/// Delivery primitive consumed from the surrounding chat server: send a
/// constructed protocol message to one peer, or enumerate everyone
/// currently connected.
#[async_trait]
pub trait PeerSink: Send + Sync {
    async fn connected_peers(&self) -> Vec<String>;
    async fn send_to(&self, session_id: &str, message: &OutboundMessage) -> Result<()>;
}
