use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where an outbound message entered the gateway from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum MessageOrigin {
    /// Sent by a locally connected session.
    Local {
        session_id: String,
        /// Whether the session is on a TLS connection.
        secure: bool,
    },
    /// Relayed from a remote server; tags it carries are trusted as-is.
    Remote { server: String },
    /// Originated by the gateway itself (tag-only broadcasts).
    Gateway,
}

/// One outbound chat message about to be delivered to peers.
///
/// Tags are keyed by their vendor-scoped name; values are compact strings.
/// A `BTreeMap` keeps wire output deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub origin: MessageOrigin,
    /// Channel or nick the message is addressed to.
    pub target: String,
    pub text: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OutboundMessage {
    pub fn new(origin: MessageOrigin, target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin,
            target: target.into(),
            text: text.into(),
            tags: BTreeMap::new(),
        }
    }

    /// A gateway-originated message carrying only tags, no visible body.
    pub fn tag_only(
        target: impl Into<String>,
        tag: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut msg = Self::new(MessageOrigin::Gateway, target, "");
        msg.tags.insert(tag.into(), value.into());
        msg
    }

    /// Whether this message came from a locally connected session.
    pub fn is_local(&self) -> bool {
        matches!(self.origin, MessageOrigin::Local { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_only_has_no_body() {
        let msg = OutboundMessage::tag_only("#chat", "+vendor/tag", "{}");
        assert!(msg.text.is_empty());
        assert_eq!(msg.origin, MessageOrigin::Gateway);
        assert_eq!(msg.tags.get("+vendor/tag").map(String::as_str), Some("{}"));
    }
}
