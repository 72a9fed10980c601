//! Secure-share gate: refuses filehost URLs from non-TLS sessions.

use filehost_core::{MessageOrigin, OutboundMessage};

/// When `requiressl` is configured, an outbound message from a plaintext
/// local session that mentions the public URL is denied with a notice.
pub struct SecureShareGate {
    public_url: String,
    require_ssl: bool,
}

impl SecureShareGate {
    pub fn new(public_url: impl Into<String>, require_ssl: bool) -> Self {
        Self {
            public_url: public_url.into(),
            require_ssl,
        }
    }

    /// `Some(notice)` means the message must not be delivered.
    pub fn check(&self, msg: &OutboundMessage) -> Option<String> {
        if !self.require_ssl {
            return None;
        }
        let MessageOrigin::Local { secure, .. } = &msg.origin else {
            return None;
        };
        if !secure && msg.text.contains(&self.public_url) {
            return Some(
                "You cannot send FILEHOST URLs over a non-SSL connection. \
                 Please use an SSL connection."
                    .to_string(),
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(secure: bool, text: &str) -> OutboundMessage {
        OutboundMessage::new(
            MessageOrigin::Local {
                session_id: "s1".to_string(),
                secure,
            },
            "#chat",
            text,
        )
    }

    #[test]
    fn plaintext_session_sharing_url_is_denied() {
        let gate = SecureShareGate::new("http://host/upload", true);
        assert!(gate.check(&msg(false, "get http://host/upload/files/a.txt")).is_some());
    }

    #[test]
    fn tls_session_passes() {
        let gate = SecureShareGate::new("http://host/upload", true);
        assert!(gate.check(&msg(true, "get http://host/upload/files/a.txt")).is_none());
    }

    #[test]
    fn unrelated_text_and_disabled_gate_pass() {
        let gate = SecureShareGate::new("http://host/upload", true);
        assert!(gate.check(&msg(false, "hello world")).is_none());

        let off = SecureShareGate::new("http://host/upload", false);
        assert!(off.check(&msg(false, "get http://host/upload/files/a.txt")).is_none());
    }

    #[test]
    fn remote_messages_are_not_gated() {
        let gate = SecureShareGate::new("http://host/upload", true);
        let remote = OutboundMessage::new(
            MessageOrigin::Remote {
                server: "hub".to_string(),
            },
            "#chat",
            "http://host/upload/files/a.txt",
        );
        assert!(gate.check(&remote).is_none());
    }
}
