//! Ordered tag-handler pipeline.
//!
//! Each handler owns one vendor-scoped tag namespace and is evaluated in
//! registration order; no handler suppresses another. Tag production is
//! one-directional: a locally originated message may never set a handled
//! tag itself — only the gateway attaches them — while a remote-origin
//! message that already carries a tag is relayed as-is.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use filehost_core::{MessageOrigin, OutboundMessage};

use crate::secure::SecureShareGate;

/// A single vendor-scoped tag handler.
#[async_trait]
pub trait TagHandler: Send + Sync {
    /// The one tag name this handler may touch.
    fn tag_name(&self) -> &str;

    fn enabled(&self) -> bool {
        true
    }

    /// Inspect one outbound message and attach this handler's tag when it
    /// applies. Must not touch any other namespace.
    async fn on_outbound(&self, msg: &mut OutboundMessage) -> Result<()>;
}

/// What the pipeline decided about a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineVerdict {
    Deliver,
    /// Delivery denied; the notice goes back to the sender instead.
    Deny { notice: String },
}

/// The ordered collection of tag handlers, run on every outbound message
/// before delivery.
#[derive(Default)]
pub struct TagPipeline {
    handlers: Vec<Arc<dyn TagHandler>>,
    gate: Option<SecureShareGate>,
}

impl TagPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gate(mut self, gate: SecureShareGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Handlers run in registration order.
    pub fn register(&mut self, handler: Arc<dyn TagHandler>) {
        self.handlers.push(handler);
    }

    pub async fn process(&self, msg: &mut OutboundMessage) -> Result<PipelineVerdict> {
        if let Some(gate) = &self.gate {
            if let Some(notice) = gate.check(msg) {
                return Ok(PipelineVerdict::Deny { notice });
            }
        }

        for handler in &self.handlers {
            let name = handler.tag_name().to_string();
            match &msg.origin {
                // Remote tags are trusted and relayed untouched.
                MessageOrigin::Remote { .. } if msg.tags.contains_key(&name) => continue,
                // A local client may not originate a gateway tag.
                MessageOrigin::Local { .. } => {
                    if msg.tags.remove(&name).is_some() {
                        debug!(tag = %name, "Stripped client-originated tag");
                    }
                }
                _ => {}
            }
            if handler.enabled() {
                handler.on_outbound(msg).await?;
            }
        }
        Ok(PipelineVerdict::Deliver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Marker {
        name: String,
        order: Arc<AtomicUsize>,
        seen_at: AtomicUsize,
    }

    #[async_trait]
    impl TagHandler for Marker {
        fn tag_name(&self) -> &str {
            &self.name
        }

        async fn on_outbound(&self, msg: &mut OutboundMessage) -> Result<()> {
            let position = self.order.fetch_add(1, Ordering::SeqCst);
            self.seen_at.store(position + 1, Ordering::SeqCst);
            msg.tags.insert(self.name.clone(), position.to_string());
            Ok(())
        }
    }

    fn local_msg(text: &str) -> OutboundMessage {
        OutboundMessage::new(
            MessageOrigin::Local {
                session_id: "s1".to_string(),
                secure: true,
            },
            "#chat",
            text,
        )
    }

    #[tokio::test]
    async fn handlers_run_in_registration_order() {
        let order = Arc::new(AtomicUsize::new(0));
        let first = Arc::new(Marker {
            name: "+vendor/a".to_string(),
            order: order.clone(),
            seen_at: AtomicUsize::new(0),
        });
        let second = Arc::new(Marker {
            name: "+vendor/b".to_string(),
            order: order.clone(),
            seen_at: AtomicUsize::new(0),
        });

        let mut pipeline = TagPipeline::new();
        pipeline.register(first.clone());
        pipeline.register(second.clone());

        let mut msg = local_msg("hi");
        let verdict = pipeline.process(&mut msg).await.unwrap();
        assert_eq!(verdict, PipelineVerdict::Deliver);
        assert_eq!(first.seen_at.load(Ordering::SeqCst), 1);
        assert_eq!(second.seen_at.load(Ordering::SeqCst), 2);
        assert!(msg.tags.contains_key("+vendor/a"));
        assert!(msg.tags.contains_key("+vendor/b"));
    }

    #[tokio::test]
    async fn client_originated_tag_is_stripped_before_handlers_run() {
        struct Noop;
        #[async_trait]
        impl TagHandler for Noop {
            fn tag_name(&self) -> &str {
                "+vendor/a"
            }
            async fn on_outbound(&self, _msg: &mut OutboundMessage) -> Result<()> {
                Ok(())
            }
        }

        let mut pipeline = TagPipeline::new();
        pipeline.register(Arc::new(Noop));

        let mut msg = local_msg("hi");
        msg.tags.insert("+vendor/a".to_string(), "forged".to_string());
        msg.tags.insert("+other/tag".to_string(), "kept".to_string());
        pipeline.process(&mut msg).await.unwrap();

        // The handled namespace is cleared; foreign namespaces are not.
        assert!(!msg.tags.contains_key("+vendor/a"));
        assert!(msg.tags.contains_key("+other/tag"));
    }

    #[tokio::test]
    async fn remote_tag_is_relayed_as_is() {
        let order = Arc::new(AtomicUsize::new(0));
        let handler = Arc::new(Marker {
            name: "+vendor/a".to_string(),
            order,
            seen_at: AtomicUsize::new(0),
        });
        let mut pipeline = TagPipeline::new();
        pipeline.register(handler.clone());

        let mut msg = OutboundMessage::new(
            MessageOrigin::Remote {
                server: "hub.example.net".to_string(),
            },
            "#chat",
            "hi",
        );
        msg.tags.insert("+vendor/a".to_string(), "upstream".to_string());
        pipeline.process(&mut msg).await.unwrap();

        assert_eq!(msg.tags.get("+vendor/a").map(String::as_str), Some("upstream"));
        assert_eq!(handler.seen_at.load(Ordering::SeqCst), 0);
    }
}
