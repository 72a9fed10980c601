//! The file-uploader tag handler.
//!
//! Detects gateway share URLs inside outbound message text, classifies the
//! referenced file, attaches the metadata as a vendor tag, and broadcasts a
//! tag-only copy to every connected peer that negotiated the capability.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use filehost_core::{CapabilityCheck, MessageOrigin, OutboundMessage, PeerSink};

use crate::classify::{classify, FileType};
use crate::pipeline::TagHandler;
use crate::session_state::SessionTagStats;

/// Vendor-scoped tag name carrying the share metadata.
pub const FILE_UPLOADER_TAG: &str = "+kiwiirc.com/fileuploader";

/// Characters stripped from the end of a detected URL token.
const TRAILING_PUNCTUATION: &[char] = &[
    ',', '.', ';', ':', '!', '?', '\'', '"', '(', ')', '[', ']', '{', '}',
];

/// Metadata derived from one shared URL. Ephemeral: recomputed per message,
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub url: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

impl FileMetadata {
    /// Build metadata from a detected share URL. `None` when the URL names
    /// no file at all.
    pub fn from_url(url: String) -> Option<Self> {
        let filename = filename_from_url(&url)?;
        let file_type = classify(&filename);
        Some(Self {
            url,
            filename,
            file_type,
        })
    }
}

/// Find the share URL inside a message: the maximal non-whitespace token
/// starting at a literal `<public_url>/files/` occurrence, with trailing
/// punctuation stripped.
pub fn detect_share_url(text: &str, public_url: &str) -> Option<String> {
    let needle = format!("{}/files/", public_url.trim_end_matches('/'));
    let start = text.find(&needle)?;
    let token = text[start..].split_whitespace().next()?;
    Some(token.trim_end_matches(TRAILING_PUNCTUATION).to_string())
}

/// The filename is everything after the last `/files/` segment, minus any
/// query string.
pub fn filename_from_url(url: &str) -> Option<String> {
    let (_, after) = url.rsplit_once("/files/")?;
    let name = after.split('?').next().unwrap_or(after);
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// Tag handler for shared gateway files.
pub struct FileUploadTagger {
    public_url: String,
    caps: Arc<dyn CapabilityCheck>,
    sink: Arc<dyn PeerSink>,
    stats: Arc<SessionTagStats>,
}

impl FileUploadTagger {
    pub fn new(
        public_url: impl Into<String>,
        caps: Arc<dyn CapabilityCheck>,
        sink: Arc<dyn PeerSink>,
        stats: Arc<SessionTagStats>,
    ) -> Self {
        Self {
            public_url: public_url.into(),
            caps,
            sink,
            stats,
        }
    }
}

#[async_trait]
impl TagHandler for FileUploadTagger {
    fn tag_name(&self) -> &str {
        FILE_UPLOADER_TAG
    }

    async fn on_outbound(&self, msg: &mut OutboundMessage) -> Result<()> {
        let Some(url) = detect_share_url(&msg.text, &self.public_url) else {
            return Ok(());
        };
        let Some(meta) = FileMetadata::from_url(url) else {
            return Ok(());
        };

        let value = serde_json::to_string(&meta)?;
        debug!(url = %meta.url, file_type = ?meta.file_type, "Tagged shared file");
        msg.tags.insert(FILE_UPLOADER_TAG.to_string(), value.clone());

        if let MessageOrigin::Local { session_id, .. } = &msg.origin {
            self.stats.record(session_id).await;
        }

        // Tag-only copy to every capability-enabled peer, independent of
        // whether the original message reaches them.
        let broadcast = OutboundMessage::tag_only(&msg.target, FILE_UPLOADER_TAG, value);
        for peer in self.sink.connected_peers().await {
            if self.caps.is_enabled(&peer) {
                self.sink.send_to(&peer, &broadcast).await?;
            }
        }
        Ok(())
    }
}
