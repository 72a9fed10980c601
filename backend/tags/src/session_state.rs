//! Per-session tag usage statistics.
//!
//! Owned by this subsystem and keyed by session identifier; entries are
//! created lazily on first use and torn down explicitly when the session
//! ends.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Usage counters for one session.
#[derive(Debug, Clone)]
pub struct TagUsage {
    pub uploads: u64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Map of session id → tag usage.
#[derive(Default)]
pub struct SessionTagStats {
    sessions: RwLock<HashMap<String, TagUsage>>,
}

impl SessionTagStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tagged share for a session, creating the entry lazily.
    pub async fn record(&self, session_id: &str) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let usage = sessions.entry(session_id.to_string()).or_insert(TagUsage {
            uploads: 0,
            first_seen: now,
            last_seen: now,
        });
        usage.uploads += 1;
        usage.last_seen = now;
    }

    pub async fn usage(&self, session_id: &str) -> Option<TagUsage> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Human-readable stats line, `None` if the session never shared.
    pub async fn format_stats(&self, session_id: &str) -> Option<String> {
        let usage = self.usage(session_id).await?;
        Some(format!(
            "First seen: {}, Last seen: {}, Uploads: {}",
            usage.first_seen.format("%Y-%m-%d %H:%M:%S"),
            usage.last_seen.format("%Y-%m-%d %H:%M:%S"),
            usage.uploads,
        ))
    }

    /// Tear down the entry for a session that disconnected.
    pub async fn end_session(&self, session_id: &str) {
        if self.sessions.write().await.remove(session_id).is_some() {
            debug!(session_id = %session_id, "Dropped tag usage for ended session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_lazily_and_counts() {
        let stats = SessionTagStats::new();
        assert!(stats.usage("s1").await.is_none());

        stats.record("s1").await;
        stats.record("s1").await;
        let usage = stats.usage("s1").await.unwrap();
        assert_eq!(usage.uploads, 2);
        assert!(usage.first_seen <= usage.last_seen);
    }

    #[tokio::test]
    async fn end_session_tears_down_the_entry() {
        let stats = SessionTagStats::new();
        stats.record("s1").await;
        stats.end_session("s1").await;
        assert!(stats.usage("s1").await.is_none());
        // Ending an unknown session is a no-op.
        stats.end_session("s2").await;
    }

    #[tokio::test]
    async fn format_stats_reports_upload_count() {
        let stats = SessionTagStats::new();
        stats.record("s1").await;
        let line = stats.format_stats("s1").await.unwrap();
        assert!(line.contains("Uploads: 1"));
        assert!(stats.format_stats("never").await.is_none());
    }
}
