//! Filehost runtime configuration schema.
//!
//! Mirrors the `<filehost>` config tag of the original service, typed for
//! serde YAML deserialization.

use serde::{Deserialize, Serialize};

/// Lower bound for `token_expiry`, seconds.
pub const TOKEN_EXPIRY_MIN: u32 = 60;
/// Upper bound for `token_expiry`, seconds.
pub const TOKEN_EXPIRY_MAX: u32 = 86_400;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilehostConfig {
    /// Storage root for uploaded files.
    pub uploadpath: String,
    /// Base URI the HTTP handlers are mounted under.
    pub uri: String,
    /// Require an upload credential.
    pub authenticate: bool,
    /// Deny sharing filehost URLs from non-TLS chat sessions.
    pub requiressl: bool,
    /// Explicit public URL; when unset it is built from hostname/port/ssl.
    pub website: Option<String>,
    pub hostname: String,
    /// Public port; 0 omits the port from the constructed URL.
    pub port: u16,
    pub ssl: bool,
    /// Shared secret for token signing. Empty means tokens are not
    /// validated and the upload handler only checks credential presence.
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Token lifetime in seconds, clamped to [60, 86400] on normalize.
    pub token_expiry: u32,
    /// Notice sent to sessions that invoke FILEHOST without an account.
    pub auth_message: String,
    /// Human-readable size limit advertised by `FILEHOST info`.
    pub max_upload_size: String,
    /// Bind address for the HTTP server.
    pub listen: String,
    pub log_dir: String,
    pub log_level: String,
}

impl Default for FilehostConfig {
    fn default() -> Self {
        Self {
            uploadpath: "data/uploads".to_string(),
            uri: "/upload".to_string(),
            authenticate: true,
            requiressl: true,
            website: None,
            hostname: "localhost".to_string(),
            port: 0,
            ssl: true,
            jwt_secret: String::new(),
            jwt_issuer: "filehost".to_string(),
            token_expiry: 3600,
            auth_message: "You must be logged in to an account to upload files.".to_string(),
            max_upload_size: "10M".to_string(),
            listen: "127.0.0.1:8080".to_string(),
            log_dir: "logs".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl FilehostConfig {
    /// Normalize in place: base URI gets a leading slash and loses any
    /// trailing one, and `token_expiry` is clamped to its bounds.
    pub fn normalize(&mut self) {
        if !self.uri.starts_with('/') {
            self.uri = format!("/{}", self.uri);
        }
        while self.uri.len() > 1 && self.uri.ends_with('/') {
            self.uri.pop();
        }
        self.token_expiry = self.token_expiry.clamp(TOKEN_EXPIRY_MIN, TOKEN_EXPIRY_MAX);
    }

    /// The full public URL of the gateway: `website` when configured,
    /// otherwise `http(s)://hostname[:port]<uri>`.
    pub fn public_url(&self) -> String {
        if let Some(site) = &self.website {
            if !site.is_empty() {
                return site.trim_end_matches('/').to_string();
            }
        }
        let protocol = if self.ssl { "https" } else { "http" };
        let mut url = format!("{protocol}://{}", self.hostname);
        if self.port > 0 {
            url.push_str(&format!(":{}", self.port));
        }
        url.push_str(&self.uri);
        url
    }
}
