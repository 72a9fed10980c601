//! HTTP surface of the filehost gateway: upload and retrieval handlers.
//!
//! Mounted under a configurable base URI. Upload accepts POST bodies with a
//! whitelisted content type; retrieval serves stored files back with MIME
//! types resolved by extension.

pub mod mime;
pub mod retrieve;
pub mod server;
pub mod upload;

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use filehost_core::FilehostError;
use filehost_token::TokenService;

/// State shared by all gateway routes.
#[derive(Clone)]
pub struct GatewayState {
    pub upload_root: Arc<PathBuf>,
    /// Base URI the routes are mounted under, leading slash, no trailing.
    pub base_uri: String,
    /// Full public URL of the gateway (`https://host[:port]<base_uri>`).
    pub public_url: String,
    /// Whether uploads require a credential at all.
    pub authenticate: bool,
    /// When present, presented tokens are verified; when absent, only
    /// credential presence is checked (original presence-only variant).
    pub tokens: Option<Arc<TokenService>>,
}

/// Build the gateway router with upload and retrieval routes mounted under
/// the configured base URI.
pub fn gateway_router(state: GatewayState) -> Router {
    let base = state.base_uri.clone();
    Router::new()
        .route(
            &base,
            post(upload::upload_file)
                .options(upload::upload_options)
                .fallback(upload::method_not_allowed),
        )
        .route(&format!("{base}/*path"), get(retrieve::serve_file))
        .with_state(state)
}

/// Rewrite every path-separator character to `_`.
///
/// This is the sole traversal defense for both upload and retrieval; it
/// must run before any path construction.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

/// The ISUPPORT-style advertisement entry the embedding chat server adds to
/// its token map.
pub fn isupport_entry(public_url: &str) -> (String, String) {
    ("FILEHOST".to_string(), public_url.to_string())
}

/// Convert a gateway error into its HTTP response.
///
/// Challenge and `Allow` headers are attached at the call sites that need
/// them.
pub(crate) fn error_response(err: FilehostError) -> Response {
    let status = match err {
        FilehostError::AuthRequired | FilehostError::InvalidToken => StatusCode::UNAUTHORIZED,
        FilehostError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        FilehostError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        FilehostError::NotFound => StatusCode::NOT_FOUND,
        FilehostError::StorageWriteFailure { .. } | FilehostError::StorageReadFailure { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        FilehostError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_rewrites_every_separator() {
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), ".._.._boot.ini");
        assert_eq!(sanitize_filename("plain.txt"), "plain.txt");
    }

    #[test]
    fn isupport_entry_carries_the_public_url() {
        let (key, value) = isupport_entry("https://irc.example.net/upload");
        assert_eq!(key, "FILEHOST");
        assert_eq!(value, "https://irc.example.net/upload");
    }
}
