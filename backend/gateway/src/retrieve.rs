//! Retrieval handler: GET/HEAD of stored files under the base URI.
//!
//! The remainder of the path after the base prefix goes through the same
//! separator rewrite as upload, so a stored file can only ever be addressed
//! by its flat name.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use filehost_core::FilehostError;

use crate::{error_response, mime, sanitize_filename, GatewayState};

/// GET/HEAD `<base>/<path>` — serve a stored file. Axum answers HEAD for
/// this route by dropping the body, which leaves exactly the headers.
pub async fn serve_file(
    Path(path): Path<String>,
    State(state): State<GatewayState>,
) -> Response {
    let filename = sanitize_filename(path.trim_start_matches('/'));
    if filename.is_empty() {
        return error_response(FilehostError::NotFound);
    }

    let full_path = state.upload_root.join(&filename);
    debug!(path = %full_path.display(), "Serving stored file");

    match tokio::fs::read(&full_path).await {
        Ok(bytes) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                mime::mime_for_filename(&filename).parse().unwrap(),
            );
            headers.insert(
                header::CONTENT_LENGTH,
                bytes.len().to_string().parse().unwrap(),
            );
            (StatusCode::OK, headers, bytes).into_response()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error_response(FilehostError::NotFound)
        }
        Err(e) => {
            warn!(path = %full_path.display(), error = %e, "Failed to read stored file");
            error_response(FilehostError::StorageReadFailure {
                path: full_path.display().to_string(),
                reason: e.to_string(),
            })
        }
    }
}
