//! Upload handler: POST of raw file bytes under the base URI.
//!
//! Runs the request through a fixed sequence of checks, terminating at the
//! first applicable exit: OPTIONS preflight, method, credential, content
//! type, filename derivation, storage write.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use rand::Rng;
use std::collections::HashMap;
use tracing::{info, warn};

use filehost_core::FilehostError;

use crate::{error_response, mime, sanitize_filename, GatewayState};

const ALLOWED_METHODS: &str = "OPTIONS, POST";

/// OPTIONS on the base URI: CORS preflight plus the accepted-type listing.
/// No auth check.
pub async fn upload_options() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::ALLOW, ALLOWED_METHODS.parse().unwrap());
    headers.insert("Access-Control-Allow-Origin", "*".parse().unwrap());
    headers.insert("Access-Control-Allow-Methods", "POST, OPTIONS".parse().unwrap());
    headers.insert(
        "Access-Control-Allow-Headers",
        "Content-Type, Content-Disposition, Content-Length, Authorization"
            .parse()
            .unwrap(),
    );
    headers.insert("Accept-Post", mime::accept_post().parse().unwrap());
    (StatusCode::OK, headers).into_response()
}

/// Any method other than POST or OPTIONS on the base URI.
pub async fn method_not_allowed() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::ALLOW, ALLOWED_METHODS.parse().unwrap());
    let mut response = error_response(FilehostError::MethodNotAllowed);
    response.headers_mut().extend(headers);
    response
}

/// POST on the base URI: store the body and answer 201 with the file URL.
pub async fn upload_file(
    State(state): State<GatewayState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if state.authenticate {
        let Some(credential) = presented_credential(&headers, &params) else {
            let mut response = error_response(FilehostError::AuthRequired);
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                "Bearer realm=\"filehost\"".parse().unwrap(),
            );
            return response;
        };
        // With a signing secret configured the token is verified; without
        // one, presence of a credential is all that is checked.
        if let Some(tokens) = &state.tokens {
            match tokens.verify(&credential) {
                Ok(subject) => info!(subject = %subject, "Authorized upload"),
                Err(_) => return error_response(FilehostError::InvalidToken),
            }
        }
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .unwrap_or_default();
    let Some(extension) = mime::extension_for_mime(&content_type) else {
        return error_response(FilehostError::UnsupportedMediaType);
    };

    let filename = derive_filename(
        headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok()),
        extension,
    );

    let full_path = state.upload_root.join(&filename);
    if let Err(e) = tokio::fs::write(&full_path, &body).await {
        warn!(path = %full_path.display(), error = %e, "Failed to write uploaded file");
        return error_response(FilehostError::StorageWriteFailure {
            path: full_path.display().to_string(),
            reason: e.to_string(),
        });
    }

    info!(filename = %filename, bytes = body.len(), "Stored uploaded file");

    let location = format!("{}/{}", state.base_uri, filename);
    let public_url = format!("{}/{}", state.public_url, filename);
    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, location.parse().unwrap());
    headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
    (StatusCode::CREATED, headers, public_url).into_response()
}

/// The upload credential: `Authorization: Bearer <token>` or a `token`
/// query parameter (the form the FILEHOST command hands out).
fn presented_credential(headers: &HeaderMap, params: &HashMap<String, String>) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        let token = value.strip_prefix("Bearer ").unwrap_or(value);
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }
    params.get("token").filter(|t| !t.is_empty()).cloned()
}

/// Derive the storage filename from an optional `Content-Disposition`
/// header. Sanitization runs before the name is used for anything.
fn derive_filename(content_disposition: Option<&str>, extension: &str) -> String {
    let provided = content_disposition.and_then(parse_disposition_filename);
    match provided {
        Some(name) if !name.is_empty() => {
            let mut name = sanitize_filename(&name);
            if !name.contains('.') {
                name.push('.');
                name.push_str(extension);
            }
            name
        }
        _ => format!("{}.{}", random_name(), extension),
    }
}

/// Extract `filename="..."` out of a Content-Disposition value.
fn parse_disposition_filename(value: &str) -> Option<String> {
    let start = value.find("filename=\"")? + "filename=\"".len();
    let rest = &value[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

/// 16 random hex characters, for uploads that name no file.
fn random_name() -> String {
    let bytes: [u8; 8] = rand::thread_rng().gen();
    hex::encode(bytes)
}
