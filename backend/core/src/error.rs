use thiserror::Error;

/// Top-level error taxonomy for the filehost gateway.
///
/// Every failure is handled at the boundary where it is detected and turned
/// into an HTTP status plus a short body, or a chat notice. Nothing here is
/// process-fatal.
#[derive(Debug, Error)]
pub enum FilehostError {
    #[error("authentication is required to upload files")]
    AuthRequired,

    /// Covers bad signature, expiry, and malformed tokens without
    /// distinguishing which.
    #[error("invalid or expired upload token")]
    InvalidToken,

    #[error("the provided content type is not supported")]
    UnsupportedMediaType,

    #[error("only POST requests are allowed for file uploads")]
    MethodNotAllowed,

    #[error("the requested file was not found")]
    NotFound,

    #[error("failed to write uploaded file: {reason}")]
    StorageWriteFailure { path: String, reason: String },

    #[error("failed to read file: {reason}")]
    StorageReadFailure { path: String, reason: String },

    #[error("malformed request: {0}")]
    MalformedRequest(String),
}
