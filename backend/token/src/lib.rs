//! Upload-authorization tokens.
//!
//! Tokens are signed with a keyed MAC and expire on their own; nothing is
//! persisted server-side and there is no revocation. Validity is purely a
//! function of the token's contents, the shared secret, and the clock.

pub mod service;

pub use service::{InvalidToken, TokenService};
