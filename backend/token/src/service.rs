//! Token issuance and verification.
//!
//! A token is `base64url(claims JSON) "." base64url(HMAC-SHA256)` where the
//! MAC is computed over the encoded claims with a deployment-wide secret.
//! Verification always recomputes the MAC over the received bytes; the
//! embedded fields are never trusted on their own.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// The one failure callers see. Bad signature, expiry, and malformed input
/// are deliberately not distinguished outside this module.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid or expired upload token")]
pub struct InvalidToken;

/// Internal rejection reasons, logged at debug level only.
#[derive(Debug, PartialEq, Eq)]
enum Reject {
    Malformed,
    BadSignature,
    Expired,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies signed, expiring authorization tokens.
///
/// Pure over its inputs, the secret, and the wall clock; no state, no
/// synchronization. A leaked token stays valid until natural expiry — there
/// is no revocation or single-use enforcement (known limitation).
pub struct TokenService {
    secret: Vec<u8>,
    issuer: String,
    ttl_seconds: u32,
}

impl TokenService {
    pub fn new(secret: impl Into<Vec<u8>>, issuer: impl Into<String>, ttl_seconds: u32) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u32 {
        self.ttl_seconds
    }

    /// Mint a token for `subject`, valid for the configured TTL.
    pub fn issue(&self, subject: &str) -> String {
        self.issue_at(subject, Utc::now())
    }

    /// Verify a token and return its subject.
    pub fn verify(&self, token: &str) -> Result<String, InvalidToken> {
        self.verify_at(token, Utc::now()).map_err(|reject| {
            debug!(?reject, "Rejected upload token");
            InvalidToken
        })
    }

    fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> String {
        let claims = Claims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + i64::from(self.ttl_seconds),
        };
        // Claims serialization cannot fail for this plain struct.
        let payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap_or_default());
        let sig = URL_SAFE_NO_PAD.encode(self.mac_for(payload.as_bytes()));
        format!("{payload}.{sig}")
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, Reject> {
        let (payload, sig) = token.split_once('.').ok_or(Reject::Malformed)?;
        let sig_bytes = URL_SAFE_NO_PAD.decode(sig).map_err(|_| Reject::Malformed)?;

        // Signature first: nothing in the payload is trusted before this.
        let mut mac = self.keyed_mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&sig_bytes).map_err(|_| Reject::BadSignature)?;

        let claims_bytes = URL_SAFE_NO_PAD.decode(payload).map_err(|_| Reject::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&claims_bytes).map_err(|_| Reject::Malformed)?;

        if now.timestamp() >= claims.exp {
            return Err(Reject::Expired);
        }
        Ok(claims.sub)
    }

    fn keyed_mac(&self) -> HmacSha256 {
        // HMAC-SHA256 accepts keys of any length.
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length")
    }

    fn mac_for(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = self.keyed_mac();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service() -> TokenService {
        TokenService::new("test-secret", "irc.example.net", 3600)
    }

    #[test]
    fn round_trip_returns_subject() {
        let svc = service();
        let token = svc.issue("alice");
        assert_eq!(svc.verify(&token), Ok("alice".to_string()));
    }

    #[test]
    fn expired_token_is_rejected_even_with_valid_signature() {
        let svc = service();
        let issued = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let token = svc.issue_at("alice", issued);

        // One second before expiry: still good.
        let almost = issued + chrono::Duration::seconds(3599);
        assert_eq!(svc.verify_at(&token, almost), Ok("alice".to_string()));

        // At expiry and beyond: rejected.
        let at_expiry = issued + chrono::Duration::seconds(3600);
        assert_eq!(svc.verify_at(&token, at_expiry), Err(Reject::Expired));
    }

    #[test]
    fn flipping_any_signature_bit_fails_verification() {
        let svc = service();
        let token = svc.issue("alice");
        let (payload, sig) = token.split_once('.').unwrap();
        let mut sig_bytes = URL_SAFE_NO_PAD.decode(sig).unwrap();
        for i in 0..sig_bytes.len() {
            sig_bytes[i] ^= 0x01;
            let tampered = format!("{payload}.{}", URL_SAFE_NO_PAD.encode(&sig_bytes));
            assert!(svc.verify(&tampered).is_err(), "bit flip at byte {i} accepted");
            sig_bytes[i] ^= 0x01;
        }
    }

    #[test]
    fn tampered_subject_fails_verification() {
        let svc = service();
        let token = svc.issue("alice");
        let (payload, sig) = token.split_once('.').unwrap();
        let claims = URL_SAFE_NO_PAD.decode(payload).unwrap();
        let forged = String::from_utf8(claims).unwrap().replace("alice", "mallory");
        let tampered = format!("{}.{sig}", URL_SAFE_NO_PAD.encode(forged.as_bytes()));
        assert!(svc.verify(&tampered).is_err());
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = service().issue("alice");
        let other = TokenService::new("other-secret", "irc.example.net", 3600);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected_as_malformed() {
        let svc = service();
        assert_eq!(svc.verify_at("not-a-token", Utc::now()), Err(Reject::Malformed));
        assert_eq!(svc.verify_at("a.b.c", Utc::now()), Err(Reject::Malformed));
        assert_eq!(svc.verify_at("", Utc::now()), Err(Reject::Malformed));
    }
}
