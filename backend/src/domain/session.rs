//! Signed, time-limited session tokens.
//!
//! A token embeds the holder's email and an expiry 24 hours after issue,
//! authenticated with HMAC-SHA256. Verification here is claim-only; the
//! fetch mode that also loads the live user lives on the account service.
//! Tokens are not tracked server-side, so logout merely clears the client's
//! cookie and an issued token stays valid until its natural expiry.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::domain::error::Error;
use crate::domain::user::Email;

type HmacSha256 = Hmac<Sha256>;

/// Token lifetime: 24 hours, matching the cookie max-age.
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Serialize, Deserialize)]
struct Claims {
    email: String,
    exp: i64,
}

/// Issues and verifies session tokens.
///
/// All verification failures (absent/malformed token, bad signature,
/// expiry) collapse into the same Unauthenticated condition so callers
/// cannot distinguish them.
pub struct SessionAuthenticator {
    key: Vec<u8>,
    clock: Arc<dyn Clock>,
}

impl SessionAuthenticator {
    /// Construct an authenticator over a signing key and clock.
    pub fn new(key: impl Into<Vec<u8>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            key: key.into(),
            clock,
        }
    }

    fn mac(&self, payload: &[u8]) -> Result<HmacSha256, Error> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|err| Error::internal(format!("token key rejected by HMAC: {err}")))?;
        mac.update(payload);
        Ok(mac)
    }

    /// Issue a signed token for `email`, expiring [`TOKEN_TTL_HOURS`] from now.
    pub fn issue(&self, email: &Email) -> Result<String, Error> {
        let exp = self.clock.utc() + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            email: email.as_ref().to_owned(),
            exp: exp.timestamp(),
        };
        let payload = serde_json::to_vec(&claims)
            .map_err(|err| Error::internal(format!("failed to encode token claims: {err}")))?;
        let tag = self.mac(&payload)?.finalize().into_bytes();
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(tag)
        ))
    }

    /// Claim-only verification: decode, check signature and expiry, and
    /// extract the email without touching storage.
    pub fn verify(&self, token: &str) -> Result<Email, Error> {
        let (payload_b64, tag_b64) = token
            .split_once('.')
            .ok_or_else(Self::unauthenticated)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| Self::unauthenticated())?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| Self::unauthenticated())?;

        self.mac(&payload)?
            .verify_slice(&tag)
            .map_err(|_| Self::unauthenticated())?;

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| Self::unauthenticated())?;
        if self.clock.utc().timestamp() > claims.exp {
            return Err(Self::unauthenticated());
        }
        Email::new(claims.email).map_err(|_| Self::unauthenticated())
    }

    fn unauthenticated() -> Error {
        Error::unauthorized("Unauthorized access.")
    }
}
