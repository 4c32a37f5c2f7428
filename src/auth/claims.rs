//! Offline decoding of the bearer credential's self-describing claims.
//!
//! Decoding here is advisory only: no signature verification is performed,
//! the server remains the source of truth for whether a credential is
//! accepted. The client decodes claims purely for local pre-filtering
//! (discarding tokens that are already past their own expiry) and for
//! scheduling the auto-logout timer.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Claims carried by a credential issued by the authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User identity the credential asserts
    pub sub: String,
    /// Display name baked into the token at issue time
    #[serde(default)]
    pub first_name: Option<String>,
    /// Issue time, Unix epoch seconds
    #[serde(default)]
    pub iat: Option<i64>,
    /// Expiry, Unix epoch seconds
    pub exp: i64,
}

impl Claims {
    /// Decode a raw credential string without verifying its signature.
    ///
    /// Fails with [`AuthError::MalformedToken`] when the string is not a
    /// parsable token or its payload is missing the expiry claim.
    pub fn decode(token: &str) -> Result<Self, AuthError> {
        let data = jsonwebtoken::dangerous::insecure_decode::<Claims>(token)
            .map_err(|e| AuthError::MalformedToken(e.to_string()))?;
        Ok(data.claims)
    }

    /// Expiry as a UTC timestamp.
    ///
    /// An `exp` outside chrono's representable range maps to the Unix epoch,
    /// which reads as long expired.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Issue time as a UTC timestamp, when the claim is present.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| Utc.timestamp_opt(iat, 0).single())
    }

    /// Whether the credential's own expiry has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at()
    }

    /// Time remaining until expiry. Negative once expired.
    pub fn time_until_expiry(&self) -> chrono::Duration {
        self.expires_at() - Utc::now()
    }
}

#[cfg(test)]
pub(crate) mod test_tokens {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    /// Build an unsigned token with the given subject and expiry.
    ///
    /// The signature segment is fake; decoding never checks it.
    pub fn token(sub: &str, exp: i64) -> String {
        let header = r#"{"alg":"HS256","typ":"JWT"}"#;
        let claims = format!(
            r#"{{"sub":"{}","first_name":"Ada","iat":1700000000,"exp":{}}}"#,
            sub, exp
        );
        format!(
            "{}.{}.fake_signature",
            URL_SAFE_NO_PAD.encode(header.as_bytes()),
            URL_SAFE_NO_PAD.encode(claims.as_bytes())
        )
    }

    /// Build a parsable token whose payload is missing the `exp` claim.
    pub fn token_without_exp(sub: &str) -> String {
        let header = r#"{"alg":"HS256","typ":"JWT"}"#;
        let claims = format!(r#"{{"sub":"{}"}}"#, sub);
        format!(
            "{}.{}.fake_signature",
            URL_SAFE_NO_PAD.encode(header.as_bytes()),
            URL_SAFE_NO_PAD.encode(claims.as_bytes())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_tokens::{token, token_without_exp};
    use super::*;

    #[test]
    fn decodes_claims_without_signature_verification() {
        let claims = Claims::decode(&token("user-1", 9_999_999_999)).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.first_name.as_deref(), Some("Ada"));
        assert_eq!(claims.exp, 9_999_999_999);
        assert!(!claims.is_expired());
    }

    #[test]
    fn expired_token_still_decodes() {
        // Local expiry is the session manager's decision, not the decoder's
        let claims = Claims::decode(&token("user-1", 1_000_000)).unwrap();
        assert!(claims.is_expired());
        assert!(claims.time_until_expiry() < chrono::Duration::zero());
    }

    #[test]
    fn garbage_is_malformed() {
        for raw in ["", "not-a-token", "a.b", "a.b.c.d", "%%%.%%%.%%%"] {
            assert!(
                matches!(Claims::decode(raw), Err(AuthError::MalformedToken(_))),
                "expected malformed for {:?}",
                raw
            );
        }
    }

    #[test]
    fn missing_exp_is_malformed() {
        let result = Claims::decode(&token_without_exp("user-1"));
        assert!(matches!(result, Err(AuthError::MalformedToken(_))));
    }

    #[test]
    fn issued_at_is_exposed() {
        let claims = Claims::decode(&token("user-1", 9_999_999_999)).unwrap();
        let iat = claims.issued_at().unwrap();
        assert_eq!(iat.timestamp(), 1_700_000_000);
    }
}
