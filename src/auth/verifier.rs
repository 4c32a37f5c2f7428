//! Remote confirmation that a credential is still accepted server-side.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// Verifier request timeout.
/// Startup blocks on this call, so it must fail fast rather than hang.
const VERIFY_TIMEOUT_SECS: u64 = 10;

/// Outcome of asking the authority about a credential.
///
/// `Rejected` deliberately covers both an explicit server rejection and any
/// transport failure: the caller treats "network down" and "credential
/// revoked" identically and fails closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Accepted,
    Rejected(String),
}

impl Verification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verification::Accepted)
    }
}

/// Asks the remote authority whether it currently accepts a credential.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Single round trip, no retries.
    async fn verify(&self, token: &str) -> Verification;
}

/// Production verifier bound to `GET {base_url}/auth/verify`.
///
/// A 2xx response is `Accepted`; anything else - non-2xx status, timeout,
/// unreachable host - is `Rejected`.
pub struct HttpVerifier {
    client: Client,
    base_url: String,
}

impl HttpVerifier {
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(VERIFY_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Reuse an existing client (and its connection pool).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TokenVerifier for HttpVerifier {
    async fn verify(&self, token: &str) -> Verification {
        let url = format!("{}/auth/verify", self.base_url);
        debug!(url = %url, "Verifying credential with authority");

        let response = match self.client.get(&url).bearer_auth(token).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Credential verification request failed");
                return Verification::Rejected(format!("request failed: {}", e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Authority accepted credential");
            Verification::Accepted
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Authority rejected credential");
            Verification::Rejected(format!("HTTP {}: {}", status, body))
        }
    }
}
