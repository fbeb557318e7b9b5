//! Token validator interface used by the credential gate.
use async_trait::async_trait;
use reqwest::StatusCode;

/// Outcome of one credential check.
///
/// Only `Valid` authorizes a request. `Rejected` and `Unreachable` are both
/// treated as unauthorized by callers (fail-closed); they stay distinct so the
/// gate can log them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCheck {
    /// The authority answered with a success status.
    Valid,
    /// The authority answered with any other status.
    Rejected { status: StatusCode },
    /// The authority could not be asked (connect/proxy error, timeout, bad request).
    Unreachable,
}

impl TokenCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Asks an external authority whether a credential currently authorizes a
/// mutating request.
///
/// Implementations hold no cache: every call is a fresh check. They never
/// return an error; transport failures are folded into `TokenCheck::Unreachable`.
#[async_trait]
pub trait TokenValidator: Send + Sync + 'static {
    // `credential` is the raw Authorization header value, scheme prefix included.
    async fn check(&self, credential: &str) -> TokenCheck;
}
