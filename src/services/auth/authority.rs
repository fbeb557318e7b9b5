//! HTTP client for the External Authority's credential check endpoint.
//!
//! `POST {base_url}{check_path}` with the credential forwarded verbatim in
//! `Authorization`. Only the response status is inspected.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use thiserror::Error;
use url::Url;

use crate::config::AuthorityConfig;
use crate::services::auth::validator::{TokenCheck, TokenValidator};

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("invalid authority url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid proxy: {0}")]
    InvalidProxy(reqwest::Error),
    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct AuthorityClient {
    client: reqwest::Client,
    check_url: Url,
}

impl AuthorityClient {
    pub fn new(config: &AuthorityConfig) -> Result<Self, AuthorityError> {
        let check_url = check_url(&config.base_url, &config.check_path)?;

        let builder = reqwest::Client::builder().timeout(config.timeout);

        // only the configured proxy; reqwest's system proxy lookup is disabled
        let builder = match &config.proxy {
            Some(proxy) => {
                builder.proxy(reqwest::Proxy::http(proxy).map_err(AuthorityError::InvalidProxy)?)
            }
            None => builder.no_proxy(),
        };

        let client = builder.build().map_err(AuthorityError::Client)?;

        Ok(Self { client, check_url })
    }

    pub fn check_url(&self) -> &Url {
        &self.check_url
    }
}

// "http://auth/oauth" + "check_token" -> "http://auth/oauth/check_token"
fn check_url(base_url: &Url, check_path: &str) -> Result<Url, url::ParseError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(check_path.trim_start_matches('/'))
}

#[async_trait]
impl TokenValidator for AuthorityClient {
    async fn check(&self, credential: &str) -> TokenCheck {
        let resp = self
            .client
            .post(self.check_url.clone())
            .header(AUTHORIZATION, credential)
            .send()
            .await;

        match resp {
            Ok(resp) if resp.status().is_success() => TokenCheck::Valid,
            Ok(resp) => TokenCheck::Rejected {
                status: resp.status(),
            },
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    timeout = err.is_timeout(),
                    connect = err.is_connect(),
                    url = %self.check_url,
                    "authority check failed"
                );
                TokenCheck::Unreachable
            }
        }
    }
}
