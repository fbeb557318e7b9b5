// Factory: build the process-wide `TokenValidator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthorityClient, AuthorityError, TokenValidator};

pub fn build_token_validator(config: &Config) -> Result<Arc<dyn TokenValidator>, AuthorityError> {
    let client = AuthorityClient::new(&config.authority)?;

    tracing::info!(check_url = %client.check_url(), "using external authority");

    Ok(Arc::new(client))
}
