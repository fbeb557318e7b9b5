//! Credential gate for mutating routes.
//!
//! 1. no `Authorization` header -> 401, the authority is not contacted
//! 2. header present -> `TokenValidator::check` (one remote call, no cache)
//! 3. anything but `TokenCheck::Valid` -> 401
//! 4. `Valid` -> the wrapped handler runs
//!
//! Attached with `route_layer` to individual method routes, so it runs before
//! body extraction and before any repository access.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::TokenCheck;
use crate::state::AppState;

pub async fn require_valid_credential(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        tracing::info!(method = %req.method(), uri = %req.uri(), "no credential in header");
        return Err(AppError::Unauthorized);
    };

    // "verbatim" means visible ASCII here: obs-text bytes (0x80+) are refused
    // without contacting the authority.
    let credential = value.to_str().map_err(|_| {
        tracing::warn!("authorization header is not visible ascii");
        AppError::Unauthorized
    })?;

    let outcome = state.tokens.check(credential).await;

    match outcome {
        TokenCheck::Valid => Ok(next.run(req).await),
        TokenCheck::Rejected { status } => {
            tracing::warn!(%status, "credential rejected by authority");
            Err(AppError::Unauthorized)
        }
        TokenCheck::Unreachable => {
            tracing::warn!("authority unreachable, failing closed");
            Err(AppError::Unauthorized)
        }
    }
}
