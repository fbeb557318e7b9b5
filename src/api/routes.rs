/*
 * Responsibility
 * - URL structure under /api
 * - the credential gate is attached per method: POST/PUT are gated, GET is not
 */
use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::handlers::users::{create_user, get_user, update_user};
use crate::middleware::auth::access::require_valid_credential;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    // route_layer only wraps the methods registered before it,
    // so `get` has to come after.
    let user = post(create_user)
        .put(update_user)
        .route_layer(middleware::from_fn_with_state(
            state,
            require_valid_credential,
        ))
        .get(get_user);

    Router::new().route("/users/{last_name}/{first_name}", user)
}
