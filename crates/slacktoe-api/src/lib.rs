pub mod replies;
pub mod slash;
pub mod state;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Slack posts every `/ttt` invocation to `/`; a `GET /` is its certificate
/// check.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(slash::verify).post(slash::handle_command))
        .with_state(state)
}
