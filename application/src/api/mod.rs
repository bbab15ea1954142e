//! HTTP API definitions.

pub mod reservations;
pub mod rooms;

use axum::{
    routing::{get, post},
    Router,
};

/// Builds the [`Router`] of the HTTP API.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/rooms", get(rooms::list))
        .route("/rooms/:id", get(rooms::by_id))
        .route("/reservations", post(reservations::create))
        .route(
            "/reservations/:id",
            get(reservations::by_id).patch(reservations::update),
        )
        .route("/reservations/:id/next", post(reservations::next))
        .route("/reservations/:id/prev", post(reservations::prev))
        .route("/reservations/:id/step", post(reservations::step))
        .route("/reservations/:id/submit", post(reservations::submit))
        .route("/reservations/:id/reset", post(reservations::reset))
}
