use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/work", post(handlers::work))
        .route("/api/relax", post(handlers::relax))
        .route("/api/target", get(handlers::get_target).post(handlers::set_target))
        .with_state(state)
}
