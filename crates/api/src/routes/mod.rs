pub mod health;
pub mod placements;

use axum::Router;

use crate::state::AppState;

pub fn health_router(state: AppState) -> Router {
    health::router(state)
}

pub fn catalog_router(state: AppState) -> Router {
    placements::catalog_router(state)
}

pub fn purchase_router(state: AppState) -> Router {
    placements::purchase_router(state)
}
