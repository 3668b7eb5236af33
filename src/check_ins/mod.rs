use crate::state::AppState;
use axum::Router;

mod dto;
pub mod eligibility;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::check_in_routes()
}
