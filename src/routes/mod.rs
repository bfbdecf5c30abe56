use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod business;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod orders;
pub mod partners;
pub mod reviews;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/orders", orders::router())
        .nest("/reviews", reviews::router())
        .nest("/users", users::router())
        .nest("/business", business::router())
        .nest("/partners", partners::router())
        .nest("/admin", admin::router())
}
