pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Dashboard
        .route(
            "/api/v1/resumes",
            get(handlers::handle_list_resumes).post(handlers::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id/touch",
            post(handlers::handle_touch_resume),
        )
        .route(
            "/api/v1/resumes/:id/share",
            get(handlers::handle_share_resume),
        )
        // Editor
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get_resume).put(handlers::handle_save_resume),
        )
        .route(
            "/api/v1/resumes/:id/fields",
            patch(handlers::handle_update_field),
        )
        .route(
            "/api/v1/resumes/:id/sections/:section",
            post(handlers::handle_add_entry),
        )
        .route(
            "/api/v1/resumes/:id/sections/:section/:index",
            delete(handlers::handle_remove_entry),
        )
        .route("/api/v1/validate", post(handlers::handle_validate_field))
        .route("/api/v1/catalog", get(handlers::handle_catalog))
        // Export
        .route(
            "/api/v1/resumes/:id/preview",
            get(handlers::handle_preview),
        )
        .route("/api/v1/resumes/:id/pdf", get(handlers::handle_pdf))
        .with_state(state)
}
