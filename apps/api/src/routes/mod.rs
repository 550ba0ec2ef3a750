pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::document::handlers;
use crate::export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_end_session),
        )
        // Scalar fields
        .route(
            "/api/v1/sessions/:id/personal",
            patch(handlers::handle_set_personal_field),
        )
        .route(
            "/api/v1/sessions/:id/summary",
            put(handlers::handle_set_summary),
        )
        // Education list
        .route(
            "/api/v1/sessions/:id/education",
            post(handlers::handle_append_education),
        )
        .route(
            "/api/v1/sessions/:id/education/:entry_id",
            patch(handlers::handle_update_education).delete(handlers::handle_remove_education),
        )
        // Experience list
        .route(
            "/api/v1/sessions/:id/experience",
            post(handlers::handle_append_experience),
        )
        .route(
            "/api/v1/sessions/:id/experience/:entry_id",
            patch(handlers::handle_update_experience).delete(handlers::handle_remove_experience),
        )
        // Skill list
        .route(
            "/api/v1/sessions/:id/skills",
            post(handlers::handle_append_skill),
        )
        .route(
            "/api/v1/sessions/:id/skills/:entry_id",
            patch(handlers::handle_update_skill).delete(handlers::handle_remove_skill),
        )
        // Rendering + export
        .route(
            "/api/v1/sessions/:id/latex",
            get(handlers::handle_get_latex),
        )
        .route(
            "/api/v1/sessions/:id/export",
            post(export::handlers::handle_export),
        )
        .with_state(state)
}
