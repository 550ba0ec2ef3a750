use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::document::mutations::{EducationField, ExperienceField, PersonalField, SkillField};
use crate::errors::AppError;
use crate::latex;
use crate::models::resume::ResumeDocument;
use crate::models::session::SessionRow;
use crate::state::AppState;

/// Session state returned from every read and mutation. `latex` is
/// re-rendered from the current document on each response, never cached.
#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub document: ResumeDocument,
    pub latex: String,
    pub updated_at: DateTime<Utc>,
}

impl SessionResponse {
    fn from_row(row: SessionRow) -> Self {
        let latex = latex::render(&row.document);
        SessionResponse {
            session_id: row.id,
            document: row.document,
            latex,
            updated_at: row.updated_at,
        }
    }
}

/// Append responses additionally carry the id assigned to the new entry, so
/// the client can address follow-up edits.
#[derive(Serialize)]
pub struct AppendResponse {
    pub entry_id: Uuid,
    #[serde(flatten)]
    pub session: SessionResponse,
}

#[derive(Deserialize)]
pub struct SummaryUpdate {
    pub summary: String,
}

#[derive(Serialize)]
pub struct LatexResponse {
    pub latex: String,
}

fn session_not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let row = state.sessions.create();
    info!("Created session {}", row.id);
    (StatusCode::CREATED, Json(SessionResponse::from_row(row)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let row = state
        .sessions
        .get(session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse::from_row(row)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(session_id) {
        return Err(session_not_found(session_id));
    }
    info!("Ended session {session_id}");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar fields
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/v1/sessions/:id/personal
pub async fn handle_set_personal_field(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(patch): Json<PersonalField>,
) -> Result<Json<SessionResponse>, AppError> {
    let (row, ()) = state
        .sessions
        .update(session_id, |doc| (doc.with_personal_field(patch), ()))
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse::from_row(row)))
}

/// PUT /api/v1/sessions/:id/summary
pub async fn handle_set_summary(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(update): Json<SummaryUpdate>,
) -> Result<Json<SessionResponse>, AppError> {
    let (row, ()) = state
        .sessions
        .update(session_id, |doc| (doc.with_summary(update.summary), ()))
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse::from_row(row)))
}

// ────────────────────────────────────────────────────────────────────────────
// Education list
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/education
pub async fn handle_append_education(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AppendResponse>, AppError> {
    let (row, entry_id) = state
        .sessions
        .update(session_id, |doc| doc.with_new_education())
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(AppendResponse {
        entry_id,
        session: SessionResponse::from_row(row),
    }))
}

/// PATCH /api/v1/sessions/:id/education/:entry_id
///
/// An unknown entry id leaves the document unchanged and still returns 200:
/// the client may race a removal against an in-flight edit.
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path((session_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<EducationField>,
) -> Result<Json<SessionResponse>, AppError> {
    let (row, ()) = state
        .sessions
        .update(session_id, |doc| {
            (doc.with_education_field(entry_id, patch), ())
        })
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse::from_row(row)))
}

/// DELETE /api/v1/sessions/:id/education/:entry_id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path((session_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SessionResponse>, AppError> {
    let (row, ()) = state
        .sessions
        .update(session_id, |doc| (doc.without_education(entry_id), ()))
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse::from_row(row)))
}

// ────────────────────────────────────────────────────────────────────────────
// Experience list
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/experience
pub async fn handle_append_experience(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AppendResponse>, AppError> {
    let (row, entry_id) = state
        .sessions
        .update(session_id, |doc| doc.with_new_experience())
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(AppendResponse {
        entry_id,
        session: SessionResponse::from_row(row),
    }))
}

/// PATCH /api/v1/sessions/:id/experience/:entry_id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path((session_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<ExperienceField>,
) -> Result<Json<SessionResponse>, AppError> {
    let (row, ()) = state
        .sessions
        .update(session_id, |doc| {
            (doc.with_experience_field(entry_id, patch), ())
        })
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse::from_row(row)))
}

/// DELETE /api/v1/sessions/:id/experience/:entry_id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path((session_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SessionResponse>, AppError> {
    let (row, ()) = state
        .sessions
        .update(session_id, |doc| (doc.without_experience(entry_id), ()))
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse::from_row(row)))
}

// ────────────────────────────────────────────────────────────────────────────
// Skill list
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/skills
pub async fn handle_append_skill(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AppendResponse>, AppError> {
    let (row, entry_id) = state
        .sessions
        .update(session_id, |doc| doc.with_new_skill())
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(AppendResponse {
        entry_id,
        session: SessionResponse::from_row(row),
    }))
}

/// PATCH /api/v1/sessions/:id/skills/:entry_id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    Path((session_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<SkillField>,
) -> Result<Json<SessionResponse>, AppError> {
    let (row, ()) = state
        .sessions
        .update(session_id, |doc| (doc.with_skill_field(entry_id, patch), ()))
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse::from_row(row)))
}

/// DELETE /api/v1/sessions/:id/skills/:entry_id
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path((session_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SessionResponse>, AppError> {
    let (row, ()) = state
        .sessions
        .update(session_id, |doc| (doc.without_skill(entry_id), ()))
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse::from_row(row)))
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/latex
pub async fn handle_get_latex(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<LatexResponse>, AppError> {
    let row = state
        .sessions
        .get(session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(LatexResponse {
        latex: latex::render(&row.document),
    }))
}
