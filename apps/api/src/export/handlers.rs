use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::gateway::{self, ExportAction};
use crate::latex;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    /// When true the server also pushes the payload to the export endpoint.
    /// The push is fire-and-forget; the response never waits on it.
    #[serde(default)]
    pub push: bool,
}

#[derive(Serialize)]
pub struct ExportResponse {
    pub action: ExportAction,
    pub pushed: bool,
}

/// POST /api/v1/sessions/:id/export
pub async fn handle_export(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<ExportResponse>, AppError> {
    let row = state
        .sessions
        .get(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let rendered = latex::render(&row.document);
    let action = gateway::build_export_action(&rendered, &state.config.export_endpoint)?;
    info!(
        "Built export action for session {session_id} ({} encoded bytes)",
        action.encoded_snip.len()
    );

    if query.push {
        let client = state.http.clone();
        let push_action = action.clone();
        tokio::spawn(async move {
            gateway::dispatch(&client, &push_action).await;
        });
    }

    Ok(Json(ExportResponse {
        action,
        pushed: query.push,
    }))
}
