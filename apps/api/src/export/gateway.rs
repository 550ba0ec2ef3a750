//! Export gateway — builds the submission descriptor for the external
//! editing service and optionally fires it off.
//!
//! The gateway guarantees two things: the payload is transport-safe
//! (URL-encoded form body) and it always carries the COMPLETE rendered
//! document. Oversized payloads are rejected, never truncated.

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Upper bound on the URL-encoded snippet the import endpoint accepts.
pub const MAX_ENCODED_SNIP_BYTES: usize = 1_048_576;

/// Form field the import endpoint reads the encoded document from.
pub const FORM_FIELD: &str = "encoded_snip";

const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("encoded payload is {size} bytes, over the {limit} byte transport limit")]
    TooLarge { size: usize, limit: usize },
}

/// Submission descriptor for one export hand-off. Carries everything a
/// client (or the server-side dispatcher) needs to perform the POST.
#[derive(Debug, Clone, Serialize)]
pub struct ExportAction {
    pub endpoint: String,
    pub method: String,
    pub content_type: String,
    pub field_name: String,
    /// URL-encoded form of the complete rendered document.
    pub encoded_snip: String,
}

/// Packages a rendered document for submission to `endpoint`.
pub fn build_export_action(rendered: &str, endpoint: &str) -> Result<ExportAction, ExportError> {
    let encoded = urlencoding::encode(rendered).into_owned();
    if encoded.len() > MAX_ENCODED_SNIP_BYTES {
        return Err(ExportError::TooLarge {
            size: encoded.len(),
            limit: MAX_ENCODED_SNIP_BYTES,
        });
    }

    Ok(ExportAction {
        endpoint: endpoint.to_string(),
        method: "POST".to_string(),
        content_type: CONTENT_TYPE_FORM.to_string(),
        field_name: FORM_FIELD.to_string(),
        encoded_snip: encoded,
    })
}

/// Fire-and-forget hand-off. Failures are logged and swallowed: the editing
/// session does not depend on the external service, and the response body
/// is never consumed.
pub async fn dispatch(client: &Client, action: &ExportAction) {
    let body = format!("{}={}", action.field_name, action.encoded_snip);
    let result = client
        .post(&action.endpoint)
        .header("Content-Type", action.content_type.as_str())
        .body(body)
        .send()
        .await;

    match result {
        Ok(response) => debug!("Export hand-off accepted with status {}", response.status()),
        Err(e) => warn!("Export hand-off failed: {e}"),
    }
}
