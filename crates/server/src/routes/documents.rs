// crates/server/src/routes/documents.rs
//! Upload and language-detection endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::documents::StoredDocument;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response for a successful upload.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub document_id: Uuid,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub file_size: u64,
    pub status: String,
}

/// One entry of the fixed language-detection list.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
pub struct LanguageDetection {
    pub code: String,
    pub name: String,
    pub confidence: f64,
    pub flag: String,
}

impl LanguageDetection {
    fn new(code: &str, name: &str, confidence: f64, flag: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            confidence,
            flag: flag.to_string(),
        }
    }
}

/// POST /api/documents/upload - Accept one multipart `file` field.
///
/// 400 if the field is missing or the file is empty.
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read file field: {e}")))?;
        if data.is_empty() {
            return Err(ApiError::BadRequest("uploaded file is empty".to_string()));
        }

        let file_size = data.len() as u64;
        let document_id = state.documents.insert(StoredDocument {
            file_name: file_name.clone(),
            content_type: content_type.clone(),
            size: file_size,
            uploaded_at: Utc::now(),
            data,
        });
        tracing::info!(%document_id, file_size, "document uploaded");

        return Ok(Json(UploadResponse {
            document_id,
            file_name,
            content_type,
            file_size,
            status: "uploaded".to_string(),
        }));
    }

    Err(ApiError::BadRequest("missing \"file\" field".to_string()))
}

/// GET /api/documents/languages/{document_id} - Fixed illustrative list.
///
/// Stub collaborator: no real detection happens, but unknown documents
/// still 404 so clients can't probe arbitrary ids.
pub async fn detect_languages(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<Uuid>,
) -> ApiResult<Json<Vec<LanguageDetection>>> {
    if !state.documents.exists(document_id) {
        return Err(ApiError::DocumentNotFound(document_id));
    }

    Ok(Json(vec![
        LanguageDetection::new("en", "English", 95.5, "\u{1f1fa}\u{1f1f8}"),
        LanguageDetection::new("es", "Spanish", 78.2, "\u{1f1ea}\u{1f1f8}"),
        LanguageDetection::new("fr", "French", 45.1, "\u{1f1eb}\u{1f1f7}"),
    ]))
}

/// Create the documents routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/documents/upload", post(upload_document))
        .route("/documents/languages/{document_id}", get(detect_languages))
}
