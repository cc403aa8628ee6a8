//! Bulk upload of `.txt` / `.csv` email lists.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
};

use crate::alumni::{BulkIngestReport, UploadKind, ingest};
use crate::error::IngestError;
use crate::web::server::PortalState;
use crate::web::types::ApiError;

/// Name of the multipart field carrying the file.
const FILE_FIELD: &str = "file";

pub async fn bulk_upload_handler(
    State(state): State<Arc<PortalState>>,
    mut multipart: Multipart,
) -> Result<Json<BulkIngestReport>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IngestError::Processing(e.body_text()))?
    {
        // A part without a filename is a form value, not a file.
        let filename = match (field.name(), field.file_name()) {
            (Some(FILE_FIELD), Some(name)) => name.to_string(),
            _ => continue,
        };
        let kind = UploadKind::from_filename(&filename)?;

        let content = field
            .bytes()
            .await
            .map_err(|e| IngestError::Processing(e.body_text()))?;

        tracing::debug!(filename = %filename, bytes = content.len(), "Received bulk upload");
        let report = ingest(&state.generator, kind, &content)?;
        return Ok(Json(report));
    }

    Err(IngestError::MissingFile.into())
}
