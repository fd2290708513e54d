use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::application::services::{NOTHING_EXTRACTED_MESSAGE, UploadOutcome, UploadRequest};
use crate::domain::{Document, DocumentTask};
use crate::presentation::state::AppState;

use super::api_types::{NothingExtractedResponse, UploadData, UploadResponse};
use super::chat::parse_session_id;
use super::{ApiError, OwnerIdentity};

struct UploadForm {
    filename: String,
    data: Bytes,
    task: Option<String>,
    session_id: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut task = None;
    let mut session_id = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(ApiError::new(
                    e.status(),
                    format!("Failed to read upload: {}", e.body_text()),
                ));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        let read_error =
            |e: axum::extract::multipart::MultipartError| ApiError::new(e.status(), e.body_text());

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await.map_err(read_error)?;
                file = Some((filename, data));
            }
            "task" => task = Some(field.text().await.map_err(read_error)?),
            "sessionId" => session_id = Some(field.text().await.map_err(read_error)?),
            other => tracing::debug!(field = %other, "Ignoring unknown multipart field"),
        }
    }

    let (filename, data) = file.ok_or_else(|| ApiError::bad_request("Please upload a file"))?;
    Ok(UploadForm {
        filename,
        data,
        task,
        session_id,
    })
}

#[tracing::instrument(skip(state, multipart), fields(owner_id = %owner_id))]
pub async fn upload_handler(
    State(state): State<AppState>,
    OwnerIdentity(owner_id): OwnerIdentity,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(multipart).await?;
    if form.data.len() > state.max_upload_bytes {
        return Err(ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "File exceeds the {} MB upload limit",
                state.max_upload_bytes / (1024 * 1024)
            ),
        ));
    }
    if form.data.is_empty() {
        return Err(ApiError::bad_request("Uploaded file is empty"));
    }

    let session_id = parse_session_id(form.session_id.as_deref())?;
    let task = DocumentTask::parse(form.task.as_deref());
    let document = Document::new(form.filename, form.data.len() as u64);

    tracing::debug!(
        filename = %document.filename,
        format = %document.format,
        bytes = document.size_bytes,
        "File upload received"
    );

    let staged = state
        .staging_store
        .store(&document.filename, form.data)
        .await
        .map_err(|e| ApiError::internal("File processing failed", e))?;

    let pipeline = state.upload_pipeline.clone();
    let request = UploadRequest {
        owner_id,
        session_id,
        task,
        document,
        staged,
    };

    // Detached so a dropped connection still finishes and cleans up.
    let outcome = tokio::spawn(async move { pipeline.run(request).await })
        .await
        .map_err(|e| ApiError::internal("File processing failed", e))??;

    let response = match outcome {
        UploadOutcome::Processed {
            session_id,
            file_name,
            preview,
            result,
            failed_segments,
        } => Json(UploadResponse {
            success: true,
            session_id: session_id.to_string(),
            data: UploadData {
                file_name,
                original_text: preview,
                result,
                failed_segments,
            },
        })
        .into_response(),
        UploadOutcome::NothingExtracted { file_name } => Json(NothingExtractedResponse {
            success: true,
            file_name,
            extracted_text: String::new(),
            message: NOTHING_EXTRACTED_MESSAGE.to_string(),
        })
        .into_response(),
    };

    Ok(response)
}
