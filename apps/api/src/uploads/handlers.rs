use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{FileUpload, NewTheme};
use crate::state::AppState;
use crate::uploads::extract::{
    extract_text, format_file_size, resolve_mime_type, sanitize_filename, theme_draft,
    ALLOWED_MIME_TYPES,
};

const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct UploadView {
    #[serde(flatten)]
    pub upload: FileUpload,
    pub size_label: String,
}

impl From<FileUpload> for UploadView {
    fn from(upload: FileUpload) -> Self {
        let size_label = format_file_size(upload.size.max(0) as u64);
        Self { upload, size_label }
    }
}

/// Upload record plus the theme proposed from it. The client confirms the
/// draft by posting it (possibly edited) to `/api/v1/themes`.
#[derive(Serialize)]
pub struct UploadResponse {
    pub upload: UploadView,
    pub theme_draft: NewTheme,
}

struct ReceivedFile {
    original_name: String,
    declared_type: Option<String>,
    bytes: Bytes,
}

/// POST /api/v1/uploads
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let file = read_file_field(&mut multipart).await?;

    let mime_type = resolve_mime_type(file.declared_type.as_deref(), &file.original_name)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "unsupported file type; allowed: {}",
                ALLOWED_MIME_TYPES.join(", ")
            ))
        })?;
    if file.bytes.is_empty() {
        return Err(AppError::Validation("file is empty".to_string()));
    }
    let max = state.config.upload_max_bytes();
    if file.bytes.len() as u64 > max {
        return Err(AppError::Validation(format!(
            "file is too large; maximum size is {}",
            format_file_size(max)
        )));
    }

    let id = Uuid::new_v4();
    let filename = sanitize_filename(&file.original_name);

    let extracted_text = {
        let bytes = file.bytes.clone();
        tokio::task::spawn_blocking(move || extract_text(mime_type, &bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Text extraction task failed: {e}")))?
    };
    let extracted_text = match extracted_text {
        Ok(text) => text,
        Err(e) => {
            warn!("Upload {id}: {e:#}");
            None
        }
    };

    let url = store_object(&state, id, &filename, mime_type, file.bytes.clone()).await?;

    let now = Utc::now();
    let upload = FileUpload {
        id,
        filename,
        original_name: file.original_name,
        mime_type: mime_type.to_string(),
        size: file.bytes.len() as i64,
        url,
        processed_at: extracted_text.as_ref().map(|_| now),
        extracted_text,
        created_at: now,
    };
    state.store.insert_upload(&upload).await?;
    info!(
        "Stored upload {} ({}, {})",
        upload.id,
        upload.mime_type,
        format_file_size(upload.size as u64)
    );

    let theme_draft = theme_draft(&upload);
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            upload: upload.into(),
            theme_draft,
        }),
    ))
}

/// GET /api/v1/uploads/:id
pub async fn handle_get_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UploadView>, AppError> {
    let upload = state
        .store
        .get_upload(id)
        .await?
        .ok_or_else(|| AppError::not_found("Upload", id))?;
    Ok(Json(upload.into()))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<ReceivedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::Validation("file name is required".to_string()))?;
        let declared_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        return Ok(ReceivedFile {
            original_name,
            declared_type,
            bytes,
        });
    }
    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

/// Puts the file under `uploads/<id>/<filename>` when S3 is configured and
/// returns its URL; `None` otherwise.
async fn store_object(
    state: &AppState,
    id: Uuid,
    filename: &str,
    mime_type: &str,
    bytes: Bytes,
) -> Result<Option<String>, AppError> {
    let (Some(s3), Some(s3_config)) = (&state.s3, &state.config.s3) else {
        return Ok(None);
    };

    let key = format!("uploads/{id}/{filename}");
    s3.put_object()
        .bucket(&s3_config.bucket)
        .key(&key)
        .body(ByteStream::from(bytes))
        .content_type(mime_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    info!("Uploaded s3://{}/{}", s3_config.bucket, key);
    Ok(Some(format!(
        "{}/{}/{}",
        s3_config.endpoint.trim_end_matches('/'),
        s3_config.bucket,
        key
    )))
}
