use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::DocumentKind;

/// Largest accepted résumé, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Multipart field carrying the résumé.
pub const FILE_FIELD: &str = "file";

/// One multipart upload, held in memory for the duration of a request.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub kind: DocumentKind,
    pub bytes: Bytes,
}

/// Reads the `file` field: checks the file type from its name, then streams
/// the content and stops as soon as it grows past `MAX_UPLOAD_BYTES`.
/// Other fields are ignored.
pub async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let kind = validate_file_type(&filename)?;
        let bytes = read_limited(field, MAX_UPLOAD_BYTES).await?;

        return Ok(UploadedFile {
            filename,
            kind,
            bytes,
        });
    }

    Err(AppError::UnprocessableEntity(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

pub fn validate_file_type(filename: &str) -> Result<DocumentKind, AppError> {
    DocumentKind::from_filename(filename).ok_or_else(|| {
        info!(filename, "rejected upload: unsupported file type");
        AppError::UnsupportedFileType(format!(
            "Unsupported file type. Supported types: {}",
            DocumentKind::supported_list()
        ))
    })
}

pub fn validate_file_size(len: usize, limit: usize) -> Result<(), AppError> {
    if len > limit {
        info!(len, limit, "rejected upload: file too large");
        return Err(too_large(limit));
    }
    Ok(())
}

async fn read_limited(mut field: Field<'_>, limit: usize) -> Result<Bytes, AppError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        validate_file_size(buf.len() + chunk.len(), limit)?;
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

fn too_large(limit: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "File too large. Maximum size is {}MB",
        limit / (1024 * 1024)
    ))
}

/// Body-limit hits from the framework become the same 413 as our own size check.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(MAX_UPLOAD_BYTES)
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}
