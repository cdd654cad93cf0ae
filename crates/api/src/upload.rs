//! Multipart collection and on-disk storage of uploaded files.
//!
//! Files are written flat into the configured upload directory under a
//! generated name; only that name is recorded on the owning row.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use influx_core::files::{is_safe_file_name, stored_file_name};

use crate::error::{AppError, AppResult};

/// One file part of a multipart body, held in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Text fields and files of a multipart body, keyed by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Drain a multipart body. A part with a file name is treated as a file;
    /// everything else as text. Malformed bodies are a 400, bodies over the
    /// route's size limit a 413.
    pub async fn collect(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(multipart_error)?
        {
            let name = field.name().unwrap_or("").to_string();
            if name.is_empty() {
                continue;
            }
            match field.file_name().map(str::to_string) {
                Some(original_name) => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(multipart_error)?;
                    if !data.is_empty() {
                        form.files.insert(
                            name,
                            UploadedFile {
                                original_name: Some(original_name),
                                bytes: data.to_vec(),
                            },
                        );
                    }
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(multipart_error)?;
                    form.fields.insert(name, text);
                }
            }
        }
        Ok(form)
    }

    /// Trimmed, non-blank text value of a field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the maximum allowed size".into())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Write `file` into `dir` under a generated name and return that name.
pub async fn save_upload(dir: &Path, field: &str, file: &UploadedFile) -> AppResult<String> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let stored = stored_file_name(field, file.original_name.as_deref());
    tokio::fs::write(dir.join(&stored), &file.bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    tracing::debug!(field, stored = %stored, size = file.bytes.len(), "Upload stored");
    Ok(stored)
}

/// Delete stored files, logging rather than failing when one is missing.
pub async fn remove_uploads<'a>(dir: &Path, names: impl IntoIterator<Item = &'a str>) {
    for name in names {
        if !is_safe_file_name(name) {
            continue;
        }
        if let Err(e) = tokio::fs::remove_file(dir.join(name)).await {
            tracing::warn!(file = name, error = %e, "Failed to remove stored upload");
        }
    }
}

/// Resolve a stored file name inside `dir`, rejecting traversal attempts.
pub fn resolve_stored(dir: &Path, name: &str) -> AppResult<PathBuf> {
    if !is_safe_file_name(name) {
        return Err(AppError::BadRequest("Invalid file name".into()));
    }
    Ok(dir.join(name))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn save_and_remove_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = UploadedFile {
            original_name: Some("pan.PNG".into()),
            bytes: vec![1, 2, 3],
        };

        let stored = save_upload(dir.path(), "panCard", &file).await.unwrap();
        assert!(stored.starts_with("panCard-"));
        assert!(stored.ends_with(".png"));
        assert_eq!(tokio::fs::read(dir.path().join(&stored)).await.unwrap(), vec![1, 2, 3]);

        remove_uploads(dir.path(), [stored.as_str()]).await;
        assert!(!dir.path().join(&stored).exists());
    }

    #[tokio::test]
    async fn removing_a_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        remove_uploads(dir.path(), ["gone.pdf"]).await;
    }

    #[test]
    fn traversal_names_are_rejected() {
        let dir = Path::new("/srv/uploads");
        assert_matches!(resolve_stored(dir, "../etc/passwd"), Err(AppError::BadRequest(_)));
        assert_matches!(resolve_stored(dir, ".."), Err(AppError::BadRequest(_)));
        assert_eq!(
            resolve_stored(dir, "brief-1.pdf").unwrap(),
            PathBuf::from("/srv/uploads/brief-1.pdf")
        );
    }
}
