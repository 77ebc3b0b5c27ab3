//! Image upload: multipart field `image`, stored under `<uploads>/projects/` and returned as a
//! path relative to the `/uploads` mount.

use crate::error::AppError;
use crate::response::uploaded;
use crate::state::AppState;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

pub const UPLOAD_FIELD: &str = "image";
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Stored name: `<unix millis>_<sanitized original name>`.
pub fn stored_file_name(original: &str, now_millis: i64) -> String {
    format!("{}_{}", now_millis, sanitize_file_name(original))
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::BadRequest(e.body_text())
    }
}

/// POST /api/upload
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let limit = state.settings.max_upload_bytes;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !ALLOWED_MIME_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::BadRequest("Unsupported file type".into()));
        }
        let original = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit))?;

        let dir = state.settings.project_uploads_dir();
        tokio::fs::create_dir_all(&dir).await?;
        let file_name = stored_file_name(&original, chrono::Utc::now().timestamp_millis());
        tokio::fs::write(dir.join(&file_name), &bytes).await?;
        tracing::info!(file = %file_name, bytes = bytes.len(), "image uploaded");
        return Ok(uploaded(format!("/uploads/projects/{}", file_name)));
    }
    Err(AppError::BadRequest("No file uploaded".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_characters_are_replaced() {
        assert_eq!(sanitize_file_name("my photo (1).JPG"), "my_photo__1_.JPG");
        assert_eq!(sanitize_file_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_file_name("صورة.png"), "____.png");
    }

    #[test]
    fn stored_name_is_prefixed_with_timestamp() {
        assert_eq!(stored_file_name("a b.png", 1700000000000), "1700000000000_a_b.png");
    }
}
