use crate::error::AppError;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Strip anything outside ASCII alphanumerics, `.`, `-` and `_` from a
/// picker-supplied file name. Empty input falls back to a generic name.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "image.png".to_string()
    } else {
        cleaned
    }
}

/// Content sniff; extensions are not trusted.
pub fn is_image(bytes: &[u8]) -> bool {
    infer::get(bytes)
        .map(|kind| kind.mime_type().starts_with("image/"))
        .unwrap_or(false)
}

/// Write an upload into the archive directory under a fresh id.
/// Payloads that do not sniff as an image are rejected before touching disk.
pub async fn archive_upload(dir: &Path, original_name: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
    if !is_image(bytes) {
        return Err("Uploaded file is not a valid image".into());
    }

    tokio::fs::create_dir_all(dir).await.map_err(|e| AppError {
        message: format!("Failed to create archive directory {}: {}", dir.display(), e),
    })?;

    let file_id = Uuid::new_v4();
    let dest = dir.join(format!("{}_{}", file_id, sanitize_file_name(original_name)));

    tokio::fs::write(&dest, bytes).await.map_err(|e| AppError {
        message: format!("Failed to write {}: {}", dest.display(), e),
    })?;

    Ok(dest)
}
