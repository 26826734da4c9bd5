//! On-disk storage for uploaded resumes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};
use uuid::Uuid;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_TEXT: &str = "text/plain";

/// Content types accepted on upload.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[MIME_PDF, MIME_DOCX, MIME_DOC, MIME_TEXT];

const FALLBACK_FILENAME: &str = "resume";

/// Ignores parameters such as `; charset=utf-8`.
pub fn is_allowed_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_CONTENT_TYPES.contains(&essence.as_str())
}

/// Final path component of a client-supplied file name, so uploads can
/// never escape the upload directory.
pub fn sanitize_filename(original: &str) -> String {
    let normalized = original.replace('\\', "/");
    let name = normalized
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches('.');
    if name.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        name.to_string()
    }
}

/// `{user_id}_{unix_seconds}_{name}`: unique per user per second, and keeps
/// the extension the extractor infers the format from.
pub fn stored_file_name(user_id: Uuid, unix_seconds: i64, sanitized: &str) -> String {
    format!("{user_id}_{unix_seconds}_{sanitized}")
}

pub async fn ensure_upload_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;
    info!("Upload directory ready at {}", dir.display());
    Ok(())
}

pub async fn save_upload(dir: &Path, file_name: &str, data: &[u8]) -> Result<PathBuf> {
    let path = dir.join(file_name);
    tokio::fs::write(&path, data)
        .await
        .with_context(|| format!("Failed to write upload {}", path.display()))?;
    Ok(path)
}

/// Best effort: a file that is already gone is not an error.
pub async fn remove_upload(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to delete upload {}: {e}", path.display()),
    }
}
