use crate::errors::ImageError;
use bytes::Bytes;
use std::path::Path;
use tracing::debug;

fn save_failure(path: &Path, error: std::io::Error) -> ImageError {
    ImageError::save(format!("Failed to save image: {}", error))
        .with_detail("save_path", path.display().to_string())
        .with_detail("error", error.to_string())
}

/// Writes `data` to `path`, creating missing parent directories first.
pub async fn save_image(path: &Path, data: &Bytes) -> Result<(), ImageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| save_failure(path, e))?;
    }

    tokio::fs::write(path, data)
        .await
        .map_err(|e| save_failure(path, e))?;

    debug!(path = %path.display(), bytes = data.len(), "saved image");
    Ok(())
}
