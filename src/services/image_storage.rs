use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::StorageError;

/// Largest accepted upload (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Stores uploaded item images and hands back a public URL
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn store(&self, bytes: Vec<u8>, extension: &str) -> Result<String, InternalError>;
}

/// Check size and type limits, returning the normalized extension
pub fn check_upload(bytes: &[u8], extension: &str) -> Result<String, StorageError> {
    if bytes.is_empty() {
        return Err(StorageError::Empty);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(StorageError::TooLarge {
            size: bytes.len(),
            max: MAX_IMAGE_BYTES,
        });
    }

    let extension = extension.trim().trim_start_matches('.').to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(StorageError::UnsupportedType(extension));
    }

    Ok(extension)
}

/// Writes images to a local directory served under `/images`
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    directory: PathBuf,
    public_base_url: String,
}

impl LocalImageStorage {
    pub fn new(directory: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, bytes: Vec<u8>, extension: &str) -> Result<String, InternalError> {
        let extension = check_upload(&bytes, extension)?;
        let file_name = format!("{}.{}", Uuid::new_v4(), extension);

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| StorageError::Io {
                operation: "create_image_dir".to_string(),
                source,
            })?;

        tokio::fs::write(self.directory.join(&file_name), &bytes)
            .await
            .map_err(|source| StorageError::Io {
                operation: "write_image".to_string(),
                source,
            })?;

        tracing::info!("Stored image {} ({} bytes)", file_name, bytes.len());

        Ok(format!("{}/images/{}", self.public_base_url, file_name))
    }
}
