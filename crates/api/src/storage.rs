//! Storage for uploaded movie images.
//!
//! Handlers validate the content type and size, then hand the bytes to an
//! [`ImageStore`], which persists them and returns the public URL to record
//! on the movie.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

/// Accepted image content types and the file extension each is stored under.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

/// File extension for an accepted image content type, or `None` if the type
/// is not accepted.
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    IMAGE_TYPES
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(essence))
        .map(|(_, ext)| *ext)
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist an image and return its public URL.
    async fn save(&self, data: Vec<u8>, content_type: &str) -> anyhow::Result<String>;

    /// Delete an image previously returned by [`save`](Self::save).
    async fn remove(&self, url: &str) -> anyhow::Result<()>;
}

/// Writes images to a local directory served at `/uploads`.
pub struct LocalImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalImageStore {
    pub fn new(root: PathBuf, public_base_url: impl Into<String>) -> Self {
        Self {
            root,
            public_base_url: public_base_url.into(),
        }
    }

    fn url_prefix(&self) -> String {
        format!("{}/uploads/", self.public_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, data: Vec<u8>, content_type: &str) -> anyhow::Result<String> {
        let ext = image_extension(content_type)
            .with_context(|| format!("Unsupported image type '{content_type}'"))?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create {}", self.root.display()))?;

        let file_name = format!("{}.{ext}", Uuid::new_v4());
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, &data)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Image stored");

        Ok(format!("{}{file_name}", self.url_prefix()))
    }

    async fn remove(&self, url: &str) -> anyhow::Result<()> {
        let prefix = self.url_prefix();
        // Only bare file names directly under the upload root.
        let file_name = url
            .strip_prefix(prefix.as_str())
            .filter(|name| {
                !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
            })
            .with_context(|| format!("'{url}' is not a stored image"))?;

        let path = self.root.join(file_name);
        tokio::fs::remove_file(&path)
            .await
            .with_context(|| format!("Failed to remove {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Image removed");
        Ok(())
    }
}
