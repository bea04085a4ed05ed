//! Local-disk storage for generated design images.

use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Media storage failure.
#[derive(Debug, thiserror::Error)]
#[error("Media store error: {0}")]
pub struct MediaError(String);

/// Writes design images under a media root and hands back the public
/// path they are served from.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MediaStore { root: root.into() }
    }

    /// Saves PNG bytes for a design and returns its public URL path.
    pub async fn save_design(&self, design_id: &str, bytes: &[u8]) -> Result<String, MediaError> {
        let dir = self.root.join("designs");
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| MediaError(e.to_string()))?;

        let path = dir.join(format!("{design_id}.png"));
        fs::write(&path, bytes)
            .await
            .map_err(|e| MediaError(e.to_string()))?;

        debug!(path = %path.display(), "Design image saved");
        Ok(format!("/media/designs/{design_id}.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_design_round_trip() {
        let root = std::env::temp_dir().join(format!("sartor-media-{}", uuid::Uuid::new_v4()));
        let store = MediaStore::new(&root);

        let url = store.save_design("d1", b"png-bytes").await.unwrap();
        assert_eq!(url, "/media/designs/d1.png");

        let on_disk = tokio::fs::read(root.join("designs/d1.png")).await.unwrap();
        assert_eq!(on_disk, b"png-bytes");

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
