//! Background image storage on the local filesystem

use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

/// Extensions accepted for background images
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Largest request body accepted by the upload endpoint
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Errors raised while storing or removing background images
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Invalid or missing file")]
    InvalidFile,

    #[error("File too large")]
    TooLarge,

    #[error("failed to create upload directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {path}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Stores uploaded background images in a single directory
#[derive(Debug, Clone)]
pub struct AssetStore {
    upload_dir: PathBuf,
}

impl AssetStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self { upload_dir: upload_dir.into() }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), AssetError> {
        fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|source| AssetError::CreateDir { path: self.upload_dir.clone(), source })
    }

    /// Validate and persist an upload, returning the stored filename
    pub async fn store(&self, original_name: &str, contents: &[u8]) -> Result<String, AssetError> {
        if !allowed_file(original_name) {
            debug!("Rejected upload with name {:?}", original_name);
            return Err(AssetError::InvalidFile);
        }

        let filename = secure_filename(original_name);
        if !allowed_file(&filename) {
            debug!("Upload name {:?} sanitized to unusable {:?}", original_name, filename);
            return Err(AssetError::InvalidFile);
        }

        self.ensure_dir().await?;
        let path = self.upload_dir.join(&filename);
        fs::write(&path, contents)
            .await
            .map_err(|source| AssetError::Write { path: path.clone(), source })?;

        info!("Stored background image {} ({} bytes)", path.display(), contents.len());
        Ok(filename)
    }

    /// Delete a stored image. Returns whether a file was actually removed.
    pub async fn remove(&self, filename: &str) -> Result<bool, AssetError> {
        // Never follow names that could escape the upload directory
        if filename.is_empty() || secure_filename(filename) != filename {
            debug!("Refusing to remove {:?} from upload directory", filename);
            return Ok(false);
        }

        let path = self.upload_dir.join(filename);
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("Removed background image {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Background image {} not in upload directory", path.display());
                Ok(false)
            }
            Err(source) => Err(AssetError::Remove { path, source }),
        }
    }
}

/// Check the file extension against the allowed set, case-insensitively
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reduce a client-supplied name to a plain, safe filename.
///
/// Accented letters are decomposed (NFKD) so their ASCII base survives,
/// path separators and whitespace become underscores, anything outside
/// `[A-Za-z0-9._-]` is dropped and leading or trailing dots and underscores
/// are trimmed.
pub fn secure_filename(filename: &str) -> String {
    let flattened: String = filename
        .nfkd()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(allowed_file("photo.png"));
        assert!(allowed_file("Photo.JPEG"));
        assert!(allowed_file("archive.tar.gif"));
        assert!(!allowed_file("photo.exe"));
        assert!(!allowed_file("png"));
        assert!(!allowed_file(""));
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("my cat.jpg"), "my_cat.jpg");
        assert_eq!(secure_filename("../../etc/passwd.png"), "etc_passwd.png");
        assert_eq!(secure_filename("C:\\Users\\me\\sky.gif"), "C_Users_me_sky.gif");
        assert_eq!(secure_filename(".hidden.png"), "hidden.png");
        assert_eq!(secure_filename("café.png"), "cafe.png");
        assert_eq!(secure_filename("ünïcode.jpg"), "unicode.jpg");
        assert_eq!(secure_filename("日本.png"), "png");
    }

    #[tokio::test]
    async fn test_store_and_remove() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let store = AssetStore::new(dir.path().join("uploads"));

        let filename = store.store("my photo.PNG", b"not really a png").await?;
        assert_eq!(filename, "my_photo.PNG");
        assert_eq!(std::fs::read(dir.path().join("uploads").join(&filename))?, b"not really a png");

        assert!(store.remove(&filename).await?);
        assert!(!store.remove(&filename).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_store_rejects_disallowed_extension() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let store = AssetStore::new(dir.path());

        let result = store.store("photo.exe", b"MZ").await;
        assert!(matches!(result, Err(AssetError::InvalidFile)));
        assert!(!dir.path().join("photo.exe").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_refuses_path_traversal() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let outside = dir.path().join("keep.png");
        std::fs::write(&outside, b"x")?;
        let store = AssetStore::new(dir.path().join("uploads"));

        assert!(!store.remove("../keep.png").await?);
        assert!(outside.exists());
        Ok(())
    }
}
