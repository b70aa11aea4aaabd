//! Upload storage.
//!
//! Thin wrapper over the upload directory: creation at startup, random
//! collision-resistant filenames, async save/read, and the image-only
//! listing the `/list` endpoint serves. Every request writes to a distinct
//! generated filename, so no coordination between concurrent writers is
//! needed.

use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Characters used in generated filenames (lowercase alphanumeric,
/// 36^8 combinations for the random part).
const FILENAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const FILENAME_RANDOM_LEN: usize = 8;

/// Extensions the listing endpoint exposes.
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Handle to the upload directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Open the upload directory, creating it if absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate a `{prefix}_{8 random chars}.jpg` filename.
    pub fn random_name(prefix: &str) -> String {
        let mut rng = rand::thread_rng();
        let random: String = (0..FILENAME_RANDOM_LEN)
            .map(|_| FILENAME_CHARSET[rng.gen_range(0..FILENAME_CHARSET.len())] as char)
            .collect();
        format!("{}_{}.jpg", prefix, random)
    }

    /// Persist `bytes` under `name`, returning the full path.
    pub async fn save(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.root.join(sanitize(name));
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Read a stored file. Returns `None` when the file does not exist;
    /// other I/O failures are surfaced as errors.
    pub async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.root.join(sanitize(name));
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List stored image filenames (`.jpg`/`.jpeg`/`.png` only).
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_image_name(&name) {
                files.push(name);
            }
        }

        Ok(files)
    }
}

/// Reduce a requested filename to its final path component, so request
/// paths cannot escape the upload directory.
fn sanitize(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_image_name(name: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
