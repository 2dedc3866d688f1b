//! Persists captured item photos under the configured images directory.
//! The ledger stores only the resulting path string.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

use crate::constants::intake::SNAPSHOT_EXTENSION;

pub struct SnapshotService {
    images_path: PathBuf,
}

impl SnapshotService {
    pub fn new(images_path: impl Into<PathBuf>) -> Self {
        Self {
            images_path: images_path.into(),
        }
    }

    /// Write the photo bytes and return the stored path. The file name is
    /// derived from the QR payload when one was scanned, otherwise from a
    /// timestamp.
    pub async fn save(&self, bytes: &[u8], qr_code: Option<&str>) -> Result<String> {
        if !self.images_path.exists() {
            fs::create_dir_all(&self.images_path).await?;
        }

        let filename = format!("{}.{SNAPSHOT_EXTENSION}", safe_stem(qr_code));
        let file_path = self.images_path.join(&filename);

        fs::write(&file_path, bytes)
            .await
            .with_context(|| format!("Failed to write snapshot to {}", file_path.display()))?;

        info!(path = %file_path.display(), "Stored item snapshot");
        Ok(file_path.display().to_string())
    }
}

/// Filesystem-safe file stem: path separators, spaces and colons in the QR
/// payload become underscores. Falls back to `photo_<timestamp>` when no
/// QR code was scanned.
fn safe_stem(qr_code: Option<&str>) -> String {
    match qr_code.map(str::trim) {
        Some(qr) if !qr.is_empty() => qr
            .chars()
            .map(|c| match c {
                '/' | '\\' | ' ' | ':' => '_',
                other => other,
            })
            .collect(),
        _ => format!("photo_{}", chrono::Local::now().format("%Y%m%d%H%M%S")),
    }
}
