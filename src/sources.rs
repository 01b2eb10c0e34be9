//! Reading and writing verse record files.
//!
//! Record files are JSON arrays. Reads are async so that both editions can be
//! fetched at the same time; writes are atomic.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, VerseLinkError};
use crate::types::{RawVerse, VerseSegment};

/// Reads a JSON array of raw verse records.
pub async fn read_verses_json(path: &Path) -> Result<Vec<RawVerse>> {
    read_json_array(path).await
}

/// Reads a JSON array of id-less verse segments.
pub async fn read_segments_json(path: &Path) -> Result<Vec<VerseSegment>> {
    read_json_array(path).await
}

async fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| VerseLinkError::File {
            message: format!("failed to read record file: {}", e),
            path: path.display().to_string(),
        })?;

    parse_json_array(&contents, path)
}

/// Decodes a JSON array of records, attributing failures to `path`.
pub fn parse_json_array<T: DeserializeOwned>(contents: &str, path: &Path) -> Result<Vec<T>> {
    serde_json::from_str(contents).map_err(|e| VerseLinkError::Parse {
        message: e.to_string(),
        path: path.display().to_string(),
        line: Some(e.line()),
    })
}

/// Writes `value` as pretty JSON using a temporary file and a rename, so a
/// partial write never replaces an existing file.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| VerseLinkError::File {
                message: format!("failed to create directory: {}", e),
                path: parent.display().to_string(),
            })?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(value)?;

    fs::write(&tmp_path, &json).map_err(|e| VerseLinkError::File {
        message: format!("failed to write temporary file: {}", e),
        path: tmp_path.display().to_string(),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| VerseLinkError::File {
        message: format!("failed to rename '{}' into place: {}", tmp_path.display(), e),
        path: path.display().to_string(),
    })?;

    Ok(())
}
