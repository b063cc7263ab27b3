//! JSON persistence for recordings and reference segments.
//!
//! Both artifacts share the same schema: an array with one object per frame.
//! Segments are written to a temporary sibling first and renamed into place,
//! so a failed write never leaves a truncated file under the final name.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::types::{Frame, Recording};
use crate::error::RecordingError;

/// Read a frame array from disk.
pub fn read_frames(path: &Path) -> Result<Vec<Frame>, RecordingError> {
    let contents = fs::read_to_string(path).map_err(|err| RecordingError::Unreadable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|err| RecordingError::Malformed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

impl Recording {
    /// Load a recording, naming it after the file with `suffix` removed.
    pub fn load(path: &Path, suffix: &str) -> Result<Self, RecordingError> {
        let frames = read_frames(path)?;
        Ok(Self::new(recording_name(path, suffix), frames))
    }
}

/// File name of `path` with `suffix` stripped, or the file stem otherwise.
pub fn recording_name(path: &Path, suffix: &str) -> String {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    match file_name.strip_suffix(suffix) {
        Some(stripped) if !suffix.is_empty() => stripped.to_string(),
        _ => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string(),
    }
}

/// Persist frames as a pretty-printed JSON array indented by `indent` spaces.
pub fn write_segment(path: &Path, frames: &[Frame], indent: usize) -> Result<(), RecordingError> {
    let write_failed = |reason: String| RecordingError::WriteFailed {
        path: path.to_path_buf(),
        reason,
    };

    let indent = vec![b' '; indent];
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    frames
        .serialize(&mut serializer)
        .map_err(|err| write_failed(err.to_string()))?;
    buffer.push(b'\n');

    let staging = staging_path(path);
    let result = fs::File::create(&staging)
        .and_then(|mut file| {
            file.write_all(&buffer)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&staging, path));

    if let Err(err) = result {
        let _ = fs::remove_file(&staging);
        return Err(write_failed(err.to_string()));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
