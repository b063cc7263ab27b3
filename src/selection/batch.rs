//! Batch extraction over a directory of recordings.
//!
//! Recordings are discovered by file suffix and processed one after another:
//! load, select, write. Any per-recording failure is logged and recorded as a
//! skip; only failing to enumerate the input directory (or to create the
//! output directory) aborts the batch.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::SelectionConfig;
use crate::error::{log_recording_error, ErrorCode, RecordingError};
use crate::pose::{recording_name, write_segment, JointAngleSchema, Recording};

use super::selector::{ReferenceSegment, ReferenceWindowSelector};

/// A recording file found on disk.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordingMetadata {
    pub name: String,
    pub path: PathBuf,
}

/// Catalog responsible for discovering recordings on disk.
pub struct RecordingCatalog {
    root: PathBuf,
    suffix: String,
}

impl RecordingCatalog {
    pub fn new<P: Into<PathBuf>>(root: P, suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List all recordings in the catalog, sorted by name.
    pub fn discover(&self) -> Result<Vec<RecordingMetadata>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("listing recordings in {}", self.root.display()))?;

        let mut recordings = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("reading {}", self.root.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(&self.suffix));
            if matches {
                recordings.push(RecordingMetadata {
                    name: recording_name(&path, &self.suffix),
                    path,
                });
            }
        }

        recordings.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(recordings)
    }
}

/// What happened to one recording in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordingOutcome {
    Extracted {
        name: String,
        output: PathBuf,
        /// 1-based start frame
        start_frame: usize,
        frames: usize,
        score: f64,
    },
    Skipped {
        name: String,
        code: i32,
        reason: String,
    },
}

impl RecordingOutcome {
    pub fn name(&self) -> &str {
        match self {
            RecordingOutcome::Extracted { name, .. } | RecordingOutcome::Skipped { name, .. } => name,
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, RecordingOutcome::Extracted { .. })
    }

    fn skipped(name: &str, err: &RecordingError) -> Self {
        RecordingOutcome::Skipped {
            name: name.to_string(),
            code: err.code(),
            reason: err.message(),
        }
    }
}

/// Summary of a directory run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub extracted: usize,
    pub skipped: usize,
    pub outcomes: Vec<RecordingOutcome>,
}

impl BatchReport {
    fn push(&mut self, outcome: RecordingOutcome) {
        self.processed += 1;
        if outcome.is_extracted() {
            self.extracted += 1;
        } else {
            self.skipped += 1;
        }
        self.outcomes.push(outcome);
    }
}

/// Extract reference segments for every recording in `input_dir`.
///
/// Segments are written to `output_dir` (created if missing) as
/// `<name><output_suffix>`. A segment file is only created once its window
/// has been fully determined.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: &SelectionConfig,
    schema: &JointAngleSchema,
) -> Result<BatchReport> {
    let catalog = RecordingCatalog::new(input_dir, config.input_suffix.clone());
    let recordings = catalog.discover()?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    tracing::info!(
        "[Batch] {} recordings in {}, window size {}, visibility penalty factor {}",
        recordings.len(),
        input_dir.display(),
        config.window_size,
        schema.penalty_factor()
    );

    let selector = ReferenceWindowSelector::new(config.window_size, schema.clone());
    let mut report = BatchReport::default();

    for metadata in recordings {
        tracing::info!("[Batch] Processing {}", metadata.path.display());
        let outcome = match extract_one(&selector, &metadata.path, output_dir, config) {
            Ok((segment, output)) => {
                tracing::info!(
                    "[Batch] {} -> {} (start frame {}, window score {:.2})",
                    metadata.name,
                    output.display(),
                    segment.display_start(),
                    segment.score
                );
                RecordingOutcome::Extracted {
                    name: metadata.name,
                    output,
                    start_frame: segment.display_start(),
                    frames: segment.len(),
                    score: segment.score,
                }
            }
            Err(err) => {
                log_recording_error(&err, &metadata.name);
                RecordingOutcome::skipped(&metadata.name, &err)
            }
        };
        report.push(outcome);
    }

    tracing::info!(
        "[Batch] Done: {} extracted, {} skipped",
        report.extracted,
        report.skipped
    );
    Ok(report)
}

/// Load, select and persist a single recording.
pub fn extract_one(
    selector: &ReferenceWindowSelector,
    path: &Path,
    output_dir: &Path,
    config: &SelectionConfig,
) -> Result<(ReferenceSegment, PathBuf), RecordingError> {
    let recording = Recording::load(path, &config.input_suffix)?;
    let segment = selector.select(&recording)?;
    let output = output_dir.join(config.output_file_name(&segment.name));
    write_segment(&output, &segment.frames, config.output_indent)?;
    Ok((segment, output))
}
