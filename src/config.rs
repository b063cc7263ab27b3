//! Configuration management for reference extraction and pose comparison
//!
//! This module provides runtime configuration loading from JSON files so
//! window sizes, file naming and the joint-angle schema can be tuned without
//! recompilation. Missing sections fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::pose::JointAngleSchema;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub schema: JointAngleSchema,
    #[serde(default)]
    pub comparison: ComparisonConfig,
}

/// Reference window selection parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Length of the extracted reference segment in frames
    pub window_size: usize,
    /// File name suffix identifying raw recordings
    pub input_suffix: String,
    /// File name suffix appended to the recording name for segments
    pub output_suffix: String,
    /// Spaces per indentation level in written segments
    pub output_indent: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            window_size: 25,
            input_suffix: "_pose_data.json".to_string(),
            output_suffix: "_ideal_segment.json".to_string(),
            output_indent: 4,
        }
    }
}

impl SelectionConfig {
    /// Segment file name for a recording.
    pub fn output_file_name(&self, recording_name: &str) -> String {
        format!("{}{}", recording_name, self.output_suffix)
    }
}

/// Live pose comparison parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Minimum landmark records per submitted pose
    pub min_landmarks: usize,
    /// Every joint within this many degrees counts as a perfect match
    pub perfect_threshold_deg: f64,
    /// Joints with a less visible landmark are left out of the similarity score
    pub min_visibility: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            min_landmarks: 33,
            perfect_threshold_deg: 5.0,
            min_visibility: 0.5,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or the defaults if the file is missing,
    /// unparsable or fails validation.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                Ok(config) => match config.validate() {
                    Ok(()) => {
                        log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                        config
                    }
                    Err(reason) => {
                        log::warn!(
                            "[Config] Invalid configuration in {:?}: {}. Using defaults.",
                            path.as_ref(),
                            reason
                        );
                        Self::default()
                    }
                },
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Check cross-section invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.selection.window_size == 0 {
            return Err("selection.window_size must be at least 1".to_string());
        }
        if self.selection.output_suffix.is_empty() {
            return Err("selection.output_suffix must not be empty".to_string());
        }
        // Segments written next to the recordings must not be rediscovered
        if self
            .selection
            .output_suffix
            .ends_with(&self.selection.input_suffix)
        {
            return Err(format!(
                "selection.output_suffix {:?} must not end with input_suffix {:?}",
                self.selection.output_suffix, self.selection.input_suffix
            ));
        }
        self.schema.validate()?;

        if let Some(max_id) = self.schema.max_landmark_id() {
            if (max_id as usize) >= self.comparison.min_landmarks {
                return Err(format!(
                    "comparison.min_landmarks {} does not cover landmark {}",
                    self.comparison.min_landmarks, max_id
                ));
            }
        }
        let threshold = self.comparison.perfect_threshold_deg;
        if threshold.is_nan() || threshold < 0.0 {
            return Err("comparison.perfect_threshold_deg must be >= 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.comparison.min_visibility) {
            return Err("comparison.min_visibility must be within [0, 1]".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.selection.window_size, 25);
        assert_eq!(config.selection.input_suffix, "_pose_data.json");
        assert_eq!(config.selection.output_file_name("toprock"), "toprock_ideal_segment.json");
        assert_eq!(config.comparison.min_landmarks, 33);
        assert_eq!(config.comparison.perfect_threshold_deg, 5.0);
        assert_eq!(config.comparison.min_visibility, 0.5);
        assert_eq!(config.schema.penalty_factor(), 400.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"selection": {"window_size": 10}}"#).unwrap();
        assert_eq!(parsed.selection.window_size, 10);
        assert_eq!(parsed.selection.output_suffix, "_ideal_segment.json");
        assert_eq!(parsed.schema, JointAngleSchema::mediapipe());
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = AppConfig::default();
        config.selection.window_size = 0;
        assert!(config.validate().unwrap_err().contains("window_size"));
    }

    #[test]
    fn test_validate_rejects_rediscoverable_output() {
        let mut config = AppConfig::default();
        config.selection.output_suffix = config.selection.input_suffix.clone();
        assert!(config.validate().unwrap_err().contains("output_suffix"));

        config.selection.input_suffix = ".json".to_string();
        config.selection.output_suffix = "_ideal_segment.json".to_string();
        assert!(config.validate().unwrap_err().contains("must not end with"));

        config.selection.output_suffix = "_ideal_segment.out".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_visibility_out_of_range() {
        let mut config = AppConfig::default();
        config.comparison.min_visibility = 1.5;
        assert!(config.validate().unwrap_err().contains("min_visibility"));
        config.comparison.min_visibility = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_small_pose() {
        let mut config = AppConfig::default();
        config.comparison.min_landmarks = 20;
        assert!(config.validate().unwrap_err().contains("min_landmarks"));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = AppConfig::load_from_file("/nonexistent/dance/config.json");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let path = std::env::temp_dir().join(format!("dance-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"selection": {"window_size": 0}}"#).unwrap();
        let config = AppConfig::load_from_file(&path);
        assert_eq!(config.selection.window_size, 25);
        let _ = fs::remove_file(&path);
    }
}
