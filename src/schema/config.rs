//! Configuration types for Life Board simulation runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Pattern, Seed};

/// Largest board a configuration may request, in cells.
pub const MAX_CELLS: usize = 1 << 26;

fn default_steps() -> u64 {
    10
}

fn default_frame_skip() -> u32 {
    1
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Board width in cells (X dimension). Ignored for file seeds.
    pub width: usize,
    /// Board height in cells (Y dimension). Ignored for file seeds.
    pub height: usize,
    /// Number of generations to run.
    #[serde(default = "default_steps")]
    pub steps: u64,
    /// Initial board.
    #[serde(default)]
    pub seed: Seed,
    /// Where to save the final board in seed format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Optional generation recording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording: Option<RecordingConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            steps: default_steps(),
            seed: Seed::default(),
            output: None,
            recording: None,
        }
    }
}

/// Recording of every generation to a `.lifa` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Output file.
    pub path: PathBuf,
    /// Record every Nth generation (1 = every generation).
    #[serde(default = "default_frame_skip")]
    pub frame_skip: u32,
    /// Maximum frames to record (0 = unlimited).
    #[serde(default)]
    pub max_frames: u64,
    /// LZ4-compress frames (only effective with the `lz4` feature).
    #[serde(default)]
    pub compress: bool,
}

impl SimulationConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let from_file = matches!(self.seed.pattern, Pattern::File { .. });
        if !from_file && (self.width == 0 || self.height == 0) {
            return Err(ConfigError::InvalidDimensions);
        }
        if !from_file
            && self
                .width
                .checked_mul(self.height)
                .is_none_or(|cells| cells > MAX_CELLS)
        {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if let Pattern::Random { density, .. } = self.seed.pattern
            && !(0.0..=1.0).contains(&density)
        {
            return Err(ConfigError::InvalidDensity(density));
        }
        if let Some(recording) = &self.recording
            && recording.frame_skip == 0
        {
            return Err(ConfigError::InvalidFrameSkip);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Board dimensions (width, height) must be non-zero")]
    InvalidDimensions,
    #[error("Board {width}x{height} exceeds {max} cells", max = MAX_CELLS)]
    TooLarge { width: usize, height: usize },
    #[error("Random density {0} must be within [0, 1]")]
    InvalidDensity(f64),
    #[error("Recording frame skip must be non-zero")]
    InvalidFrameSkip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions() {
        let config = SimulationConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions)
        ));

        // File seeds bring their own dimensions.
        let config = SimulationConfig {
            width: 0,
            height: 0,
            seed: Seed {
                pattern: Pattern::File {
                    path: "seed.csv".into(),
                },
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_dimensions() {
        for (width, height) in [(usize::MAX, 2), (1 << 14, 1 << 13)] {
            let config = SimulationConfig {
                width,
                height,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::TooLarge { .. })
            ));
        }

        let config = SimulationConfig {
            width: 1 << 13,
            height: 1 << 13,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_density() {
        let config = SimulationConfig {
            seed: Seed {
                pattern: Pattern::Random {
                    density: 1.5,
                    seed: 1,
                },
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDensity(_))
        ));
    }

    #[test]
    fn test_invalid_frame_skip() {
        let config = SimulationConfig {
            recording: Some(RecordingConfig {
                path: "run.lifa".into(),
                frame_skip: 0,
                max_frames: 0,
                compress: false,
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFrameSkip)
        ));
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"width": 8, "height": 6}"#).unwrap();
        assert_eq!(config.steps, 10);
        assert!(config.output.is_none());
        assert!(config.recording.is_none());
        assert!(matches!(config.seed.pattern, Pattern::Glider { .. }));
    }

    #[test]
    fn test_recording_json() {
        let json = r#"{
            "width": 8,
            "height": 6,
            "steps": 3,
            "seed": {"pattern": {"type": "Block", "x": 2, "y": 2}},
            "recording": {"path": "run.lifa"}
        }"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();
        let recording = config.recording.unwrap();
        assert_eq!(recording.frame_skip, 1);
        assert_eq!(recording.max_frames, 0);
        assert!(!recording.compress);
    }
}
