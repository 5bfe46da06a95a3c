//! Run configuration for the light sail animation.
//!
//! Only presentation and pacing are configurable. The flight itself (laser, sail, destination)
//! is fixed.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Top-level configuration file layout.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub simulation: SimulationConfig,
    pub scene: SceneConfig,
    pub render: RenderConfig,
}

/// Loop pacing and integrator settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Ticks per second; `0` runs unpaced.
    pub frame_rate_hz: u32,
    pub step_policy: StepPolicyConfig,
    pub max_ticks: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 100,
            step_policy: StepPolicyConfig::ResetEachTick,
            max_ticks: None,
        }
    }
}

/// Step policy as spelled in configuration files and on the command line.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StepPolicyConfig {
    Persistent,
    ResetEachTick,
}

/// Static scene construction.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub star_count: usize,
    pub star_seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: 3_000,
            star_seed: 42,
        }
    }
}

/// PNG snapshot output.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Snapshots are written only when a directory is set.
    pub frames_dir: Option<PathBuf>,
    pub frame_every: u64,
    /// Draw text labels and the telemetry overlay into snapshots.
    pub labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1_200,
            height: 700,
            frames_dir: None,
            frame_every: 100,
            labels: true,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config format for {0} (expected .toml, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl RunConfig {
    /// Reject values the renderer or loop cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.frame_every == 0 {
            return Err(ConfigError::Invalid("render.frame_every must be at least 1".into()));
        }
        if self.render.width == 0 || self.render.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "render size {}x{} must be non-zero",
                self.render.width, self.render.height
            )));
        }
        Ok(())
    }
}

/// Load and validate a run configuration, choosing the parser by file extension.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let config: RunConfig = match extension.as_deref() {
        Some("toml") => toml::from_str(&std::fs::read_to_string(path)?)?,
        Some("yaml") | Some("yml") => serde_yaml::from_reader(std::fs::File::open(path)?)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn toml_overrides_only_listed_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "run.toml",
            "[simulation]\nstep_policy = \"persistent\"\n\n[scene]\nstar_count = 10\n",
        );
        let config = load_run_config(&path).unwrap();
        assert_eq!(config.simulation.step_policy, StepPolicyConfig::Persistent);
        assert_eq!(config.simulation.frame_rate_hz, 100);
        assert_eq!(config.scene.star_count, 10);
        assert_eq!(config.scene.star_seed, 42);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn yaml_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "run.yaml",
            "render:\n  frames_dir: out\n  frame_every: 5\n  labels: false\n",
        );
        let config = load_run_config(&path).unwrap();
        assert_eq!(config.render.frames_dir, Some(PathBuf::from("out")));
        assert_eq!(config.render.frame_every, 5);
        assert!(!config.render.labels);
    }

    #[test]
    fn mission_parameters_are_not_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "run.toml", "[simulation]\nlaser_power_w = 1.0\n");
        assert!(matches!(load_run_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn zero_frame_interval_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "run.toml", "[render]\nframe_every = 0\n");
        assert!(matches!(load_run_config(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "run.json", "{}");
        assert!(matches!(
            load_run_config(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
