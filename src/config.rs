use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::Error;
use crate::gesture::{DEFAULT_PINCH_THRESHOLD, OutOfFrame};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub camera: CameraConfig,
    pub estimator: EstimatorConfig,
    pub gesture: GestureConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub index: u32,
    pub width: u32,
    pub height: u32,
    /// Flip frames horizontally so the picture behaves like a mirror.
    pub mirror: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { index: 0, width: 640, height: 480, mirror: true }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    pub program: String,
    pub args: Vec<String>,
    pub min_confidence: f32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            program: ".venv/bin/python".into(),
            args: vec!["hand_detect.py".into()],
            min_confidence: 0.7,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    pub pinch_threshold: f64,
    pub out_of_frame: OutOfFrame,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { pinch_threshold: DEFAULT_PINCH_THRESHOLD, out_of_frame: OutOfFrame::default() }
    }
}

impl Config {
    pub fn load<A: AsRef<Path>>(path: A) -> Result<Self, Error> {
        Self::load_impl(path.as_ref())
    }

    fn load_impl(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        Self::parse(&contents).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(Error::Config("camera width and height must be non-zero".into()));
        }
        let pinch = self.gesture.pinch_threshold;
        if !pinch.is_finite() || pinch <= 0.0 {
            return Err(Error::Config(format!(
                "pinch_threshold must be positive (got {pinch})"
            )));
        }
        if !(0.0..=1.0).contains(&self.estimator.min_confidence) {
            return Err(Error::Config(format!(
                "min_confidence must be within 0..=1 (got {})",
                self.estimator.min_confidence
            )));
        }
        if self.estimator.program.trim().is_empty() {
            return Err(Error::Config("estimator program must not be empty".into()));
        }
        Ok(())
    }
}
