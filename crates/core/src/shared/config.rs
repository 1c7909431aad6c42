use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::face_locator::DetectionParams;
use crate::shared::constants::{
    AGE_MODEL_FILE, AGE_PROTO_FILE, DEFAULT_CAMERA_INDEX, FACE_CASCADE_FILE, GENDER_MODEL_FILE,
    GENDER_PROTO_FILE, LOGO_FILE, LOGO_OFFSET, LOGO_WIDTH, QUIT_KEY, WINDOW_TITLE,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

/// Locations of every file the detector needs at startup.
///
/// Relative paths are resolved against `base_dir` by [`ResourcePaths::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePaths {
    pub face_cascade: PathBuf,
    pub age_proto: PathBuf,
    pub age_model: PathBuf,
    pub gender_proto: PathBuf,
    pub gender_model: PathBuf,
    /// `None` disables the logo overlay.
    pub logo: Option<PathBuf>,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            face_cascade: PathBuf::from(FACE_CASCADE_FILE),
            age_proto: PathBuf::from(AGE_PROTO_FILE),
            age_model: PathBuf::from(AGE_MODEL_FILE),
            gender_proto: PathBuf::from(GENDER_PROTO_FILE),
            gender_model: PathBuf::from(GENDER_MODEL_FILE),
            logo: Some(PathBuf::from(LOGO_FILE)),
        }
    }
}

impl ResourcePaths {
    /// Joins every relative path onto `base_dir`; absolute paths are kept.
    pub fn resolve(&self, base_dir: &Path) -> Self {
        let join = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base_dir.join(p)
            }
        };
        Self {
            face_cascade: join(&self.face_cascade),
            age_proto: join(&self.age_proto),
            age_model: join(&self.age_model),
            gender_proto: join(&self.gender_proto),
            gender_model: join(&self.gender_model),
            logo: self.logo.as_deref().map(join),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoSettings {
    pub width: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl Default for LogoSettings {
    fn default() -> Self {
        Self {
            width: LOGO_WIDTH,
            offset_x: LOGO_OFFSET.0,
            offset_y: LOGO_OFFSET.1,
        }
    }
}

/// Everything the application reads at startup.
///
/// Loaded from an optional JSON file; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub resources: ResourcePaths,
    pub detection: DetectionParams,
    pub logo: LogoSettings,
    pub camera_index: i32,
    pub window_title: String,
    pub quit_key: char,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resources: ResourcePaths::default(),
            detection: DetectionParams::default(),
            logo: LogoSettings::default(),
            camera_index: DEFAULT_CAMERA_INDEX,
            window_title: WINDOW_TITLE.to_string(),
            quit_key: QUIT_KEY,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detection.validate().map_err(ConfigError::Invalid)?;
        if self.logo.width == 0 {
            return Err(ConfigError::Invalid("Logo width must be positive".into()));
        }
        if self.camera_index < 0 {
            return Err(ConfigError::Invalid(format!(
                "Camera index must be non-negative, got {}",
                self.camera_index
            )));
        }
        Ok(())
    }
}
