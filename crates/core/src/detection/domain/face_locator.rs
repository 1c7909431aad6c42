use serde::{Deserialize, Serialize};

use crate::shared::face_box::FaceBox;
use crate::shared::frame::GrayFrame;

pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;
pub const DEFAULT_MIN_NEIGHBORS: i32 = 5;
pub const DEFAULT_MIN_SIZE: i32 = 100;

/// Multi-scale sliding-window search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Image pyramid step between scales; must be > 1.
    pub scale_factor: f64,
    /// Overlapping candidate hits required to keep a detection.
    pub min_neighbors: i32,
    /// Smallest face edge length in pixels (square).
    pub min_size: i32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_size: DEFAULT_MIN_SIZE,
        }
    }
}

impl DetectionParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.scale_factor.is_nan() || self.scale_factor <= 1.0 {
            return Err(format!(
                "Scale factor must be greater than 1.0, got {}",
                self.scale_factor
            ));
        }
        if self.min_neighbors < 0 {
            return Err(format!(
                "Min neighbors must be non-negative, got {}",
                self.min_neighbors
            ));
        }
        if self.min_size <= 0 {
            return Err(format!(
                "Minimum face size must be positive, got {}",
                self.min_size
            ));
        }
        Ok(())
    }
}

/// Domain interface for face localization on a grayscale frame.
///
/// Returned boxes carry no ordering guarantee.
pub trait FaceLocator: Send {
    fn locate(&mut self, gray: &GrayFrame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>>;
}
