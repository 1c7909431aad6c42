use std::path::Path;

use opencv::core::{Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::face_locator::{DetectionParams, FaceLocator};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::GrayFrame;
use crate::video::infrastructure::mat_convert::with_gray_mat;

/// Haar cascade face locator backed by OpenCV's `CascadeClassifier`.
pub struct CascadeFaceLocator {
    classifier: CascadeClassifier,
    params: DetectionParams,
}

impl CascadeFaceLocator {
    /// Loads a cascade definition (XML).
    ///
    /// OpenCV reports a missing or malformed file as an empty classifier
    /// rather than an error, so emptiness is checked explicitly.
    pub fn new(
        cascade_path: &Path,
        params: DetectionParams,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        params.validate()?;
        let path = cascade_path
            .to_str()
            .ok_or_else(|| format!("Cascade path is not valid UTF-8: {}", cascade_path.display()))?;
        let classifier = CascadeClassifier::new(path)?;
        if classifier.empty()? {
            return Err(format!("Cascade classifier is empty: {}", cascade_path.display()).into());
        }
        Ok(Self { classifier, params })
    }
}

impl FaceLocator for CascadeFaceLocator {
    fn locate(&mut self, gray: &GrayFrame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        let mut rects = Vector::<Rect>::new();
        let min = Size::new(self.params.min_size, self.params.min_size);
        let classifier = &mut self.classifier;
        let params = &self.params;

        with_gray_mat(gray, |mat| {
            classifier.detect_multi_scale(
                mat,
                &mut rects,
                params.scale_factor,
                params.min_neighbors,
                0,
                min,
                Size::default(),
            )
        })?;

        Ok(rects
            .iter()
            .map(|r| FaceBox::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cascade_file_is_error() {
        let result = CascadeFaceLocator::new(
            Path::new("/nonexistent/haarcascade.xml"),
            DetectionParams::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_cascade_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, "<opencv_storage></opencv_storage>").unwrap();
        assert!(CascadeFaceLocator::new(&path, DetectionParams::default()).is_err());
    }

    #[test]
    fn test_invalid_params_rejected_before_loading() {
        let params = DetectionParams {
            scale_factor: 0.9,
            ..DetectionParams::default()
        };
        let err = CascadeFaceLocator::new(Path::new("face.xml"), params)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Scale factor"));
    }

    /// Directory holding OpenCV's bundled Haar cascades.
    fn cascade_dir() -> std::path::PathBuf {
        std::env::var_os("AGECAM_CASCADE_DIR")
            .map(Into::into)
            .unwrap_or_else(|| "/usr/share/opencv4/haarcascades".into())
    }

    #[test]
    #[ignore] // Requires haarcascade_frontalface_default.xml from an OpenCV install
    fn test_blank_frame_has_no_faces() {
        let path = cascade_dir().join(crate::shared::constants::FACE_CASCADE_FILE);
        let mut locator = CascadeFaceLocator::new(&path, DetectionParams::default()).unwrap();

        let gray = GrayFrame::new(vec![128; 320 * 240], 320, 240);
        let faces = locator.locate(&gray).unwrap();
        assert!(faces.is_empty(), "Expected no faces, got {faces:?}");
    }

    #[test]
    #[ignore] // Requires haarcascade_frontalface_default.xml from an OpenCV install
    fn test_frame_smaller_than_min_size_is_not_an_error() {
        let path = cascade_dir().join(crate::shared::constants::FACE_CASCADE_FILE);
        let mut locator = CascadeFaceLocator::new(&path, DetectionParams::default()).unwrap();

        let gray = GrayFrame::new(vec![0; 40 * 30], 40, 30);
        assert!(locator.locate(&gray).unwrap().is_empty());
    }
}
