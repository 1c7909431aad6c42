use std::path::Path;

use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

/// Adapts a single image file to the [`FrameSource`] interface.
///
/// The image is decoded eagerly on open and yielded once, so still images
/// go through the same annotation path as camera frames.
pub struct ImageFileReader {
    frame: Option<Frame>,
}

impl ImageFileReader {
    pub fn open(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let rgb = image::open(path)
            .map_err(|e| format!("Failed to decode {}: {e}", path.display()))?
            .to_rgb8();
        let (width, height) = rgb.dimensions();
        let mut data = rgb.into_raw();
        for px in data.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
        log::debug!("Decoded {} ({width}x{height})", path.display());
        Ok(Self {
            frame: Some(Frame::new(data, width, height, 3, 0)),
        })
    }
}

impl FrameSource for ImageFileReader {
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        Ok(self.frame.take())
    }

    fn close(&mut self) {
        self.frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_image(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("test.png");
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([50, 100, 200]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_nonexistent_fails() {
        assert!(ImageFileReader::open(Path::new("/nonexistent/test.png")).is_err());
    }

    #[test]
    fn test_yields_single_frame_then_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 100, 80);
        let mut reader = ImageFileReader::open(&path).unwrap();

        let frame = reader.read().unwrap().unwrap();
        assert_eq!(frame.index(), 0);
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 80);
        assert!(reader.read().unwrap().is_none());
    }

    #[test]
    fn test_frame_is_bgr() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 10, 10);
        let mut reader = ImageFileReader::open(&path).unwrap();

        let frame = reader.read().unwrap().unwrap();
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[0..3], &[200, 100, 50]);
    }

    #[test]
    fn test_close_drops_pending_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 10, 10);
        let mut reader = ImageFileReader::open(&path).unwrap();
        reader.close();
        reader.close();
        assert!(reader.read().unwrap().is_none());
    }
}
