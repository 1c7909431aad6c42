use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use thiserror::Error;

use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;
use crate::video::infrastructure::mat_convert::frame_from_mat;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("could not open camera {index}")]
    Open { index: i32 },
    #[error("camera {index}: {source}")]
    Backend {
        index: i32,
        #[source]
        source: opencv::Error,
    },
}

/// Live frames from a local camera device via OpenCV's video I/O.
pub struct CameraSource {
    capture: Option<VideoCapture>,
    index: i32,
    frames_read: usize,
}

impl CameraSource {
    /// Opens camera `index` with whichever backend OpenCV picks.
    pub fn open(index: i32) -> Result<Self, CaptureError> {
        let backend = |source| CaptureError::Backend { index, source };
        let capture = VideoCapture::new(index, videoio::CAP_ANY).map_err(backend)?;
        if !capture.is_opened().map_err(backend)? {
            return Err(CaptureError::Open { index });
        }
        log::info!("Opened camera {index}");
        Ok(Self {
            capture: Some(capture),
            index,
            frames_read: 0,
        })
    }
}

impl FrameSource for CameraSource {
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(capture) = self.capture.as_mut() else {
            return Ok(None);
        };
        let mut mat = Mat::default();
        let grabbed = capture.read(&mut mat).map_err(|source| CaptureError::Backend {
            index: self.index,
            source,
        })?;
        if !grabbed || mat.empty() {
            return Ok(None);
        }
        let frame = frame_from_mat(&mat, self.frames_read)?;
        self.frames_read += 1;
        Ok(Some(frame))
    }

    fn close(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            if let Err(e) = capture.release() {
                log::warn!("Failed to release camera {}: {e}", self.index);
            }
        }
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.close();
    }
}
