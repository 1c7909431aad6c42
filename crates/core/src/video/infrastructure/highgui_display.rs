use opencv::highgui;

use crate::shared::frame::Frame;
use crate::video::domain::frame_display::FrameDisplay;
use crate::video::infrastructure::mat_convert::frame_to_mat;

/// A single OpenCV HighGUI window.
pub struct HighGuiDisplay {
    title: String,
    open: bool,
}

impl HighGuiDisplay {
    pub fn new(title: impl Into<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let title = title.into();
        highgui::named_window(&title, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self { title, open: true })
    }
}

impl FrameDisplay for HighGuiDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mat = frame_to_mat(frame)?;
        highgui::imshow(&self.title, &mat)?;
        Ok(())
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<char>, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(timeout_ms)?;
        if key < 0 {
            return Ok(None);
        }
        Ok(char::from_u32((key & 0xFF) as u32))
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to close window '{}': {e}", self.title);
        }
    }
}

impl Drop for HighGuiDisplay {
    fn drop(&mut self) {
        self.close();
    }
}
