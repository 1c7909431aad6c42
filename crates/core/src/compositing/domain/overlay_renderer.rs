use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Pixels the label baseline sits above the face box.
pub const LABEL_LIFT: i32 = 10;

/// Face box outline appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    /// BGR.
    pub color: [u8; 3],
    pub thickness: i32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            thickness: 2,
        }
    }
}

/// Text appearance for face labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font_scale: f64,
    pub thickness: i32,
    /// BGR.
    pub color: [u8; 3],
    pub anti_aliased: bool,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_scale: 0.8,
            thickness: 2,
            color: [255, 255, 255],
            anti_aliased: true,
        }
    }
}

/// Domain interface for rasterizing face annotations into a frame.
///
/// Shapes may lie partly outside the frame; implementations clip.
pub trait OverlayRenderer: Send {
    /// Outlines `(x, y)`–`(x + w, y + h)`.
    fn draw_box(
        &mut self,
        frame: &mut Frame,
        face: &FaceBox,
        style: &BoxStyle,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// `origin` is the bottom-left corner of the text baseline.
    fn draw_label(
        &mut self,
        frame: &mut Frame,
        text: &str,
        origin: (i32, i32),
        style: &LabelStyle,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
