use opencv::core::{Point, Scalar};
use opencv::imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA};

use crate::compositing::domain::overlay_renderer::{BoxStyle, LabelStyle, OverlayRenderer};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;
use crate::video::infrastructure::mat_convert::with_frame_mat;

/// Draws face boxes and Hershey simplex labels with OpenCV `imgproc`.
#[derive(Default)]
pub struct OpenCvOverlayRenderer;

impl OpenCvOverlayRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn bgr(color: [u8; 3]) -> Scalar {
    let [b, g, r] = color;
    Scalar::new(b as f64, g as f64, r as f64, 0.0)
}

impl OverlayRenderer for OpenCvOverlayRenderer {
    fn draw_box(
        &mut self,
        frame: &mut Frame,
        face: &FaceBox,
        style: &BoxStyle,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let color = bgr(style.color);
        with_frame_mat(frame, |mat| {
            imgproc::rectangle_points(
                mat,
                Point::new(face.x, face.y),
                Point::new(face.right(), face.bottom()),
                color,
                style.thickness,
                LINE_8,
                0,
            )
        })
    }

    fn draw_label(
        &mut self,
        frame: &mut Frame,
        text: &str,
        origin: (i32, i32),
        style: &LabelStyle,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let color = bgr(style.color);
        let line_type = if style.anti_aliased { LINE_AA } else { LINE_8 };

        with_frame_mat(frame, |mat| {
            imgproc::put_text(
                mat,
                text,
                Point::new(origin.0, origin.1),
                FONT_HERSHEY_SIMPLEX,
                style.font_scale,
                color,
                style.thickness,
                line_type,
                false,
            )
        })
    }
}
