use crate::classification::domain::labels::Classification;
use crate::compositing::domain::logo::Logo;
use crate::compositing::domain::overlay_renderer::{
    BoxStyle, LabelStyle, OverlayRenderer, LABEL_LIFT,
};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Draws per-face annotations and the branding logo onto frames.
pub struct FrameCompositor {
    renderer: Box<dyn OverlayRenderer>,
    logo: Option<Logo>,
    logo_offset: (u32, u32),
    box_style: BoxStyle,
    label_style: LabelStyle,
}

impl FrameCompositor {
    pub fn new(renderer: Box<dyn OverlayRenderer>, logo: Option<Logo>, logo_offset: (u32, u32)) -> Self {
        Self {
            renderer,
            logo,
            logo_offset,
            box_style: BoxStyle::default(),
            label_style: LabelStyle::default(),
        }
    }

    /// Outlines `face` and writes `"<gender>, <age>"` just above it.
    pub fn annotate_face(
        &mut self,
        frame: &mut Frame,
        face: &FaceBox,
        classification: &Classification,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.renderer.draw_box(frame, face, &self.box_style)?;
        let text = classification.to_string();
        self.renderer
            .draw_label(frame, &text, face.label_origin(LABEL_LIFT), &self.label_style)
    }

    /// Blends the logo in at the configured offset.
    ///
    /// Returns whether anything was drawn: `false` without a logo or when it
    /// does not fit inside the frame.
    pub fn composite_logo(&self, frame: &mut Frame) -> bool {
        let Some(logo) = &self.logo else {
            return false;
        };
        let drawn = logo.composite_onto(frame, self.logo_offset);
        if !drawn {
            log::trace!(
                "Logo {}x{} at {:?} does not fit frame {}x{}",
                logo.width(),
                logo.height(),
                self.logo_offset,
                frame.width(),
                frame.height()
            );
        }
        drawn
    }
}
