use std::time::Instant;

use crate::classification::domain::attribute_classifier::AttributeClassifier;
use crate::classification::domain::labels::Classification;
use crate::compositing::domain::frame_compositor::FrameCompositor;
use crate::detection::domain::face_locator::FaceLocator;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// One labelled face drawn onto a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceAnnotation {
    pub face: FaceBox,
    pub classification: Classification,
}

/// Per-frame annotation: grayscale → locate → crop → classify → draw →
/// logo.
///
/// Shared by the live loop and still-image mode. The frame is modified in
/// place.
pub struct FrameAnnotator {
    locator: Box<dyn FaceLocator>,
    classifier: Box<dyn AttributeClassifier>,
    compositor: FrameCompositor,
}

impl FrameAnnotator {
    pub fn new(
        locator: Box<dyn FaceLocator>,
        classifier: Box<dyn AttributeClassifier>,
        compositor: FrameCompositor,
    ) -> Self {
        Self {
            locator,
            classifier,
            compositor,
        }
    }

    pub fn annotate(
        &mut self,
        frame: &mut Frame,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Vec<FaceAnnotation>, Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        let gray = frame.to_gray();
        let faces = self.locator.locate(&gray)?;
        logger.timing("detect", t0.elapsed().as_secs_f64() * 1000.0);
        logger.metric("faces", faces.len() as f64);

        let mut classify_ms = 0.0;
        let mut composite_ms = 0.0;
        let mut annotations = Vec::with_capacity(faces.len());

        for face in faces {
            if !face.is_within(frame.width(), frame.height()) {
                log::warn!(
                    "Frame {}: skipping face box {:?} outside {}x{} frame",
                    frame.index(),
                    face,
                    frame.width(),
                    frame.height()
                );
                continue;
            }
            let Some(crop) = frame.crop(&face) else {
                log::warn!("Frame {}: skipping empty face box {:?}", frame.index(), face);
                continue;
            };

            let t_classify = Instant::now();
            let classification = self.classifier.classify(&crop)?;
            classify_ms += t_classify.elapsed().as_secs_f64() * 1000.0;

            let t_draw = Instant::now();
            self.compositor.annotate_face(frame, &face, &classification)?;
            composite_ms += t_draw.elapsed().as_secs_f64() * 1000.0;

            annotations.push(FaceAnnotation {
                face,
                classification,
            });
        }

        let t_logo = Instant::now();
        self.compositor.composite_logo(frame);
        composite_ms += t_logo.elapsed().as_secs_f64() * 1000.0;

        if !annotations.is_empty() {
            logger.timing("classify", classify_ms);
        }
        logger.timing("composite", composite_ms);
        Ok(annotations)
    }
}
