use std::path::Path;

use crate::pipeline::frame_annotator::{FaceAnnotation, FrameAnnotator};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::image_writer::ImageWriter;

/// Single-image pipeline: read → annotate → write. No mirroring.
pub struct AnnotateImageUseCase {
    reader: Box<dyn FrameSource>,
    image_writer: Box<dyn ImageWriter>,
    annotator: FrameAnnotator,
    logger: Box<dyn PipelineLogger>,
}

impl AnnotateImageUseCase {
    pub fn new(
        reader: Box<dyn FrameSource>,
        image_writer: Box<dyn ImageWriter>,
        annotator: FrameAnnotator,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader,
            image_writer,
            annotator,
            logger,
        }
    }

    pub fn execute(
        &mut self,
        output_path: &Path,
    ) -> Result<Vec<FaceAnnotation>, Box<dyn std::error::Error>> {
        let frame = self.reader.read();
        self.reader.close();
        let mut frame = frame?.ok_or("No frames in image")?;

        let annotations = self.annotator.annotate(&mut frame, self.logger.as_mut())?;
        self.image_writer.write(output_path, &frame)?;
        self.logger.progress(1);

        for a in &annotations {
            self.logger.info(&format!(
                "Face at ({}, {}) {}x{}: {}",
                a.face.x, a.face.y, a.face.width, a.face.height, a.classification
            ));
        }
        self.logger.summary();
        Ok(annotations)
    }
}
