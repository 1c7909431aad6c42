use crate::classification::domain::attribute_classifier::AttributeClassifier;
use crate::compositing::domain::logo::Logo;
use crate::detection::domain::face_locator::FaceLocator;

/// Models and overlay assets loaded once at startup.
///
/// Built by a single fallible loader, handed to the frame loop and dropped
/// after it. Nothing in here changes after loading.
pub struct DetectionContext {
    pub locator: Box<dyn FaceLocator>,
    pub classifier: Box<dyn AttributeClassifier>,
    /// `None` when the overlay is disabled.
    pub logo: Option<Logo>,
}
