use crate::classification::domain::blob::face_blob;
use crate::classification::domain::class_network::ClassNetwork;
use crate::classification::domain::labels::{
    select_label, Classification, AGE_LABELS, GENDER_LABELS,
};
use crate::shared::frame::Frame;

/// Domain interface for predicting attributes of a cropped face.
pub trait AttributeClassifier: Send {
    fn classify(&mut self, face: &Frame) -> Result<Classification, Box<dyn std::error::Error>>;
}

/// Runs the gender and age networks on one shared preprocessed blob.
pub struct AgeGenderClassifier {
    age_net: Box<dyn ClassNetwork>,
    gender_net: Box<dyn ClassNetwork>,
}

impl AgeGenderClassifier {
    pub fn new(age_net: Box<dyn ClassNetwork>, gender_net: Box<dyn ClassNetwork>) -> Self {
        Self {
            age_net,
            gender_net,
        }
    }
}

impl AttributeClassifier for AgeGenderClassifier {
    fn classify(&mut self, face: &Frame) -> Result<Classification, Box<dyn std::error::Error>> {
        let blob = face_blob(face)?;

        let gender_scores = self.gender_net.predict(&blob)?;
        let gender = select_label(&gender_scores, GENDER_LABELS)?;

        let age_scores = self.age_net.predict(&blob)?;
        let age = select_label(&age_scores, AGE_LABELS)?;

        log::debug!("face {}x{}: {gender}, {age}", face.width(), face.height());
        Ok(Classification { gender, age })
    }
}
