use ndarray::Array4;

/// A loaded classification network: one blob in, one score per class out.
///
/// `&mut self` because inference backends keep per-call input state.
pub trait ClassNetwork: Send {
    fn predict(&mut self, blob: &Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>>;
}
