use std::path::Path;

use ndarray::Array4;

use crate::classification::domain::class_network::ClassNetwork;

/// Classification network exported to ONNX, run with ONNX Runtime via `ort`.
///
/// Expects a single `[1, 3, 227, 227]` input and a single score output.
pub struct OnnxNetwork {
    session: ort::session::Session,
}

impl OnnxNetwork {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.is_file() {
            return Err(format!("Network file not found: {}", model_path.display()).into());
        }
        let session = ort::session::Session::builder()?
            .with_execution_providers(platform_providers())?
            .commit_from_file(model_path)?;
        Ok(Self { session })
    }
}

impl ClassNetwork for OnnxNetwork {
    fn predict(&mut self, blob: &Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let input_value = ort::value::Tensor::from_array(blob.clone())?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() < 1 {
            return Err("Classification model produced no outputs".into());
        }
        let scores = outputs[0].try_extract_array::<f32>()?;
        Ok(scores.iter().copied().collect())
    }
}

/// Hardware providers for the current platform; ONNX Runtime falls back to
/// its CPU provider when none is listed or registration fails.
fn platform_providers() -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Vec::new()
    }
}
