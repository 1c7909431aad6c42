use std::path::Path;

use crate::classification::domain::class_network::ClassNetwork;
use crate::classification::infrastructure::caffe_network::CaffeNetwork;
use crate::classification::infrastructure::onnx_network::OnnxNetwork;

/// Inference backend implied by a model file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkBackend {
    /// `.caffemodel` weights plus a `.prototxt` definition, run by OpenCV DNN.
    Caffe,
    /// Single `.onnx` file, run by ONNX Runtime.
    Onnx,
}

impl NetworkBackend {
    pub fn for_model(model_path: &Path) -> Self {
        let is_onnx = model_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("onnx"));
        if is_onnx {
            NetworkBackend::Onnx
        } else {
            NetworkBackend::Caffe
        }
    }
}

/// Loads a classification network, picking the backend from the model file.
///
/// `proto_path` is only read for Caffe models.
pub fn load_network(
    model_path: &Path,
    proto_path: &Path,
) -> Result<Box<dyn ClassNetwork>, Box<dyn std::error::Error>> {
    match NetworkBackend::for_model(model_path) {
        NetworkBackend::Onnx => Ok(Box::new(OnnxNetwork::new(model_path)?)),
        NetworkBackend::Caffe => Ok(Box::new(CaffeNetwork::new(model_path, proto_path)?)),
    }
}
