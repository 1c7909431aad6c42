use std::path::Path;

use ndarray::Array4;
use opencv::core::Mat;
use opencv::dnn::{self, Net};
use opencv::prelude::*;

use crate::classification::domain::class_network::ClassNetwork;

/// Caffe classification network run through the OpenCV DNN module.
pub struct CaffeNetwork {
    net: Net,
}

impl CaffeNetwork {
    /// Loads a `.caffemodel` weights file with its `.prototxt` definition.
    pub fn new(model_path: &Path, proto_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        for path in [model_path, proto_path] {
            if !path.is_file() {
                return Err(format!("Network file not found: {}", path.display()).into());
            }
        }
        let model = path_str(model_path)?;
        let proto = path_str(proto_path)?;

        let net = dnn::read_net(model, proto, "")?;
        if net.empty()? {
            return Err(format!("Network has no layers: {}", model_path.display()).into());
        }
        Ok(Self { net })
    }
}

impl ClassNetwork for CaffeNetwork {
    fn predict(&mut self, blob: &Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let shape = blob
            .shape()
            .iter()
            .map(|&d| i32::try_from(d))
            .collect::<Result<Vec<_>, _>>()?;
        let flat = blob.as_slice().ok_or("Blob is not contiguous")?;

        let input: Mat = Mat::from_slice(flat)?.reshape_nd(1, &shape)?.try_clone()?;
        self.net.set_input_def(&input)?;
        let output = self.net.forward_single_def()?;
        Ok(output.data_typed::<f32>()?.to_vec())
    }
}

fn path_str(path: &Path) -> Result<&str, Box<dyn std::error::Error>> {
    path.to_str()
        .ok_or_else(|| format!("Path is not valid UTF-8: {}", path.display()).into())
}
