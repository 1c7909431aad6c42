pub mod caffe_network;
pub mod network_factory;
pub mod onnx_network;
