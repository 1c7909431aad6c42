pub mod attribute_classifier;
pub mod blob;
pub mod class_network;
pub mod labels;
