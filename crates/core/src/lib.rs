//! Face detection with age and gender annotation.
//!
//! Each feature area is split into `domain` (plain types, traits and pure
//! pixel work) and `infrastructure` (OpenCV, ONNX Runtime and `image`
//! adapters). `pipeline` wires them into the live and still-image flows.
pub mod classification;
pub mod compositing;
pub mod detection;
pub mod pipeline;
pub mod shared;
pub mod video;
