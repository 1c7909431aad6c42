pub mod annotate_image_use_case;
pub mod detection_context;
pub mod frame_annotator;
pub mod infrastructure;
pub mod live_detection_use_case;
pub mod pipeline_logger;
