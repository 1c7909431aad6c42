pub mod camera_source;
pub mod highgui_display;
pub mod image_file_reader;
pub mod image_file_writer;
pub mod mat_convert;
