pub mod logo_loader;
pub mod opencv_overlay_renderer;
