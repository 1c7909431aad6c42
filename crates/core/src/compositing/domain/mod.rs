pub mod frame_compositor;
pub mod logo;
pub mod overlay_renderer;
