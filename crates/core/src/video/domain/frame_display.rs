use crate::shared::frame::Frame;

/// Interactive output surface for annotated frames.
pub trait FrameDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `timeout_ms` for a key press and returns it, if any.
    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<char>, Box<dyn std::error::Error>>;

    /// Tears down any windows. Safe to call more than once.
    fn close(&mut self);
}
