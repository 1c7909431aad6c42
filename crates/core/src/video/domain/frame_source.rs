use crate::shared::frame::Frame;

/// Produces frames on demand from a camera, file or other source.
///
/// Implementations hide the capture backend; the pipeline only sees
/// owned BGR [`Frame`]s.
pub trait FrameSource: Send {
    /// Returns the next frame, or `None` once the source has nothing more
    /// to give (end of stream or a failed grab).
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the underlying device. Safe to call more than once.
    fn close(&mut self);
}
