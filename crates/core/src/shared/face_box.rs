/// Axis-aligned face rectangle in frame pixel coordinates.
///
/// Produced by a face locator and consumed within the same frame
/// iteration; never carried across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// True when the whole box lies inside a `frame_width × frame_height` frame.
    pub fn is_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.right() as i64 <= frame_width as i64
            && self.bottom() as i64 <= frame_height as i64
    }

    /// Baseline origin for the label text drawn above the box.
    pub fn label_origin(&self, lift: i32) -> (i32, i32) {
        (self.x, self.y - lift)
    }
}
