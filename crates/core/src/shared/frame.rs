use ndarray::{ArrayView2, ArrayView3, ArrayViewMut3};

use crate::shared::face_box::FaceBox;

/// A single camera/image frame: contiguous BGR bytes in row-major order.
///
/// BGR is the capture backend's native order and the order the
/// classification networks were trained on, so no swap happens anywhere
/// between capture and inference. Still images are converted at the I/O
/// boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// A frame filled with a single BGR color.
    pub fn filled(width: u32, height: u32, bgr: [u8; 3], index: usize) -> Self {
        let data = bgr
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * 3)
            .collect();
        Self::new(data, width, height, 3, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Mirrors the frame around its vertical axis, in place.
    pub fn flip_horizontal(&mut self) {
        let w = self.width as usize;
        let c = self.channels as usize;
        for row in self.data.chunks_exact_mut(w * c) {
            for x in 0..w / 2 {
                let (left, right) = (x * c, (w - 1 - x) * c);
                for ch in 0..c {
                    row.swap(left + ch, right + ch);
                }
            }
        }
    }

    /// Luminance conversion using the fixed-point BT.601 weights OpenCV
    /// applies for `COLOR_BGR2GRAY`.
    pub fn to_gray(&self) -> GrayFrame {
        let c = self.channels as usize;
        let data = self
            .data
            .chunks_exact(c)
            .map(|px| {
                let b = px[0] as u32;
                let g = px[1] as u32;
                let r = px[2] as u32;
                ((b * 1868 + g * 9617 + r * 4899 + (1 << 13)) >> 14) as u8
            })
            .collect();
        GrayFrame::new(data, self.width, self.height)
    }

    /// Copies the pixels under `face` into a new frame.
    ///
    /// Returns `None` when the box is empty or not fully inside the frame.
    pub fn crop(&self, face: &FaceBox) -> Option<Frame> {
        if face.is_empty() || !face.is_within(self.width, self.height) {
            return None;
        }
        let fw = self.width as usize;
        let c = self.channels as usize;
        let (x, y) = (face.x as usize, face.y as usize);
        let (w, h) = (face.width as usize, face.height as usize);

        let mut data = Vec::with_capacity(w * h * c);
        for row in y..y + h {
            let start = (row * fw + x) * c;
            data.extend_from_slice(&self.data[start..start + w * c]);
        }
        Some(Frame::new(data, w as u32, h as u32, self.channels, self.index))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

/// Single-channel 8-bit image fed to the face locator.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "data length must equal width * height"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data)
            .expect("GrayFrame data length must match dimensions")
    }
}
