use crate::shared::frame::Frame;

/// Branding overlay in BGR or BGRA byte order.
///
/// Loaded and scaled once at startup, then only read.
#[derive(Clone, Debug, PartialEq)]
pub struct Logo {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Logo {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self, String> {
        if channels != 3 && channels != 4 {
            return Err(format!("Logo must have 3 or 4 channels, got {channels}"));
        }
        if width == 0 || height == 0 {
            return Err(format!("Logo has empty dimensions {width}x{height}"));
        }
        let expected = (width as usize) * (height as usize) * (channels as usize);
        if data.len() != expected {
            return Err(format!(
                "Logo data has {} bytes, expected {expected}",
                data.len()
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Whether the logo fits entirely inside the frame at `offset`.
    pub fn fits(&self, frame_width: u32, frame_height: u32, offset: (u32, u32)) -> bool {
        let (ox, oy) = (offset.0 as u64, offset.1 as u64);
        oy + self.height as u64 <= frame_height as u64 && ox + self.width as u64 <= frame_width as u64
    }

    /// Draws the logo onto `frame` with its top-left corner at `offset`.
    ///
    /// With an alpha channel each color channel becomes
    /// `a * logo + (1 - a) * frame` (`a = alpha / 255`, truncated to 8 bits);
    /// without one the logo's colors overwrite the frame. Nothing is drawn,
    /// and `false` is returned, when the logo does not fit.
    pub fn composite_onto(&self, frame: &mut Frame, offset: (u32, u32)) -> bool {
        if !self.fits(frame.width(), frame.height(), offset) {
            return false;
        }
        let fw = frame.width() as usize;
        let fc = frame.channels() as usize;
        let lc = self.channels as usize;
        let lw = self.width as usize;
        let (ox, oy) = (offset.0 as usize, offset.1 as usize);
        let dst = frame.data_mut();

        for row in 0..self.height as usize {
            let src_row = &self.data[row * lw * lc..(row + 1) * lw * lc];
            let dst_start = ((oy + row) * fw + ox) * fc;
            let dst_row = &mut dst[dst_start..dst_start + lw * fc];

            for (src_px, dst_px) in src_row.chunks_exact(lc).zip(dst_row.chunks_exact_mut(fc)) {
                if lc == 4 {
                    let alpha = src_px[3] as f64 / 255.0;
                    for c in 0..3 {
                        let blended = alpha * src_px[c] as f64 + (1.0 - alpha) * dst_px[c] as f64;
                        dst_px[c] = blended as u8;
                    }
                } else {
                    dst_px[..3].copy_from_slice(&src_px[..3]);
                }
            }
        }
        true
    }
}

/// Height that keeps the source aspect ratio at `target_width`.
///
/// Truncates like an integer cast of `target / (w / h)`; never returns 0.
pub fn scaled_height(source_width: u32, source_height: u32, target_width: u32) -> u32 {
    let aspect = source_width as f64 / source_height as f64;
    ((target_width as f64 / aspect) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bgra_logo(w: u32, h: u32, bgra: [u8; 4]) -> Logo {
        let data = bgra
            .iter()
            .copied()
            .cycle()
            .take((w * h * 4) as usize)
            .collect();
        Logo::new(data, w, h, 4).unwrap()
    }

    fn bgr_logo(w: u32, h: u32, bgr: [u8; 3]) -> Logo {
        let data = bgr.iter().copied().cycle().take((w * h * 3) as usize).collect();
        Logo::new(data, w, h, 3).unwrap()
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * frame.width() as usize + x) * 3;
        [frame.data()[idx], frame.data()[idx + 1], frame.data()[idx + 2]]
    }

    #[test]
    fn test_new_rejects_bad_channels() {
        assert!(Logo::new(vec![0; 8], 2, 2, 2).is_err());
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(Logo::new(vec![0; 11], 2, 2, 3).is_err());
    }

    #[test]
    fn test_opaque_pixel_equals_logo() {
        let mut frame = Frame::filled(100, 100, [10, 20, 30], 0);
        let logo = bgra_logo(5, 5, [200, 150, 100, 255]);
        assert!(logo.composite_onto(&mut frame, (10, 10)));
        assert_eq!(pixel(&frame, 12, 12), [200, 150, 100]);
    }

    #[test]
    fn test_transparent_pixel_keeps_background() {
        let mut frame = Frame::filled(100, 100, [10, 20, 30], 0);
        let logo = bgra_logo(5, 5, [200, 150, 100, 0]);
        let original = frame.clone();
        assert!(logo.composite_onto(&mut frame, (10, 10)));
        assert_eq!(frame, original);
    }

    #[test]
    fn test_half_alpha_blends_and_truncates() {
        let mut frame = Frame::filled(20, 20, [0, 100, 255], 0);
        let logo = bgra_logo(1, 1, [255, 0, 0, 128]);
        logo.composite_onto(&mut frame, (0, 0));
        // a = 128/255 ≈ 0.50196
        // c0: 0.50196*255 + 0.49804*0   = 128.0 -> 128
        // c1: 0.50196*0   + 0.49804*100 = 49.80 -> 49
        // c2: 0.50196*0   + 0.49804*255 = 127.0 -> 127
        assert_eq!(pixel(&frame, 0, 0), [128, 49, 127]);
    }

    #[test]
    fn test_opaque_logo_without_alpha_overwrites() {
        let mut frame = Frame::filled(50, 50, [1, 2, 3], 0);
        let logo = bgr_logo(4, 3, [9, 8, 7]);
        logo.composite_onto(&mut frame, (10, 10));
        assert_eq!(pixel(&frame, 10, 10), [9, 8, 7]);
        assert_eq!(pixel(&frame, 13, 12), [9, 8, 7]);
        assert_eq!(pixel(&frame, 14, 12), [1, 2, 3]);
        assert_eq!(pixel(&frame, 13, 13), [1, 2, 3]);
        assert_eq!(pixel(&frame, 9, 10), [1, 2, 3]);
    }

    #[rstest]
    #[case::exact_fit(90, 60, true)]
    #[case::one_too_wide(91, 60, false)]
    #[case::one_too_tall(90, 61, false)]
    fn test_fits_boundary(#[case] w: u32, #[case] h: u32, #[case] expected: bool) {
        // 100x70 frame, offset (10, 10)
        let logo = bgr_logo(w, h, [0, 0, 0]);
        assert_eq!(logo.fits(100, 70, (10, 10)), expected);
    }

    #[test]
    fn test_oversized_logo_leaves_frame_unchanged() {
        let mut frame = Frame::filled(100, 100, [5, 5, 5], 0);
        let original = frame.clone();
        let logo = bgra_logo(95, 20, [255, 255, 255, 255]);
        assert!(!logo.composite_onto(&mut frame, (10, 10)));
        assert_eq!(frame, original);
    }

    #[rstest]
    #[case::square(400, 400, 150, 150)]
    #[case::wide(600, 200, 150, 50)]
    #[case::tall(100, 300, 150, 450)]
    #[case::truncates(640, 427, 150, 100)]
    #[case::very_wide(10_000, 10, 150, 1)]
    fn test_scaled_height(
        #[case] w: u32,
        #[case] h: u32,
        #[case] target: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(scaled_height(w, h, target), expected);
    }
}
