use ndarray::Array4;

use crate::shared::frame::Frame;

/// Network input edge length.
pub const BLOB_SIZE: usize = 227;

/// Per-channel means (channel 0, 1, 2 of the BGR frame) the age and gender
/// networks were trained with.
pub const MODEL_MEAN_VALUES: [f32; 3] = [78.426_34, 87.768_914, 114.895_85];

/// Builds the `[1, 3, BLOB_SIZE, BLOB_SIZE]` NCHW input tensor for a face crop.
///
/// The crop is bilinearly resized (half-pixel centres, rounded back to
/// 8-bit like the capture library does), then each channel has its mean
/// subtracted. Channel order is left as-is.
pub fn face_blob(face: &Frame) -> Result<Array4<f32>, Box<dyn std::error::Error>> {
    if face.width() == 0 || face.height() == 0 {
        return Err("Cannot build a blob from an empty face crop".into());
    }
    if face.channels() < 3 {
        return Err(format!("Face crop needs 3 channels, got {}", face.channels()).into());
    }

    let src = face.as_ndarray();
    let xs = sample_axis(face.width() as usize, BLOB_SIZE);
    let ys = sample_axis(face.height() as usize, BLOB_SIZE);

    let mut blob = Array4::<f32>::zeros((1, 3, BLOB_SIZE, BLOB_SIZE));
    for (dy, &(y0, y1, wy)) in ys.iter().enumerate() {
        for (dx, &(x0, x1, wx)) in xs.iter().enumerate() {
            for c in 0..3 {
                let top = lerp(src[[y0, x0, c]], src[[y0, x1, c]], wx);
                let bottom = lerp(src[[y1, x0, c]], src[[y1, x1, c]], wx);
                let value = (top + (bottom - top) * wy).round().clamp(0.0, 255.0);
                blob[[0, c, dy, dx]] = value - MODEL_MEAN_VALUES[c];
            }
        }
    }
    Ok(blob)
}

/// Source neighbours and interpolation weight for every destination index.
fn sample_axis(src_len: usize, dst_len: usize) -> Vec<(usize, usize, f32)> {
    let scale = src_len as f32 / dst_len as f32;
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let pos = (d as f32 + 0.5) * scale - 0.5;
            let base = pos.floor();
            let (i0, w) = if base < 0.0 {
                (0, 0.0)
            } else if base as usize >= last {
                (last, 0.0)
            } else {
                (base as usize, pos - base)
            };
            (i0, (i0 + 1).min(last), w)
        })
        .collect()
}

fn lerp(a: u8, b: u8, t: f32) -> f32 {
    a as f32 + (b as f32 - a as f32) * t
}
