//! Conversions between the domain frame types and OpenCV `Mat`s.
//!
//! Only infrastructure adapters touch `Mat`; the domain layer never sees it.
use opencv::core::{Mat, CV_8UC3};
use opencv::prelude::*;

use crate::shared::frame::{Frame, GrayFrame};

/// Copies a BGR `CV_8UC3` mat into an owned frame.
pub fn frame_from_mat(mat: &Mat, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    if mat.typ() != CV_8UC3 {
        return Err(format!("Expected an 8-bit 3-channel image, got Mat type {}", mat.typ()).into());
    }
    let width = u32::try_from(mat.cols())?;
    let height = u32::try_from(mat.rows())?;

    let data = if mat.is_continuous() {
        mat.data_bytes()?.to_vec()
    } else {
        mat.try_clone()?.data_bytes()?.to_vec()
    };
    Ok(Frame::new(data, width, height, 3, index))
}

/// Runs `f` against a `Mat` header that aliases the frame's pixel buffer.
///
/// Drawing through the mat writes straight into the frame; no copy is made.
pub fn with_frame_mat<R>(
    frame: &mut Frame,
    f: impl FnOnce(&mut Mat) -> opencv::Result<R>,
) -> Result<R, Box<dyn std::error::Error>> {
    if frame.channels() != 3 {
        return Err(format!("Expected a 3-channel frame, got {}", frame.channels()).into());
    }
    let rows = i32::try_from(frame.height())?;
    let row_bytes = i32::try_from(frame.width() as usize * 3)?;

    let mut flat = Mat::new_rows_cols_with_data_mut(rows, row_bytes, frame.data_mut())?;
    let mut mat = flat.reshape_mut(3, rows)?;
    Ok(f(&mut *mat)?)
}

/// Borrows a grayscale frame as a single-channel `Mat` view.
pub fn with_gray_mat<R>(
    gray: &GrayFrame,
    f: impl FnOnce(&Mat) -> opencv::Result<R>,
) -> Result<R, Box<dyn std::error::Error>> {
    let rows = i32::try_from(gray.height())?;
    let cols = i32::try_from(gray.width())?;
    let mat = Mat::new_rows_cols_with_data(rows, cols, gray.data())?;
    Ok(f(&mat)?)
}

/// Copies a frame into a fresh owned BGR mat.
pub fn frame_to_mat(frame: &Frame) -> Result<Mat, Box<dyn std::error::Error>> {
    let rows = i32::try_from(frame.height())?;
    let row_bytes = i32::try_from(frame.width() as usize * frame.channels() as usize)?;
    let flat = Mat::new_rows_cols_with_data(rows, row_bytes, frame.data())?;
    let shaped = flat.reshape(i32::from(frame.channels()), rows)?;
    Ok(shaped.try_clone()?)
}
