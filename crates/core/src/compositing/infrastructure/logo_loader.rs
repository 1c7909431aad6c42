use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::compositing::domain::logo::{scaled_height, Logo};

/// Decodes a logo image and scales it to `target_width`, keeping its aspect
/// ratio.
///
/// Grayscale sources are expanded to three channels; an alpha channel, when
/// present, is kept as the fourth. Output bytes are BGR(A) to match frames.
pub fn load_logo(path: &Path, target_width: u32) -> Result<Logo, Box<dyn std::error::Error>> {
    if target_width == 0 {
        return Err("Logo target width must be positive".into());
    }
    let img = image::open(path)?;
    logo_from_image(img, target_width)
}

fn logo_from_image(img: DynamicImage, target_width: u32) -> Result<Logo, Box<dyn std::error::Error>> {
    let height = scaled_height(img.width(), img.height(), target_width);
    let has_alpha = img.color().has_alpha();

    let logo = if has_alpha {
        let rgba = image::imageops::resize(&img.to_rgba8(), target_width, height, FilterType::Triangle);
        let mut data = rgba.into_raw();
        for px in data.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
        Logo::new(data, target_width, height, 4)?
    } else {
        let rgb = image::imageops::resize(&img.to_rgb8(), target_width, height, FilterType::Triangle);
        let mut data = rgb.into_raw();
        for px in data.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
        Logo::new(data, target_width, height, 3)?
    };

    log::debug!(
        "Logo scaled from {}x{} to {}x{} ({})",
        img.width(),
        img.height(),
        logo.width(),
        logo.height(),
        if has_alpha { "with alpha" } else { "opaque" }
    );
    Ok(logo)
}
