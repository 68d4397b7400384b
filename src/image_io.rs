use image::{ImageFormat, RgbaImage};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::color::TargetColor;
use crate::error::FilterError;

pub fn load_image(path: &Path) -> Result<RgbaImage, FilterError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Save as PNG regardless of the extension, so cleared alpha survives.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), FilterError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| FilterError::Io(dir.to_path_buf(), e))?;
    }
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Encode to PNG bytes in memory.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, FilterError> {
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// `<prefix><stem>.png`, e.g. `photo.jpg` -> `removed_bg_photo.png`.
pub fn output_file_name(input: &Path, prefix: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "image".into());
    format!("{prefix}{stem}.png")
}

/// [`output_file_name`] inside `out_dir`.
pub fn output_path(out_dir: &Path, input: &Path, prefix: &str) -> PathBuf {
    out_dir.join(output_file_name(input, prefix))
}

/// Claim `name` in `taken`, appending `_1`, `_2`, ... to the stem until it is free.
pub fn claim_unique_name(taken: &mut HashSet<String>, name: String) -> String {
    if taken.insert(name.clone()) {
        return name;
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{ext}")),
        None => (name.as_str(), String::new()),
    };
    let mut n = 1;
    loop {
        let candidate = format!("{stem}_{n}{ext}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Eye-dropper: the RGB of the pixel at (x, y).
///
/// Callers pass the original image, so the picked color never depends on an
/// earlier filter run.
pub fn sample_color(img: &RgbaImage, x: u32, y: u32) -> Result<TargetColor, FilterError> {
    let (width, height) = img.dimensions();
    if x >= width || y >= height {
        return Err(FilterError::PixelOutOfBounds {
            x,
            y,
            width,
            height,
        });
    }
    let [r, g, b, _] = img.get_pixel(x, y).0;
    Ok(TargetColor::from([r, g, b]))
}
