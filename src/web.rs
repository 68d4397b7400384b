//! wasm-bindgen entry points for JS hosts.
//!
//! `&mut [u8]` arguments are copied in from the JS typed array and written
//! back after the call, so the caller sees the mutation in its own array.

use wasm_bindgen::Clamped;
use wasm_bindgen::prelude::*;
use web_sys::ImageData;

use crate::buffer::RgbaBuffer;
use crate::color::{ColorKey, TargetColor};
use crate::error::FilterError;
use crate::filter;

impl From<FilterError> for JsValue {
    fn from(e: FilterError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

/// Remove the background of an RGBA8888 array in place.
/// Returns the number of pixels made transparent.
#[wasm_bindgen(js_name = removeBackground)]
pub fn remove_background_rgba(
    data: &mut [u8],
    width: u32,
    height: u32,
    target_r: i32,
    target_g: i32,
    target_b: i32,
    threshold: i32,
) -> Result<u32, JsValue> {
    let mut view = RgbaBuffer::new(data, width, height)?;
    let key = ColorKey::new(TargetColor::new(target_r, target_g, target_b), threshold);
    Ok(filter::remove_background(&mut view, key) as u32)
}

/// Boost matching pixels of an RGBA8888 array in place.
/// Returns the number of pixels changed.
#[wasm_bindgen(js_name = enhanceColor)]
#[allow(clippy::too_many_arguments)]
pub fn enhance_color_rgba(
    data: &mut [u8],
    width: u32,
    height: u32,
    target_r: i32,
    target_g: i32,
    target_b: i32,
    threshold: i32,
    boost_factor: f32,
) -> Result<u32, JsValue> {
    let mut view = RgbaBuffer::new(data, width, height)?;
    let key = ColorKey::new(TargetColor::new(target_r, target_g, target_b), threshold);
    Ok(filter::enhance_color(&mut view, key, boost_factor) as u32)
}

/// Remove the background of a canvas `ImageData`, returning a new one.
#[wasm_bindgen(js_name = removeBackgroundImageData)]
pub fn remove_background_image_data(
    image: &ImageData,
    target_hex: &str,
    threshold: i32,
) -> Result<ImageData, JsValue> {
    let (width, height) = (image.width(), image.height());
    let Clamped(mut data) = image.data();
    let key = ColorKey::new(TargetColor::from_hex(target_hex)?, threshold);
    let mut view = RgbaBuffer::new(&mut data, width, height)?;
    let matched = filter::remove_background(&mut view, key);
    log::debug!("removeBackgroundImageData: {matched} pixels cleared");
    ImageData::new_with_u8_clamped_array_and_sh(Clamped(&data), width, height)
}
