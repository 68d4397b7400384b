//! C ABI exports for hosts that hand over a pointer into this module's
//! linear memory.
//!
//! Neither function reports errors: arguments that can't describe a valid
//! buffer (null pointer, negative or overflowing dimensions) are logged and
//! the call does nothing.

use crate::buffer::RgbaBuffer;
use crate::color::{ColorKey, TargetColor};
use crate::filter;

/// Zero the alpha of every pixel within `threshold` of the target color.
///
/// # Safety
///
/// `buffer` must point to `width * height * 4` bytes of RGBA8888 data that
/// are valid for reads and writes and not accessed by anything else for the
/// duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn remove_background(
    buffer: *mut u8,
    width: i32,
    height: i32,
    target_r: i32,
    target_g: i32,
    target_b: i32,
    threshold: i32,
) {
    // SAFETY: forwarded from this function's contract.
    let mut view = match unsafe { RgbaBuffer::from_raw_parts(buffer, width, height) } {
        Ok(view) => view,
        Err(e) => {
            log::warn!("remove_background: ignoring call: {e}");
            return;
        }
    };
    let key = ColorKey::new(TargetColor::new(target_r, target_g, target_b), threshold);
    filter::remove_background(&mut view, key);
}

/// Multiply the RGB channels of every pixel within `threshold` of the target
/// color by `boost_factor`, clamped to 0..=255.
///
/// # Safety
///
/// Same contract as [`remove_background`].
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn enhance_color(
    buffer: *mut u8,
    width: i32,
    height: i32,
    target_r: i32,
    target_g: i32,
    target_b: i32,
    threshold: i32,
    boost_factor: f32,
) {
    // SAFETY: forwarded from this function's contract.
    let mut view = match unsafe { RgbaBuffer::from_raw_parts(buffer, width, height) } {
        Ok(view) => view,
        Err(e) => {
            log::warn!("enhance_color: ignoring call: {e}");
            return;
        }
    };
    let key = ColorKey::new(TargetColor::new(target_r, target_g, target_b), threshold);
    filter::enhance_color(&mut view, key, boost_factor);
}
