use crate::buffer::RgbaBuffer;
use crate::color::ColorKey;

/// Scale one channel by `boost`, truncating toward zero and clamping to 0..=255.
///
/// Negative and NaN boosts give 0, `+inf` gives 255.
#[inline]
pub fn scale_channel(channel: u8, boost: f32) -> u8 {
    // float -> int `as` saturates and maps NaN to 0
    ((channel as f32 * boost) as i32).clamp(0, 255) as u8
}

/// Boost the RGB channels of pixels close to the key color. Alpha is never
/// written. Returns the number of pixels that matched.
pub fn enhance_color(buffer: &mut RgbaBuffer<'_>, key: ColorKey, boost: f32) -> usize {
    let mut matched = 0;
    for px in buffer.pixels_mut() {
        if key.matches([px[0], px[1], px[2]]) {
            for c in 0..3 {
                px[c] = scale_channel(px[c], boost);
            }
            matched += 1;
        }
    }
    matched
}
