use crate::buffer::RgbaBuffer;
use crate::color::ColorKey;

/// Make pixels close to the key color fully transparent.
/// Only alpha is written; RGB and non-matching pixels are left as they were.
/// Returns the number of pixels that matched.
pub fn remove_background(buffer: &mut RgbaBuffer<'_>, key: ColorKey) -> usize {
    let mut matched = 0;
    for px in buffer.pixels_mut() {
        if key.matches([px[0], px[1], px[2]]) {
            px[3] = 0;
            matched += 1;
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::TargetColor;

    fn run(data: &mut [u8], width: u32, height: u32, key: ColorKey) -> usize {
        let mut buf = RgbaBuffer::new(data, width, height).unwrap();
        remove_background(&mut buf, key)
    }

    #[test]
    fn white_pixel_becomes_transparent() {
        let mut px = [255, 255, 255, 255];
        let key = ColorKey::new(TargetColor::new(255, 255, 255), 10);
        assert_eq!(run(&mut px, 1, 1, key), 1);
        assert_eq!(px, [255, 255, 255, 0]);
    }

    #[test]
    fn distant_pixel_is_untouched() {
        let mut px = [10, 10, 10, 255];
        let key = ColorKey::new(TargetColor::new(200, 200, 200), 5);
        assert_eq!(run(&mut px, 1, 1, key), 0);
        assert_eq!(px, [10, 10, 10, 255]);
    }

    #[test]
    fn zero_threshold_keeps_exact_match() {
        let mut px = [0, 255, 0, 200];
        let key = ColorKey::new(TargetColor::GREEN, 0);
        run(&mut px, 1, 1, key);
        assert_eq!(px, [0, 255, 0, 200]);
    }

    #[test]
    fn only_matching_pixels_in_a_row_change() {
        #[rustfmt::skip]
        let mut data = [
            0, 255, 0, 255,
            0, 250, 3, 128,
            255, 0, 0, 255,
        ];
        let key = ColorKey::new(TargetColor::GREEN, 30);
        assert_eq!(run(&mut data, 3, 1, key), 2);
        assert_eq!(data, [0, 255, 0, 0, 0, 250, 3, 0, 255, 0, 0, 255]);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let mut once = [0, 255, 0, 255, 40, 40, 40, 255];
        let key = ColorKey::new(TargetColor::GREEN, 30);
        run(&mut once, 2, 1, key);
        let mut twice = once;
        run(&mut twice, 2, 1, key);
        assert_eq!(once, twice);
    }
}
