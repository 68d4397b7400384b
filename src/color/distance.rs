use super::TargetColor;

/// Euclidean distance between an RGB pixel and the target in RGB space.
///
/// Differences are taken in `f32` so out-of-range target components can't
/// overflow.
#[inline]
pub fn distance([r, g, b]: [u8; 3], target: TargetColor) -> f32 {
    let dr = r as f32 - target.r as f32;
    let dg = g as f32 - target.g as f32;
    let db = b as f32 - target.b as f32;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// A target color together with the distance a pixel must stay under to match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorKey {
    pub target: TargetColor,
    pub threshold: i32,
}

impl ColorKey {
    pub fn new(target: TargetColor, threshold: i32) -> Self {
        Self { target, threshold }
    }

    /// Strict comparison: a threshold of 0 matches nothing, not even the
    /// target itself.
    #[inline]
    pub fn matches(&self, rgb: [u8; 3]) -> bool {
        distance(rgb, self.target) < self.threshold as f32
    }
}
