//! Borrowed RGBA8888 pixel views.
//!
//! The filters only ever see an [`RgbaBuffer`], whose length has been checked
//! against its dimensions exactly once, here.

use crate::error::FilterError;

/// Bytes per RGBA8888 pixel.
pub const CHANNELS: usize = 4;

/// Mutable view over a caller-owned, row-major RGBA8888 buffer.
#[derive(Debug)]
pub struct RgbaBuffer<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> RgbaBuffer<'a> {
    /// Wrap `data`, which must hold exactly `width * height * 4` bytes.
    pub fn new(data: &'a mut [u8], width: u32, height: u32) -> Result<Self, FilterError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(FilterError::LengthMismatch {
                len: data.len(),
                width,
                height,
                expected,
            });
        }
        Ok(Self { data, width, height })
    }

    /// Build a view from the raw pointer and signed dimensions of the C ABI.
    ///
    /// Rejects null pointers, negative dimensions and sizes that overflow
    /// `usize`. A zero-area image yields an empty view without touching `ptr`.
    ///
    /// # Safety
    ///
    /// When the area is non-zero, `ptr` must be valid for reads and writes of
    /// `width * height * 4` bytes for `'a`, and nothing else may access that
    /// memory while the view is alive.
    pub unsafe fn from_raw_parts(
        ptr: *mut u8,
        width: i32,
        height: i32,
    ) -> Result<Self, FilterError> {
        if width < 0 || height < 0 {
            return Err(FilterError::NegativeDimension { width, height });
        }
        let (width, height) = (width as u32, height as u32);
        let len = byte_len(width, height)?;
        if len == 0 {
            return Ok(Self {
                data: &mut [],
                width,
                height,
            });
        }
        if ptr.is_null() {
            return Err(FilterError::NullBuffer);
        }
        // SAFETY: non-null, and the caller guarantees `len` valid exclusive bytes.
        let data = unsafe { std::slice::from_raw_parts_mut(ptr, len) };
        Ok(Self { data, width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..]
    }

    /// Iterate pixels as mutable 4-byte `r, g, b, a` slices.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(CHANNELS)
    }
}

/// `width * height * 4`, or `DimensionOverflow` if that doesn't fit in `usize`.
pub fn byte_len(width: u32, height: u32) -> Result<usize, FilterError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(FilterError::DimensionOverflow { width, height })
}
