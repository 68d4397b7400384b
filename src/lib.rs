//! Color-keyed pixel filters for RGBA8888 buffers.
//!
//! Two in-place operations share one predicate: a pixel matches when its
//! Euclidean RGB distance to a target color is strictly below a threshold.
//! Background removal zeroes the alpha of matching pixels; color enhancement
//! multiplies their RGB channels by a boost factor, clamped to 0..=255.
//!
//! The kernel is exposed three ways: the safe [`filter`] API over a validated
//! [`buffer::RgbaBuffer`], the C ABI in [`ffi`] for hosts that own the buffer in
//! linear memory, and wasm-bindgen exports when built for `wasm32`.

pub mod buffer;
pub mod color;
pub mod error;
pub mod ffi;
pub mod filter;
pub mod image_io;
pub mod pipeline;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use buffer::RgbaBuffer;
pub use color::{ColorKey, TargetColor};
pub use error::FilterError;
