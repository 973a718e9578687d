//! Individual enhancement steps
//!
//! Each step consumes an RGBA buffer and returns one of the same dimensions
//! (except `resize`). Color math rounds to nearest and clamps to 0..=255;
//! alpha is never modified.

pub mod brightness_contrast;
pub mod grayscale;
pub mod invert;
pub mod resize;
pub mod sharpen;
pub mod threshold;

fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
