//! Height-to-normal filter over an already-decoded texture.
//!
//! A simple central-difference bump filter: neighbor luminance deltas become
//! the X/Y slopes of a tangent-space normal map. It operates on decoded RGBA
//! pixels and is independent of the block codec.

use crate::texture::DecodedTexture;

/// Derive a tangent-space normal map from a decoded texture.
///
/// Returns a row-major RGBA8 buffer with the same dimensions as the input.
/// `strength` is clamped to [0, 1]; out-of-range neighbor samples read the
/// clamped edge pixel. Each output pixel is `(dx, dy, 1, dy)` with
/// `dx = ((left - right) + 1) / 2` and `dy = ((up - down) + 1) / 2` over
/// strength-scaled neighbor luminance.
pub fn derive_normal_map(texture: &DecodedTexture, strength: f32) -> Vec<u8> {
    let strength = strength.clamp(0.0, 1.0);
    let width = texture.width as i64;
    let height = texture.height as i64;

    let sample = |x: i64, y: i64| -> f32 {
        let x = x.clamp(0, width - 1) as u32;
        let y = y.clamp(0, height - 1) as u32;
        luminance(texture.get_pixel(x, y)) * strength
    };

    let mut out = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let left = sample(x - 1, y);
            let right = sample(x + 1, y);
            let up = sample(x, y - 1);
            let down = sample(x, y + 1);

            let dx = ((left - right) + 1.0) * 0.5;
            let dy = ((up - down) + 1.0) * 0.5;

            out.push(to_channel(dx));
            out.push(to_channel(dy));
            out.push(255);
            out.push(to_channel(dy));
        }
    }
    out
}

/// Rec. 601 luma of an RGBA pixel, in [0, 1].
fn luminance(pixel: [u8; 4]) -> f32 {
    (0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32) / 255.0
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}
