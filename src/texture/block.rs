//! Decoding of a single 16-byte compressed block into a 4x4 RGBA tile.
//!
//! A block is an 8-byte alpha half followed by an 8-byte color half. Both
//! halves are read as little-endian u64 and sliced with shifts and masks;
//! the packed 3-bit alpha indices start at bit 16 and the 2-bit color
//! indices at bit 32 of their respective halves.

/// 5-bit channel expansion table. The format's expansion is this fixed
/// table, not a linear rescale.
const TABLE5: [u8; 32] = [
    0, 8, 16, 25, 33, 41, 49, 58, 66, 74, 82, 90, 99, 107, 115, 123, 132, 140, 148, 156, 165, 173,
    181, 189, 197, 206, 214, 222, 230, 239, 247, 255,
];

/// 6-bit channel expansion table.
const TABLE6: [u8; 64] = [
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 45, 49, 53, 57, 61, 65, 69, 73, 77, 81, 85, 89, 93,
    97, 101, 105, 109, 113, 117, 121, 125, 130, 134, 138, 142, 146, 150, 154, 158, 162, 166, 170,
    174, 178, 182, 186, 190, 194, 198, 202, 206, 210, 215, 219, 223, 227, 231, 235, 239, 243, 247,
    251, 255,
];

/// One decoded 4x4 tile: 16 RGBA texels in scan order plus an
/// alpha-presence flag.
#[derive(Debug, Clone)]
pub(crate) struct Block {
    pub pixels: [[u8; 4]; 16],
    /// True if any texel's alpha is below full opacity.
    pub has_alpha: bool,
}

impl Block {
    /// Decode one 16-byte block.
    pub fn decode(bytes: &[u8; 16]) -> Self {
        let mut half = [0u8; 8];
        half.copy_from_slice(&bytes[..8]);
        let alpha_bits = u64::from_le_bytes(half);
        half.copy_from_slice(&bytes[8..]);
        let color_bits = u64::from_le_bytes(half);

        let alpha = alpha_table(alpha_bits as u8, (alpha_bits >> 8) as u8);
        let color = color_table(color_bits as u16, (color_bits >> 16) as u16);

        let mut pixels = [[0u8; 4]; 16];
        let mut has_alpha = false;
        for (i, pixel) in pixels.iter_mut().enumerate() {
            let color_index = ((color_bits >> (32 + i * 2)) & 0b11) as usize;
            let alpha_index = ((alpha_bits >> (16 + i * 3)) & 0b111) as usize;

            *pixel = color[color_index];
            pixel[3] = alpha[alpha_index];

            has_alpha |= pixel[3] < u8::MAX;
        }

        Block { pixels, has_alpha }
    }
}

/// Build the 8-entry alpha lookup table from the two reference endpoints.
///
/// `a0 > a1` selects the 7-step interpolated ramp; otherwise the 5-step
/// ramp with fixed 0 and 255 entries at positions 6 and 7.
pub(crate) fn alpha_table(a0: u8, a1: u8) -> [u8; 8] {
    let (a0w, a1w) = (a0 as u32, a1 as u32);
    let mut table = [a0, a1, 0, 0, 0, 0, 0, 255];
    if a0 > a1 {
        for k in 1..7 {
            table[k as usize + 1] = (((7 - k) * a0w + k * a1w) / 7) as u8;
        }
    } else {
        for k in 1..5 {
            table[k as usize + 1] = (((5 - k) * a0w + k * a1w) / 5) as u8;
        }
        table[6] = 0;
    }
    table
}

/// Build the 4-entry color lookup table from the two RGB565 endpoints.
///
/// The mode switch compares the raw 16-bit values: `c0 > c1` selects
/// four-color mode with two interpolated entries, anything else selects
/// three-color mode with a midpoint and a transparent-black fourth entry.
pub(crate) fn color_table(c0: u16, c1: u16) -> [[u8; 4]; 4] {
    let e0 = expand_565(c0);
    let e1 = expand_565(c1);
    if c0 > c1 {
        [
            e0,
            e1,
            interpolate(e0, e1, 2.0 / 3.0),
            interpolate(e0, e1, 1.0 / 3.0),
        ]
    } else {
        [e0, e1, interpolate(e0, e1, 0.5), [0, 0, 0, 0]]
    }
}

/// Expand a 16-bit RGB565 value to 8-bit channels via the fixed tables.
pub(crate) fn expand_565(c: u16) -> [u8; 4] {
    [
        TABLE5[(c >> 11) as usize & 0x1F],
        TABLE6[(c >> 5) as usize & 0x3F],
        TABLE5[c as usize & 0x1F],
        u8::MAX,
    ]
}

fn interpolate(c0: [u8; 4], c1: [u8; 4], m: f32) -> [u8; 4] {
    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        *channel = (c0[i] as f32 * m + c1[i] as f32 * (1.0 - m)) as u8;
    }
    out
}
