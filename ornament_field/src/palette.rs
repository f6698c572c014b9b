//! Light-ornament color palette and ARGB helpers.

/// Fixed palette the light ornaments draw from, cyclically by index.
/// Warm golds and reds against cold greens and blues read well on the
/// dark backdrop.
pub const LIGHT_PALETTE: [u32; 6] = [
    0xFFFFD700, // gold
    0xFFE03131, // crimson
    0xFF2F9E44, // emerald
    0xFF74C0FC, // ice blue
    0xFFFFF3BF, // warm white
    0xFFBE4BDB, // violet
];

/// Scale the RGB channels of a packed ARGB color.  Used to apply the
/// emissive "breathing" intensity at draw time; alpha stays opaque.
pub fn scale_brightness(color: u32, factor: f32) -> u32 {
    let f = factor.max(0.0);
    let scale = |c: u32| (((c as f32) * f) as u32).min(255);
    let r = scale((color >> 16) & 0xFF);
    let g = scale((color >> 8) & 0xFF);
    let b = scale(color & 0xFF);
    0xFF00_0000 | (r << 16) | (g << 8) | b
}
