//! Hex color helpers
//!
//! Colors are authored as 24-bit sRGB hex values (`0xRRGGBB`). Shading
//! happens in linear space and the surface applies the sRGB encoding on
//! write, so every color is linearized before it reaches a uniform.

/// Splits `0xRRGGBB` into sRGB components in `0.0..=1.0`
pub fn hex_to_srgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` to linear RGB
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    hex_to_srgb(hex).map(srgb_to_linear)
}

/// Clear color for a render pass from `0xRRGGBB`
pub fn hex_to_clear_color(hex: u32) -> wgpu::Color {
    let [r, g, b] = hex_to_linear(hex);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}
