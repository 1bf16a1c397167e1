//! Color constants and 32-bit RGBA packing.

use lume_math::Vec4;

/// Colors are 4-component floats until the moment they are written to the
/// color buffer, where they become one 8-bit channel each in a `u32`.
pub type Color = Vec4;

pub const WHITE: Color = Vec4::new(1.0, 1.0, 1.0, 1.0);
pub const GREY: Color = Vec4::new(0.5, 0.5, 0.5, 1.0);
pub const DARK: Color = Vec4::new(0.15, 0.15, 0.15, 1.0);
pub const BLACK: Color = Vec4::new(0.0, 0.0, 0.0, 1.0);
pub const BLUE: Color = Vec4::new(0.0, 0.0, 1.0, 1.0);
pub const GREEN: Color = Vec4::new(0.0, 1.0, 0.0, 1.0);
pub const RED: Color = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// Pack a color into a 32-bit RGBA value, one 8-bit channel per component.
///
/// Channels are clamped to [0, 1], scaled by 255 and truncated. The bit
/// layout is `R | G<<8 | B<<16 | A<<24` - red in the least significant byte -
/// which is the byte order GPU texture uploads expect from this buffer.
pub fn pack_rgba32(color: Color) -> u32 {
    let c = color.clamp(Vec4::ZERO, Vec4::ONE);
    (255.0 * c.x) as u32
        | ((255.0 * c.y) as u32) << 8
        | ((255.0 * c.z) as u32) << 16
        | ((255.0 * c.w) as u32) << 24
}

/// Undo `pack_rgba32`, up to 8-bit quantization.
pub fn unpack_rgba32(packed: u32) -> Color {
    Vec4::new(
        (packed & 0xff) as f32,
        (packed >> 8 & 0xff) as f32,
        (packed >> 16 & 0xff) as f32,
        (packed >> 24 & 0xff) as f32,
    ) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_bit_layout() {
        assert_eq!(pack_rgba32(RED), 0xff0000ff);
        assert_eq!(pack_rgba32(GREEN), 0xff00ff00);
        assert_eq!(pack_rgba32(BLUE), 0xffff0000);
        assert_eq!(pack_rgba32(BLACK), 0xff000000);
        assert_eq!(pack_rgba32(WHITE), 0xffffffff);
    }

    #[test]
    fn test_pack_clamps_out_of_range() {
        let hot = Vec4::new(2.5, -1.0, 0.0, 1.0);
        assert_eq!(pack_rgba32(hot), pack_rgba32(RED));
    }

    #[test]
    fn test_pack_truncates() {
        let c = Vec4::new(0.5, 0.0, 0.0, 0.0);
        assert_eq!(pack_rgba32(c) & 0xff, 127);
    }

    #[test]
    fn test_unpack_round_trip() {
        let c = Vec4::new(0.25, 0.5, 0.75, 1.0);
        let back = unpack_rgba32(pack_rgba32(c));
        assert!((back - c).abs().max_element() < 1.0 / 255.0 + 1e-6);
    }
}
