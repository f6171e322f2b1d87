//! RGBA colors as consumed by the renderer (components in `0.0..=1.0`).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from `0xRRGGBB`.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0), 1.0)
    }

    /// 8-bit channels, for terminal output.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_rgb8() {
        assert_eq!(Rgba::from_hex(0x569cd6).to_rgb8(), (0x56, 0x9c, 0xd6));
        assert_eq!(Rgba::from_hex(0x000000).to_rgb8(), (0, 0, 0));
        assert_eq!(Rgba::WHITE.to_rgb8(), (255, 255, 255));
    }
}
