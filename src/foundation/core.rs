use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Point, Rect, Size, Vec2};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Source-over composite of `self` onto a straight-alpha destination pixel.
    pub fn blend_over(self, dst: [u8; 4]) -> [u8; 4] {
        match self.a {
            0 => dst,
            255 => self.to_array(),
            a => {
                let sa = u16::from(a);
                let inv = 255 - sa;
                let da = u16::from(dst[3]);
                let out_a = sa + u16::from(mul_div255_u8(da, inv));
                if out_a == 0 {
                    return [0, 0, 0, 0];
                }
                let channel = |s: u8, d: u8| -> u8 {
                    let s = u32::from(s) * u32::from(sa) * 255;
                    let d = u32::from(d) * u32::from(da) * u32::from(inv);
                    (((s + d) / 255 + u32::from(out_a) / 2) / u32::from(out_a)).min(255) as u8
                };
                [
                    channel(self.r, dst[0]),
                    channel(self.g, dst[1]),
                    channel(self.b, dst[2]),
                    out_a as u8,
                ]
            }
        }
    }
}

/// Inclusive containment test; kurbo's `Rect::contains` is half-open.
pub fn contains_inclusive(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
