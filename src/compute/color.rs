//! RGBA color value and the two color-space helpers the palette needs.

use serde::{Deserialize, Serialize};

/// 8-bit-per-channel RGBA color.
#[repr(C)]
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Per-channel linear interpolation. `t` is not clamped; channels
    /// saturate at the u8 range.
    pub fn lerp(a: Rgba, b: Rgba, t: f32) -> Rgba {
        #[inline]
        fn channel(a: u8, b: u8, t: f32) -> u8 {
            (a as f32 + (b as f32 - a as f32) * t) as u8
        }

        Rgba {
            r: channel(a.r, b.r, t),
            g: channel(a.g, b.g, t),
            b: channel(a.b, b.b, t),
            a: channel(a.a, b.a, t),
        }
    }

    /// Normalized [0, 1] channels, handy for float-color graphics APIs.
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Convert HSV to an opaque RGBA color.
///
/// `h` is in degrees, `s` and `v` in [0, 1]. Channels are truncated, not
/// rounded, using the classic six-sector algorithm.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgba {
    let m = (255.0 * v) as i32;

    if s == 0.0 {
        let grey = to_channel(m);
        return Rgba::rgb(grey, grey, grey);
    }

    let h = h / 60.0;
    let sector = (h.floor() as i64).rem_euclid(6);
    let f = h - h.floor();

    let m_f = m as f32;
    let p = to_channel((m_f * (1.0 - s)) as i32);
    let q = to_channel((m_f * (1.0 - s * f)) as i32);
    let t = to_channel((m_f * (1.0 - s * (1.0 - f))) as i32);
    let m = to_channel(m);

    match sector {
        0 => Rgba::rgb(m, t, p),
        1 => Rgba::rgb(q, m, p),
        2 => Rgba::rgb(p, m, t),
        3 => Rgba::rgb(p, q, m),
        4 => Rgba::rgb(t, p, m),
        _ => Rgba::rgb(m, p, q),
    }
}

#[inline]
fn to_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
