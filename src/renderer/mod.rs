//! Rendering module
//!
//! The simulation hands the renderer a read-only `Snapshot` once per frame.
//! Drawing itself uses the browser's Canvas 2D API and only exists on wasm32.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use std::fmt;

use glam::Vec2;

use crate::sim::Platform;

/// Where and how the player is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians, applied about the body center
    pub rotation: f32,
}

impl PlayerPose {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Everything the renderer may read for one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub player: PlayerPose,
    pub jumps_left: u8,
    pub spawn: Vec2,
    pub platforms: &'a [Platform],
    /// Seconds simulated this frame (drives decorative animation)
    pub dt: f32,
}

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Shift every channel by `amount`, saturating at 0 and 255
    pub fn adjust(self, amount: i16) -> Self {
        let shift = |c: u8| (c as i16 + amount).clamp(0, 255) as u8;
        Self::new(shift(self.r), shift(self.g), shift(self.b))
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Lighten or darken a hex color, passing unparseable input through unchanged
pub fn adjust_color(hex: &str, amount: i16) -> String {
    match Rgb::from_hex(hex) {
        Some(rgb) => rgb.adjust(amount).to_hex(),
        None => hex.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::from_hex("#4CAF50"), Some(Rgb::new(0x4c, 0xaf, 0x50)));
        assert_eq!(Rgb::from_hex("00ff00"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
        assert_eq!(Rgb::from_hex("#+f0000"), None);
    }

    #[test]
    fn test_adjust_saturates() {
        assert_eq!(adjust_color("#4CAF50", -20), "#389b3c");
        assert_eq!(adjust_color("#00ff00", -20), "#00eb00");
        assert_eq!(adjust_color("#00ff00", 20), "#14ff14");
        assert_eq!(adjust_color("not a color", 20), "not a color");
    }

    #[test]
    fn test_pose_center() {
        let pose = PlayerPose {
            pos: Vec2::new(50.0, 200.0),
            size: Vec2::new(30.0, 30.0),
            rotation: 0.0,
        };
        assert_eq!(pose.center(), Vec2::new(65.0, 215.0));
    }
}
