//! Static platform geometry
//!
//! Platforms are axis-aligned rectangles in world pixels (origin top-left,
//! y grows downward). They never move or change after level setup.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default platform fill
pub const DEFAULT_PLATFORM_COLOR: &str = "#4CAF50";

/// An immutable rectangle the player can stand on or bump into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    /// Hex fill color (`#rrggbb`), only read by the renderer
    color: String,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color: color.into(),
        }
    }

    /// Platform with the default ground color
    pub fn plain(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, width, height, DEFAULT_PLATFORM_COLOR)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Left edge
    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge (the walkable surface)
    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}
