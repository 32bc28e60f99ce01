//! Built-in level layout
//!
//! One fixed layout with several routes from the spawn ledge to the far right.

use glam::Vec2;

use super::platform::Platform;
use crate::consts::{SPAWN_X, SPAWN_Y};

const SPAWN_GREEN: &str = "#00ff00";
const GROUND: &str = "#4CAF50";
const CAVE: &str = "#455A64";
const MIDDLE: &str = "#FF9800";
const UPPER: &str = "#2196F3";
const SECRET: &str = "#9C27B0";

/// (x, y, width, height, color)
const LAYOUT: [(f32, f32, f32, f32, &str); 25] = [
    // Spawn ledge
    (20.0, 250.0, 100.0, 20.0, SPAWN_GREEN),
    // Ground path
    (0.0, 350.0, 150.0, 50.0, GROUND),
    (200.0, 350.0, 120.0, 50.0, GROUND),
    (370.0, 350.0, 140.0, 50.0, GROUND),
    (560.0, 350.0, 120.0, 50.0, GROUND),
    (730.0, 350.0, 70.0, 50.0, GROUND),
    // Caves below the ground line, inside the death-zone band
    (100.0, 450.0, 120.0, 20.0, CAVE),
    (270.0, 480.0, 100.0, 20.0, CAVE),
    (420.0, 450.0, 140.0, 20.0, CAVE),
    (610.0, 470.0, 90.0, 20.0, CAVE),
    // Middle path
    (150.0, 250.0, 70.0, 20.0, MIDDLE),
    (270.0, 220.0, 90.0, 20.0, MIDDLE),
    (410.0, 250.0, 80.0, 20.0, MIDDLE),
    (540.0, 220.0, 70.0, 20.0, MIDDLE),
    (660.0, 250.0, 90.0, 20.0, MIDDLE),
    // Upper challenge path
    (50.0, 150.0, 60.0, 20.0, UPPER),
    (160.0, 120.0, 70.0, 20.0, UPPER),
    (280.0, 90.0, 60.0, 20.0, UPPER),
    (390.0, 120.0, 80.0, 20.0, UPPER),
    (520.0, 90.0, 70.0, 20.0, UPPER),
    (640.0, 120.0, 90.0, 20.0, UPPER),
    // Secret bonus platforms
    (200.0, 40.0, 50.0, 20.0, SECRET),
    (350.0, 30.0, 40.0, 20.0, SECRET),
    (500.0, 40.0, 50.0, 20.0, SECRET),
    (700.0, 50.0, 40.0, 20.0, SECRET),
];

/// Where the player appears at session start and after every respawn
pub fn default_spawn() -> Vec2 {
    Vec2::new(SPAWN_X, SPAWN_Y)
}

/// The built-in platform list, in collision-test order
pub fn default_level() -> Vec<Platform> {
    let platforms: Vec<Platform> = LAYOUT
        .iter()
        .map(|&(x, y, w, h, color)| Platform::new(x, y, w, h, color))
        .collect();
    log::debug!("Built default level with {} platforms", platforms.len());
    platforms
}
