//! Canvas Platformer - a double-jump platformer on a 2D canvas
//!
//! Core modules:
//! - `sim`: Simulation (player physics, platform collisions, per-frame step)
//! - `runner`: Frame scheduling and the start/stop game loop
//! - `renderer`: Read-only snapshots and Canvas 2D drawing
//! - `input`: Discrete player commands and key bindings
//! - `tuning`: Data-driven physics constants
//! - `settings`: Player preferences

pub mod input;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use input::{Command, KeyBindings};
pub use runner::{FrameScheduler, GameLoop, ManualScheduler};
pub use settings::Settings;
pub use tuning::PhysicsTuning;

/// World constants shared by the simulation and the renderer
pub mod consts {
    /// Visible canvas size
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 400.0;
    /// Falling past this y respawns the player
    pub const DEATH_ZONE_Y: f32 = 500.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const SPAWN_X: f32 = 50.0;
    pub const SPAWN_Y: f32 = 200.0;

    /// Horizontal speed set by a move command (pixels/s)
    pub const MOVE_SPEED: f32 = 350.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 900.0;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -450.0;
    /// Jumps allowed between ground contacts
    pub const MAX_JUMPS: u8 = 2;

    /// Per-frame (at 60 Hz) horizontal velocity retention
    pub const FRICTION: f32 = 0.85;
    /// Per-update angular velocity retention
    pub const ANGULAR_FRICTION: f32 = 0.95;
    pub const MAX_ANGULAR_VELOCITY: f32 = 10.0;
    /// Fraction of horizontal motion fed into spin
    pub const MOMENTUM_SPIN: f32 = 0.02;
    /// Spin added by move and jump commands
    pub const COMMAND_SPIN: f32 = 2.0;
    /// Velocity multiplier on wall and platform side hits
    pub const RESTITUTION: f32 = -0.5;

    /// Velocities below these are snapped to zero
    pub const VELOCITY_EPSILON: f32 = 0.1;
    pub const ANGULAR_EPSILON: f32 = 0.01;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Step assumed by `Player::fall`
    pub const FALL_DT: f32 = 1.0 / 60.0;
}
