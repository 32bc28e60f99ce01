//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws, reads the
//! clock, or touches the browser:
//! - Time arrives as host timestamps or explicit `dt`
//! - Platforms are tested in level order
//! - Every operation is total; bad input is corrected, never reported

pub mod collision;
pub mod level;
pub mod platform;
pub mod player;
pub mod tick;

pub use collision::{Contact, overlaps};
pub use level::{default_level, default_spawn};
pub use platform::Platform;
pub use player::Player;
pub use tick::{World, frame_delta};
