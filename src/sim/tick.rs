//! Per-frame simulation step
//!
//! `World` owns the player and the platform list and advances them one frame at
//! a time from host timestamps.

use super::level::{default_level, default_spawn};
use super::platform::Platform;
use super::player::Player;
use crate::consts::MAX_FRAME_DT;
use crate::input::Command;
use crate::renderer::{PlayerPose, Snapshot};
use crate::tuning::PhysicsTuning;

/// Seconds between two host timestamps (milliseconds), clamped to `[0, MAX_FRAME_DT]`.
///
/// The upper clamp keeps a long pause (tab switch) from teleporting the player
/// through platforms.
pub fn frame_delta(prev_ms: f64, now_ms: f64) -> f32 {
    let dt = ((now_ms - prev_ms) / 1000.0) as f32;
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}

/// The whole simulated level: one player and a fixed set of platforms
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    platforms: Vec<Platform>,
    /// Timestamp of the previous tick (ms), None before the first
    last_time: Option<f64>,
    /// Frames stepped so far
    frame: u64,
}

impl World {
    pub fn new(player: Player, platforms: Vec<Platform>) -> Self {
        Self {
            player,
            platforms,
            last_time: None,
            frame: 0,
        }
    }

    /// The built-in level with a player at the default spawn point
    pub fn with_default_level(tuning: PhysicsTuning) -> Self {
        Self::new(
            Player::with_tuning(default_spawn(), tuning),
            default_level(),
        )
    }

    #[inline]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Set the timestamp the next tick measures from
    pub fn reset_clock(&mut self, now_ms: f64) {
        self.last_time = Some(now_ms);
    }

    /// Advance to host time `now_ms`. Returns the `dt` that was simulated.
    /// The first tick without a baseline simulates a zero-length frame.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(prev) => frame_delta(prev, now_ms),
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        self.step(dt);
        dt
    }

    /// Run one frame of `dt` seconds. Returns true if the player is grounded this frame.
    ///
    /// Platforms are tested in level order and the pass stops at the first landing.
    /// Gravity is applied only when no platform reported one, so grounded state is
    /// re-established by contact every frame.
    pub fn step(&mut self, dt: f32) -> bool {
        self.frame += 1;
        self.player.update(dt);

        let player = &mut self.player;
        let grounded = self
            .platforms
            .iter()
            .any(|platform| player.check_platform_collision(platform));

        if !grounded {
            self.player.fall();
        }
        grounded
    }

    /// Route an input command to the player. Only a jump can be refused.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => {
                self.player.move_left();
                true
            }
            Command::MoveRight => {
                self.player.move_right();
                true
            }
            Command::Jump => self.player.jump(),
        }
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self, dt: f32) -> Snapshot<'_> {
        Snapshot {
            player: PlayerPose {
                pos: self.player.pos,
                size: self.player.size(),
                rotation: self.player.rotation,
            },
            jumps_left: self.player.jumps_left(),
            spawn: self.player.spawn(),
            platforms: &self.platforms,
            dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    fn world_with(platforms: Vec<Platform>) -> World {
        World::new(Player::new(Vec2::new(SPAWN_X, SPAWN_Y)), platforms)
    }

    #[test]
    fn test_frame_delta_clamps() {
        assert_eq!(frame_delta(1000.0, 1000.0), 0.0);
        assert!((frame_delta(1000.0, 1016.0) - 0.016).abs() < 1e-6);
        // Long stall (tab resume)
        assert_eq!(frame_delta(0.0, 5000.0), MAX_FRAME_DT);
        // Clock went backwards
        assert_eq!(frame_delta(2000.0, 1000.0), 0.0);
        assert_eq!(frame_delta(0.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_landing_scenario() {
        let mut world = world_with(vec![Platform::plain(0.0, 350.0, 150.0, 50.0)]);
        world.player.pos = Vec2::new(50.0, 349.0);
        world.player.vel.y = 50.0;
        world.player.jump();
        world.player.vel.y = 50.0;

        let grounded = world.step(1.0 / 60.0);
        assert!(grounded);
        assert_eq!(world.player.pos.y, 320.0);
        assert_eq!(world.player.vel.y, 0.0);
        assert_eq!(world.player.jumps_left(), 2);
    }

    #[test]
    fn test_airborne_frame_applies_gravity() {
        let mut world = world_with(Vec::new());
        assert!(!world.step(1.0 / 60.0));
        assert!((world.player.vel.y - GRAVITY / 60.0).abs() < 1e-4);
        assert_eq!(world.frame(), 1);
    }

    #[test]
    fn test_platform_order_decides_landing() {
        // Two overlapping platforms: the pass stops at the first one in level order
        let first = Platform::plain(0.0, 350.0, 150.0, 50.0);
        let second = Platform::plain(40.0, 340.0, 100.0, 50.0);
        let mut world = world_with(vec![first, second]);
        world.player.pos = Vec2::new(50.0, 325.0);
        world.player.vel.y = 100.0;

        assert!(world.step(0.0));
        // Snapped onto the first platform even though the second sits higher
        assert_eq!(world.player.pos.y, 320.0);
    }

    #[test]
    fn test_player_settles_on_spawn_ledge() {
        let mut world = World::with_default_level(PhysicsTuning::default());
        let mut now = 0.0;
        world.reset_clock(now);
        for _ in 0..240 {
            now += 1000.0 / 60.0;
            world.tick(now);
        }
        // Spawn ledge top is 250
        assert!((world.player.pos.y - 220.0).abs() < 0.5, "{:?}", world.player.pos);
        assert_eq!(world.player.jumps_left(), 2);
        assert_eq!(world.player.pos.x, SPAWN_X);
    }

    #[test]
    fn test_jump_from_ground_and_land_again() {
        let mut world = world_with(vec![Platform::plain(0.0, 350.0, 800.0, 50.0)]);
        world.player.pos = Vec2::new(100.0, 320.0);

        assert!(world.apply(Command::Jump));
        assert_eq!(world.player.jumps_left(), 1);
        assert!(world.apply(Command::Jump));
        assert!(!world.apply(Command::Jump));

        let mut landed = false;
        for _ in 0..300 {
            if world.step(1.0 / 60.0) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(world.player.pos.y, 320.0);
        assert_eq!(world.player.jumps_left(), 2);
    }

    #[test]
    fn test_resting_body_holds_height() {
        let mut world = world_with(vec![Platform::plain(0.0, 350.0, 800.0, 50.0)]);
        world.player.pos = Vec2::new(100.0, 320.0);

        // Touching is not overlapping, so contact is re-made every other frame
        let mut grounded_frames = 0;
        for _ in 0..20 {
            if world.step(1.0 / 60.0) {
                grounded_frames += 1;
            }
            assert_eq!(world.player.pos.y, 320.0);
            assert_eq!(world.player.jumps_left(), 2);
        }
        assert_eq!(grounded_frames, 10);
    }

    #[test]
    fn test_falling_off_world_respawns() {
        let mut world = world_with(Vec::new());
        world.player.pos = Vec2::new(400.0, 450.0);
        let mut respawned = false;
        for _ in 0..120 {
            world.step(1.0 / 60.0);
            if world.player.pos == Vec2::new(SPAWN_X, SPAWN_Y) {
                respawned = true;
                break;
            }
        }
        assert!(respawned);
        // Gravity from the respawn frame is the only velocity left
        assert_eq!(world.player.vel.x, 0.0);
        assert_eq!(world.player.rotation, 0.0);
        assert_eq!(world.player.jumps_left(), 2);
    }

    #[test]
    fn test_apply_moves() {
        let mut world = world_with(Vec::new());
        assert!(world.apply(Command::MoveRight));
        assert_eq!(world.player.vel.x, MOVE_SPEED);
        assert!(world.apply(Command::MoveLeft));
        assert_eq!(world.player.vel.x, -MOVE_SPEED);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut world = World::with_default_level(PhysicsTuning::default());
        world.player.rotation = 0.5;
        world.apply(Command::Jump);
        let snap = world.snapshot(0.016);
        assert_eq!(snap.player.pos, world.player.pos);
        assert_eq!(snap.player.rotation, 0.5);
        assert_eq!(snap.jumps_left, 1);
        assert_eq!(snap.platforms.len(), 25);
        assert_eq!(snap.spawn, Vec2::new(SPAWN_X, SPAWN_Y));
    }
}
