//! The player body
//!
//! Position, velocity and spin of the single controllable square, plus the
//! double-jump allowance. Collision response lives in `collision.rs`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FALL_DT;
use crate::tuning::PhysicsTuning;

/// The player-controlled square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner in world pixels
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Cosmetic rotation (radians); never used for collision
    pub rotation: f32,
    /// Radians per second
    pub angular_vel: f32,
    /// Remaining jumps before the next ground contact
    jumps_left: u8,
    spawn: Vec2,
    tuning: PhysicsTuning,
}

impl Player {
    /// Create a player resting at its spawn point with default physics
    pub fn new(spawn: Vec2) -> Self {
        Self::with_tuning(spawn, PhysicsTuning::default())
    }

    pub fn with_tuning(spawn: Vec2, tuning: PhysicsTuning) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            rotation: 0.0,
            angular_vel: 0.0,
            jumps_left: tuning.max_jumps,
            spawn,
            tuning,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.tuning.player_width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.tuning.player_height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    #[inline]
    pub fn jumps_left(&self) -> u8 {
        self.jumps_left
    }

    #[inline]
    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    #[inline]
    pub fn tuning(&self) -> &PhysicsTuning {
        &self.tuning
    }

    /// Center of the body (rotation pivot for drawing)
    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }

    pub fn move_left(&mut self) {
        self.vel.x = -self.tuning.move_speed;
        self.angular_vel -= self.tuning.command_spin;
    }

    pub fn move_right(&mut self) {
        self.vel.x = self.tuning.move_speed;
        self.angular_vel += self.tuning.command_spin;
    }

    /// Jump if any allowance remains. Returns false (and changes nothing) otherwise.
    pub fn jump(&mut self) -> bool {
        if self.jumps_left == 0 {
            log::debug!("Jump refused: no jumps left");
            return false;
        }
        self.vel.y = self.tuning.jump_impulse;
        self.jumps_left -= 1;
        let spin = if self.vel.x > 0.0 {
            self.tuning.command_spin
        } else {
            -self.tuning.command_spin
        };
        self.angular_vel += spin;
        true
    }

    /// Accumulate one frame of gravity. Always assumes a 60 Hz step.
    pub fn fall(&mut self) {
        self.vel.y += self.tuning.gravity * FALL_DT;
    }

    /// Restore the full jump allowance (ground contact)
    pub fn reset_jumps(&mut self) {
        self.jumps_left = self.tuning.max_jumps;
    }

    /// Put the player back at spawn, motionless and upright
    pub fn respawn(&mut self) {
        log::debug!(
            "Respawn from ({:.1}, {:.1}) to ({:.1}, {:.1})",
            self.pos.x,
            self.pos.y,
            self.spawn.x,
            self.spawn.y
        );
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
        self.rotation = 0.0;
        self.angular_vel = 0.0;
        self.reset_jumps();
    }

    /// Flip and damp horizontal motion and spin after hitting a wall or a platform side
    pub(crate) fn bounce_horizontal(&mut self) {
        self.vel.x *= self.tuning.restitution;
        self.angular_vel *= self.tuning.restitution;
    }

    /// Integrate one frame of motion. `dt` is in seconds and already clamped by the caller.
    ///
    /// Order matters: friction and the world clamp run after integration so the
    /// collision pass that follows sees post-friction velocity.
    pub fn update(&mut self, dt: f32) {
        let t = self.tuning;

        self.pos += self.vel * dt;

        // Spin picks up horizontal momentum
        self.angular_vel += self.vel.x * dt * t.momentum_spin;
        self.angular_vel = self
            .angular_vel
            .clamp(-t.max_angular_velocity, t.max_angular_velocity);
        self.rotation += self.angular_vel * dt;
        self.angular_vel *= t.angular_friction;

        // Frame-rate independent: `friction` is the retention per 1/60 s
        self.vel.x *= t.friction.powf(dt * 60.0);

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.bounce_horizontal();
        }
        if self.pos.x > t.max_x() {
            self.pos.x = t.max_x();
            self.bounce_horizontal();
        }

        if self.pos.y > t.death_zone_y {
            self.respawn();
        }

        if self.vel.x.abs() < t.velocity_epsilon {
            self.vel.x = 0.0;
        }
        if self.angular_vel.abs() < t.angular_epsilon {
            self.angular_vel = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new(Vec2::new(SPAWN_X, SPAWN_Y))
    }

    #[test]
    fn test_new_player_at_spawn() {
        let p = player();
        assert_eq!(p.pos, Vec2::new(50.0, 200.0));
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.jumps_left(), 2);
        assert_eq!(p.size(), Vec2::new(30.0, 30.0));
        assert_eq!(p.center(), Vec2::new(65.0, 215.0));
    }

    #[test]
    fn test_move_commands() {
        let mut p = player();
        p.move_right();
        assert_eq!(p.vel.x, 350.0);
        assert_eq!(p.angular_vel, 2.0);

        // Re-asserting keeps the velocity
        p.move_right();
        assert_eq!(p.vel.x, 350.0);

        p.move_left();
        assert_eq!(p.vel.x, -350.0);
        assert_eq!(p.angular_vel, 2.0);
    }

    #[test]
    fn test_double_jump_then_refused() {
        let mut p = player();
        assert!(p.jump());
        assert_eq!(p.jumps_left(), 1);
        assert_eq!(p.vel.y, -450.0);

        assert!(p.jump());
        assert_eq!(p.jumps_left(), 0);

        let before = p.clone();
        assert!(!p.jump());
        assert_eq!(p.jumps_left(), 0);
        assert_eq!(p.vel, before.vel);
        assert_eq!(p.angular_vel, before.angular_vel);
        assert_eq!(p.pos, before.pos);
    }

    #[test]
    fn test_jump_spin_follows_direction() {
        let mut p = player();
        p.move_right();
        p.jump();
        assert_eq!(p.angular_vel, 4.0);

        let mut p = player();
        p.jump();
        assert_eq!(p.angular_vel, -2.0);
    }

    #[test]
    fn test_fall_uses_fixed_step() {
        let mut p = player();
        p.fall();
        assert!((p.vel.y - 15.0).abs() < 1e-4);
        p.fall();
        assert!((p.vel.y - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_update_integrates_then_applies_friction() {
        let mut p = player();
        p.vel = Vec2::new(60.0, 120.0);
        p.update(0.5);
        assert!((p.pos.x - 80.0).abs() < 1e-4);
        assert!((p.pos.y - 260.0).abs() < 1e-4);
        // Momentum spin: 60 * 0.5 * 0.02 = 0.6, then damped
        assert!((p.rotation - 0.3).abs() < 1e-5);
        assert!((p.angular_vel - 0.57).abs() < 1e-5);
        assert!((p.vel.x - 60.0 * 0.85f32.powf(30.0)).abs() < 1e-3);
        // Vertical velocity is untouched by update
        assert_eq!(p.vel.y, 120.0);
    }

    #[test]
    fn test_angular_velocity_is_clamped() {
        let mut p = player();
        p.angular_vel = 50.0;
        p.update(0.01);
        assert!((p.angular_vel - 10.0 * 0.95).abs() < 1e-4);
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut p = player();
        p.pos.x = 2.0;
        p.vel.x = -350.0;
        p.angular_vel = -4.0;
        p.update(1.0 / 60.0);
        assert_eq!(p.pos.x, 0.0);
        assert!(p.vel.x > 0.0);
        let expected = 350.0 * 0.85 * 0.5;
        assert!((p.vel.x - expected).abs() < 1e-2);
        assert!(p.angular_vel > 0.0);
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut p = player();
        p.pos.x = 768.0;
        p.vel.x = 350.0;
        p.update(1.0 / 60.0);
        assert_eq!(p.pos.x, 770.0);
        assert!((p.vel.x + 350.0 * 0.85 * 0.5).abs() < 1e-2);
    }

    #[test]
    fn test_death_zone_respawns() {
        let mut p = player();
        p.jump();
        p.jump();
        p.pos = Vec2::new(400.0, 499.0);
        p.vel = Vec2::new(200.0, 600.0);
        p.rotation = 3.0;
        p.angular_vel = 5.0;
        p.update(0.1);
        assert_eq!(p.pos, Vec2::new(SPAWN_X, SPAWN_Y));
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.rotation, 0.0);
        assert_eq!(p.angular_vel, 0.0);
        assert_eq!(p.jumps_left(), 2);
    }

    #[test]
    fn test_small_velocities_snap_to_zero() {
        let mut p = player();
        p.vel.x = 0.05;
        p.angular_vel = 0.005;
        p.update(0.0);
        assert_eq!(p.vel.x, 0.0);
        assert_eq!(p.angular_vel, 0.0);
    }

    #[test]
    fn test_custom_tuning_changes_allowance() {
        let tuning = PhysicsTuning {
            max_jumps: 3,
            ..Default::default()
        };
        let mut p = Player::with_tuning(Vec2::ZERO, tuning);
        assert!(p.jump());
        assert!(p.jump());
        assert!(p.jump());
        assert!(!p.jump());
        p.reset_jumps();
        assert_eq!(p.jumps_left(), 3);
    }

    proptest! {
        #[test]
        fn prop_idle_motion_settles(
            dt in 0.001f32..=0.1,
            vx in -350.0f32..=350.0,
            spin in -10.0f32..=10.0,
        ) {
            let mut p = player();
            p.vel.x = vx;
            p.angular_vel = spin;
            let mut frames = 0;
            while (p.vel.x != 0.0 || p.angular_vel != 0.0) && frames < 5000 {
                let before = p.vel.x.abs();
                p.update(dt);
                // Friction never grows |vx| (wall bounces halve it)
                prop_assert!(p.vel.x.abs() <= before);
                frames += 1;
            }
            prop_assert_eq!(p.vel.x, 0.0);
            prop_assert_eq!(p.angular_vel, 0.0);
        }

        #[test]
        fn prop_x_stays_in_world(
            x in 0.0f32..=770.0,
            vx in -2000.0f32..=2000.0,
            dt in 0.0f32..=0.1,
            steps in 1usize..60,
        ) {
            let mut p = player();
            p.pos.x = x;
            p.vel.x = vx;
            for _ in 0..steps {
                let before = p.vel.x;
                let crossed = p.pos.x + before * dt < 0.0 || p.pos.x + before * dt > 770.0;
                p.update(dt);
                prop_assert!(p.pos.x >= 0.0 && p.pos.x <= 770.0);
                if crossed && p.vel.x != 0.0 {
                    let damped = before * 0.85f32.powf(dt * 60.0) * -0.5;
                    prop_assert!((p.vel.x - damped).abs() <= 1e-3 * damped.abs().max(1.0));
                }
            }
        }
    }
}
