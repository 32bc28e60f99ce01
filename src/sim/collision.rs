//! Collision detection and response against static platforms
//!
//! Axis-aligned boxes only. Resolution picks the first matching case in a fixed
//! priority order: top landing, then bottom bump, then side push-out. Platforms
//! may overlap each other along one axis, so that order decides the outcome and
//! must not be rearranged.

use super::platform::Platform;
use super::player::Player;

/// What a single player-vs-platform check did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Boxes do not overlap
    Miss,
    /// Came down onto the top surface; the player is grounded this frame
    Landed,
    /// Rose into the underside and was stopped
    Bumped,
    /// Pushed back out past the platform's left edge
    SideLeft,
    /// Pushed back out past the platform's right edge
    SideRight,
    /// Overlapping but no rule applied (body horizontally inside the platform)
    Embedded,
}

impl Contact {
    /// Only a top landing counts as ground contact
    #[inline]
    pub fn is_grounded(self) -> bool {
        self == Contact::Landed
    }
}

/// Strict AABB overlap between the player body and a platform.
/// Touching edges do not count.
pub fn overlaps(player: &Player, platform: &Platform) -> bool {
    player.pos.x < platform.right()
        && player.pos.x + player.width() > platform.left()
        && player.pos.y < platform.bottom()
        && player.pos.y + player.height() > platform.top()
}

impl Player {
    /// Resolve overlap with one platform and report which rule fired
    pub fn resolve_platform(&mut self, platform: &Platform) -> Contact {
        if !overlaps(self, platform) {
            return Contact::Miss;
        }

        let width = self.width();
        let height = self.height();
        let bottom = self.pos.y + height;

        // Top landing. The previous bottom edge is estimated by subtracting the raw
        // velocity, not velocity * dt; resting contact depends on this exact form.
        if self.vel.y > 0.0 && bottom - self.vel.y <= platform.top() {
            self.pos.y = platform.top() - height;
            self.vel.y = 0.0;
            self.reset_jumps();
            log::trace!("Landed on platform at ({}, {})", platform.x(), platform.y());
            return Contact::Landed;
        }

        // Bottom bump. Unreachable under strict overlap (y < bottom always holds
        // here) but kept in its slot so the rule order stays intact.
        if self.vel.y < 0.0 && self.pos.y >= platform.bottom() {
            self.pos.y = platform.bottom();
            self.vel.y = 0.0;
            return Contact::Bumped;
        }

        // Side push-out, only while inside the platform's vertical band
        if bottom > platform.top() && self.pos.y < platform.bottom() {
            if self.pos.x + width > platform.left() && self.pos.x < platform.left() {
                self.pos.x = platform.left() - width;
                self.bounce_horizontal();
                return Contact::SideLeft;
            }
            if self.pos.x < platform.right() && self.pos.x + width > platform.right() {
                self.pos.x = platform.right();
                self.bounce_horizontal();
                return Contact::SideRight;
            }
        }

        Contact::Embedded
    }

    /// Resolve overlap with `platform`; true only when the player landed on top
    pub fn check_platform_collision(&mut self, platform: &Platform) -> bool {
        self.resolve_platform(platform).is_grounded()
    }
}
