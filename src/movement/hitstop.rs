//! Movement domain: per-entity hitstop.
//!
//! While a hitstop runs, the owning controller skips its decision and physics
//! passes and its body is held still. Other entities keep simulating.

use bevy::math::Vec2;

use crate::movement::interfaces::PhysicsBody;

#[derive(Debug, Clone, Copy, PartialEq)]
struct FrozenBody {
    velocity: Vec2,
    gravity_scale: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hitstop {
    remaining: f32,
    frozen: Option<FrozenBody>,
}

impl Hitstop {
    pub fn is_active(&self) -> bool {
        self.frozen.is_some()
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    /// Freeze `body` for `duration` seconds. A non-positive duration is a no-op.
    /// Starting while already frozen only extends the freeze.
    pub fn start(&mut self, duration: f32, body: &mut dyn PhysicsBody) {
        if duration <= 0.0 {
            return;
        }

        if self.frozen.is_none() {
            self.frozen = Some(FrozenBody {
                velocity: body.velocity(),
                gravity_scale: body.gravity_scale(),
            });
            body.set_velocity(Vec2::ZERO);
            body.set_gravity_scale(0.0);
        }
        self.remaining = self.remaining.max(duration);
    }

    /// Advance by real time. Returns true if the owner should simulate this frame.
    /// The frame that ends the freeze restores the body and is itself skipped.
    pub fn advance(&mut self, real_dt: f32, body: &mut dyn PhysicsBody) -> bool {
        if self.frozen.is_none() {
            return true;
        }

        self.remaining -= real_dt;
        if self.remaining <= 0.0 {
            self.release(body);
        }
        false
    }

    /// End the freeze immediately, restoring the body.
    pub fn release(&mut self, body: &mut dyn PhysicsBody) {
        if let Some(frozen) = self.frozen.take() {
            body.set_velocity(frozen.velocity);
            body.set_gravity_scale(frozen.gravity_scale);
        }
        self.remaining = 0.0;
    }
}
