//! Movement domain: the narrow interfaces the controller talks to.
//!
//! The controller never touches an engine type directly. Contact probing,
//! the rigid body, input and animation all sit behind these traits, so the
//! state machine can be driven by the avian2d adapters in `systems` or by
//! in-memory fakes in tests.

use bevy::math::Vec2;

/// How a force passed to [`PhysicsBody::apply_force`] is integrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Integrated over the current fixed step.
    Continuous,
    /// Applied instantly as a change in momentum.
    Impulse,
}

/// Ground contact query. Must be free of side effects.
pub trait GroundProbe {
    fn is_grounded(&self) -> bool;
}

/// Wall contact query relative to the character's facing.
///
/// `is_touching_front(r)` reports the front sensor's contact gated by `r`;
/// `is_touching_back(r)` reports the back sensor's contact gated by `!r`.
/// Passing the current facing therefore asks "is there a wall on my right",
/// passing its negation asks about the left.
pub trait WallProbe {
    fn is_touching_front(&self, facing_right: bool) -> bool;
    fn is_touching_back(&self, facing_right: bool) -> bool;
}

/// A 2D rigid body the controller steers.
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn apply_force(&mut self, force: Vec2, mode: ForceMode);
    fn gravity_scale(&self) -> f32;
    fn set_gravity_scale(&mut self, scale: f32);
}

/// One frame of polled input.
pub trait InputSource {
    /// Move intent, each axis in `[-1, 1]`.
    fn move_axis(&self) -> Vec2;
    fn jump_pressed(&self) -> bool;
    fn jump_released(&self) -> bool;
    fn dash_pressed(&self) -> bool;
}

/// Observer for presentation: animation triggers and particle bursts.
pub trait AnimationSink {
    fn on_jump_started(&mut self);
    fn on_landed(&mut self);
    fn on_dash_started(&mut self, _direction: Vec2) {}
    /// Fed once per frame for idle/fall blending.
    fn on_vertical_velocity(&mut self, _velocity_y: f32) {}
}

/// Sink for callers that do not animate anything.
impl AnimationSink for () {
    fn on_jump_started(&mut self) {}
    fn on_landed(&mut self) {}
}
