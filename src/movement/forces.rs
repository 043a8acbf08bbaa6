//! Movement domain: force and gravity derivation.
//!
//! Pure functions of the current velocity, input and a few state bits, so the
//! feel of the controller can be checked without a body or a physics world.

use crate::movement::MovementConfig;

/// Below this a target speed counts as "no input".
pub const RUN_DEADZONE: f32 = 0.01;

/// Sign with zero treated as positive, matching how the run and wall-jump
/// corrections compare directions.
pub fn sign(value: f32) -> f32 {
    if value >= 0.0 { 1.0 } else { -1.0 }
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityRegime {
    Off,
    FastFall,
    JumpCut,
    Hang,
    Fall,
    Base,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GravityInputs {
    pub velocity_y: f32,
    pub input_y: f32,
    pub dash_attacking: bool,
    pub sliding: bool,
    pub jump_cut: bool,
    pub in_jump_arc: bool,
}

impl GravityRegime {
    pub fn select(config: &MovementConfig, inputs: &GravityInputs) -> Self {
        if inputs.dash_attacking || inputs.sliding {
            GravityRegime::Off
        } else if inputs.velocity_y < 0.0 && inputs.input_y < 0.0 {
            GravityRegime::FastFall
        } else if inputs.jump_cut {
            GravityRegime::JumpCut
        } else if inputs.in_jump_arc && inputs.velocity_y.abs() < config.jump_hang_time_threshold {
            GravityRegime::Hang
        } else if inputs.velocity_y < 0.0 {
            GravityRegime::Fall
        } else {
            GravityRegime::Base
        }
    }

    pub fn scale(self, config: &MovementConfig) -> f32 {
        match self {
            GravityRegime::Off => 0.0,
            GravityRegime::FastFall => config.gravity_scale * config.fast_fall_gravity_mult,
            GravityRegime::JumpCut => config.gravity_scale * config.jump_cut_gravity_mult,
            GravityRegime::Hang => config.gravity_scale * config.jump_hang_gravity_mult,
            GravityRegime::Fall => config.gravity_scale * config.fall_gravity_mult,
            GravityRegime::Base => config.gravity_scale,
        }
    }

    /// Terminal fall speed for this regime, if it has one.
    pub fn fall_cap(self, config: &MovementConfig) -> Option<f32> {
        match self {
            GravityRegime::FastFall => Some(config.max_fast_fall_speed),
            GravityRegime::JumpCut | GravityRegime::Fall => Some(config.max_fall_speed),
            GravityRegime::Off | GravityRegime::Hang | GravityRegime::Base => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunInputs {
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub input_x: f32,
    /// How far the target is blended from the current velocity toward the input.
    pub lerp: f32,
    /// Seconds left on the ground window (may be negative).
    pub last_on_ground: f32,
    pub in_jump_arc: bool,
}

/// Horizontal continuous force for one fixed step.
pub fn run_force(config: &MovementConfig, inputs: &RunInputs) -> f32 {
    let mut target_speed = inputs.input_x * config.run_max_speed;
    target_speed = lerp(inputs.velocity_x, target_speed, inputs.lerp);

    let accelerating = target_speed.abs() > RUN_DEADZONE;
    let mut accel_rate = if inputs.last_on_ground > 0.0 {
        if accelerating { config.run_accel_amount } else { config.run_deccel_amount }
    } else if accelerating {
        config.run_accel_amount * config.accel_in_air
    } else {
        config.run_deccel_amount * config.deccel_in_air
    };

    if inputs.in_jump_arc && inputs.velocity_y.abs() < config.jump_hang_time_threshold {
        accel_rate *= config.jump_hang_acceleration_mult;
        target_speed *= config.jump_hang_max_speed_mult;
    }

    if config.conserve_momentum
        && inputs.velocity_x.abs() > target_speed.abs()
        && sign(inputs.velocity_x) == sign(target_speed)
        && target_speed.abs() > RUN_DEADZONE
        && inputs.last_on_ground < 0.0
    {
        accel_rate = 0.0;
    }

    (target_speed - inputs.velocity_x) * accel_rate
}

/// Wall-slide forces: an optional impulse cancelling upward motion, then a
/// continuous force toward the slide speed that cannot overshoot in one step.
pub fn slide_forces(config: &MovementConfig, velocity_y: f32, fixed_dt: f32) -> (Option<f32>, f32) {
    let cancel = (velocity_y > 0.0).then_some(-velocity_y);
    let velocity_y = velocity_y.min(0.0);

    let speed_difference = config.slide_speed - velocity_y;
    let limit = if fixed_dt > 0.0 {
        speed_difference.abs() / fixed_dt
    } else {
        0.0
    };
    let movement = (speed_difference * config.slide_accel).clamp(-limit, limit);

    (cancel, movement)
}
