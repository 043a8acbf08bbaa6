//! Movement domain: designer-facing tuning profile and the derived runtime configuration.

use bevy::log::warn;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// World gravity the default configuration is derived against (avian2d's default).
pub const DEFAULT_WORLD_GRAVITY_Y: f32 = -9.81;
/// Fixed physics rate the run acceleration amounts are expressed in.
pub const DEFAULT_FIXED_HZ: f32 = 64.0;

/// Error raised when a movement configuration cannot be built or loaded.
#[derive(Debug)]
pub enum ConfigError {
    /// A tuning value was NaN or infinite after derivation.
    NonFinite { field: &'static str, value: f32 },
    /// The world the profile is derived against cannot produce a usable config.
    InvalidWorld { reason: String },
    /// The config file could not be read.
    Io { file: String, message: String },
    /// The config file could not be parsed.
    Parse { file: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonFinite { field, value } => {
                write!(f, "movement config field '{}' is not finite ({})", field, value)
            }
            ConfigError::InvalidWorld { reason } => {
                write!(f, "cannot derive movement config: {}", reason)
            }
            ConfigError::Io { file, message } => {
                write!(f, "Failed to load {}: IO error: {}", file, message)
            }
            ConfigError::Parse { file, message } => {
                write!(f, "Failed to load {}: Parse error: {}", file, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tuning as a designer writes it: heights, times and fractions rather than raw forces.
///
/// Loaded from `assets/data/movement.ron` and turned into a [`MovementConfig`]
/// with [`MovementProfile::derive`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementProfile {
    // Gravity
    pub fall_gravity_mult: f32,
    pub max_fall_speed: f32,
    pub fast_fall_gravity_mult: f32,
    pub max_fast_fall_speed: f32,

    // Run
    pub run_max_speed: f32,
    /// Speed gained per fixed step, as a fraction of `run_max_speed` units.
    pub run_acceleration: f32,
    pub run_decceleration: f32,
    pub accel_in_air: f32,
    pub deccel_in_air: f32,
    pub conserve_momentum: bool,

    // Jump
    pub jump_height: f32,
    pub jump_time_to_apex: f32,
    pub jump_cut_gravity_mult: f32,
    pub jump_hang_gravity_mult: f32,
    pub jump_hang_time_threshold: f32,
    pub jump_hang_acceleration_mult: f32,
    pub jump_hang_max_speed_mult: f32,

    // Wall jump and slide
    pub wall_jump_force: (f32, f32),
    pub wall_jump_run_lerp: f32,
    pub wall_jump_time: f32,
    pub slide_speed: f32,
    pub slide_accel: f32,

    // Assists
    pub coyote_time: f32,
    pub jump_input_buffer_time: f32,
    pub dash_input_buffer_time: f32,

    // Dash
    pub dash_amount: u32,
    pub dash_speed: f32,
    pub dash_sleep_time: f32,
    pub dash_attack_time: f32,
    pub dash_end_speed: f32,
    pub dash_end_time: f32,
    pub dash_end_run_lerp: f32,
    pub dash_refill_time: f32,
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self {
            fall_gravity_mult: 1.5,
            max_fall_speed: 18.0,
            fast_fall_gravity_mult: 2.0,
            max_fast_fall_speed: 25.0,

            run_max_speed: 9.5,
            run_acceleration: 9.5,
            run_decceleration: 9.5,
            accel_in_air: 1.0,
            deccel_in_air: 1.0,
            conserve_momentum: true,

            jump_height: 3.5,
            jump_time_to_apex: 0.3,
            jump_cut_gravity_mult: 2.0,
            jump_hang_gravity_mult: 0.5,
            jump_hang_time_threshold: 1.0,
            jump_hang_acceleration_mult: 1.1,
            jump_hang_max_speed_mult: 1.3,

            wall_jump_force: (15.0, 25.0),
            wall_jump_run_lerp: 0.5,
            wall_jump_time: 0.15,
            slide_speed: -5.0,
            slide_accel: 10.0,

            coyote_time: 0.1,
            jump_input_buffer_time: 0.1,
            dash_input_buffer_time: 0.1,

            dash_amount: 1,
            dash_speed: 20.0,
            dash_sleep_time: 0.05,
            dash_attack_time: 0.15,
            dash_end_speed: 15.0,
            dash_end_time: 0.15,
            dash_end_run_lerp: 0.5,
            dash_refill_time: 0.1,
        }
    }
}

impl MovementProfile {
    /// Turn the profile into runtime forces for a world with the given gravity
    /// (`world_gravity_y`, negative is down) stepped at `fixed_hz`.
    pub fn derive(
        &self,
        world_gravity_y: f32,
        fixed_hz: f32,
    ) -> Result<MovementConfig, ConfigError> {
        if !(world_gravity_y < 0.0) {
            return Err(ConfigError::InvalidWorld {
                reason: format!("world gravity must point down, got {}", world_gravity_y),
            });
        }
        if !(fixed_hz > 0.0) {
            return Err(ConfigError::InvalidWorld {
                reason: format!("fixed rate must be positive, got {}", fixed_hz),
            });
        }

        self.derive_unchecked(world_gravity_y, fixed_hz).validated()
    }

    fn derive_unchecked(&self, world_gravity_y: f32, fixed_hz: f32) -> MovementConfig {
        let gravity_strength =
            -(2.0 * self.jump_height) / (self.jump_time_to_apex * self.jump_time_to_apex);
        let run_acceleration = self.run_acceleration.clamp(0.01, self.run_max_speed.max(0.01));
        let run_decceleration = self.run_decceleration.clamp(0.01, self.run_max_speed.max(0.01));

        MovementConfig {
            gravity_strength,
            gravity_scale: gravity_strength / world_gravity_y,
            fall_gravity_mult: self.fall_gravity_mult,
            max_fall_speed: self.max_fall_speed,
            fast_fall_gravity_mult: self.fast_fall_gravity_mult,
            max_fast_fall_speed: self.max_fast_fall_speed,

            run_max_speed: self.run_max_speed,
            run_accel_amount: fixed_hz * run_acceleration / self.run_max_speed,
            run_deccel_amount: fixed_hz * run_decceleration / self.run_max_speed,
            accel_in_air: self.accel_in_air,
            deccel_in_air: self.deccel_in_air,
            conserve_momentum: self.conserve_momentum,

            jump_force: gravity_strength.abs() * self.jump_time_to_apex,
            jump_cut_gravity_mult: self.jump_cut_gravity_mult,
            jump_hang_gravity_mult: self.jump_hang_gravity_mult,
            jump_hang_time_threshold: self.jump_hang_time_threshold,
            jump_hang_acceleration_mult: self.jump_hang_acceleration_mult,
            jump_hang_max_speed_mult: self.jump_hang_max_speed_mult,

            wall_jump_force: Vec2::new(self.wall_jump_force.0, self.wall_jump_force.1),
            wall_jump_run_lerp: self.wall_jump_run_lerp,
            wall_jump_time: self.wall_jump_time,
            slide_speed: self.slide_speed,
            slide_accel: self.slide_accel,

            coyote_time: self.coyote_time,
            jump_input_buffer_time: self.jump_input_buffer_time,
            dash_input_buffer_time: self.dash_input_buffer_time,

            dash_amount: self.dash_amount,
            dash_speed: self.dash_speed,
            dash_sleep_time: self.dash_sleep_time,
            dash_attack_time: self.dash_attack_time,
            dash_end_speed: self.dash_end_speed,
            dash_end_time: self.dash_end_time,
            dash_end_run_lerp: self.dash_end_run_lerp,
            dash_refill_time: self.dash_refill_time,
        }
    }
}

/// Runtime movement constants. Immutable once handed to a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementConfig {
    /// Downward acceleration of a ground jump (negative).
    pub gravity_strength: f32,
    /// Body gravity scale that produces `gravity_strength` in the world.
    pub gravity_scale: f32,
    pub fall_gravity_mult: f32,
    pub max_fall_speed: f32,
    pub fast_fall_gravity_mult: f32,
    pub max_fast_fall_speed: f32,

    pub run_max_speed: f32,
    pub run_accel_amount: f32,
    pub run_deccel_amount: f32,
    pub accel_in_air: f32,
    pub deccel_in_air: f32,
    pub conserve_momentum: bool,

    pub jump_force: f32,
    pub jump_cut_gravity_mult: f32,
    pub jump_hang_gravity_mult: f32,
    /// Below this vertical speed a jump counts as hanging at its apex.
    pub jump_hang_time_threshold: f32,
    pub jump_hang_acceleration_mult: f32,
    pub jump_hang_max_speed_mult: f32,

    pub wall_jump_force: Vec2,
    pub wall_jump_run_lerp: f32,
    pub wall_jump_time: f32,
    pub slide_speed: f32,
    pub slide_accel: f32,

    pub coyote_time: f32,
    pub jump_input_buffer_time: f32,
    pub dash_input_buffer_time: f32,

    pub dash_amount: u32,
    pub dash_speed: f32,
    /// Real-time hitstop applied to the dashing entity on dash start.
    pub dash_sleep_time: f32,
    pub dash_attack_time: f32,
    pub dash_end_speed: f32,
    pub dash_end_time: f32,
    pub dash_end_run_lerp: f32,
    pub dash_refill_time: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        MovementProfile::default().derive_unchecked(DEFAULT_WORLD_GRAVITY_Y, DEFAULT_FIXED_HZ)
    }
}

impl MovementConfig {
    /// Reject non-finite values and clamp the rest into a usable range.
    ///
    /// Negative windows and durations become zero, which simply turns the
    /// corresponding assist off. Lerp factors are clamped to `[0, 1]`.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        for (field, value) in self.scalar_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        for (field, value) in [
            ("coyote_time", &mut self.coyote_time),
            ("jump_input_buffer_time", &mut self.jump_input_buffer_time),
            ("dash_input_buffer_time", &mut self.dash_input_buffer_time),
            ("wall_jump_time", &mut self.wall_jump_time),
            ("dash_sleep_time", &mut self.dash_sleep_time),
            ("dash_attack_time", &mut self.dash_attack_time),
            ("dash_end_time", &mut self.dash_end_time),
            ("dash_refill_time", &mut self.dash_refill_time),
        ] {
            if *value < 0.0 {
                warn!("Movement config: {} is negative ({}), using 0", field, value);
                *value = 0.0;
            }
        }

        for (field, value) in [
            ("wall_jump_run_lerp", &mut self.wall_jump_run_lerp),
            ("dash_end_run_lerp", &mut self.dash_end_run_lerp),
        ] {
            if !(0.0..=1.0).contains(&*value) {
                warn!("Movement config: {} outside [0, 1] ({}), clamping", field, value);
                *value = value.clamp(0.0, 1.0);
            }
        }

        if self.dash_amount == 0 {
            warn!("Movement config: dash_amount is 0, dashing is disabled");
        }

        Ok(self)
    }

    fn scalar_fields(&self) -> [(&'static str, f32); 34] {
        [
            ("gravity_strength", self.gravity_strength),
            ("gravity_scale", self.gravity_scale),
            ("fall_gravity_mult", self.fall_gravity_mult),
            ("max_fall_speed", self.max_fall_speed),
            ("fast_fall_gravity_mult", self.fast_fall_gravity_mult),
            ("max_fast_fall_speed", self.max_fast_fall_speed),
            ("run_max_speed", self.run_max_speed),
            ("run_accel_amount", self.run_accel_amount),
            ("run_deccel_amount", self.run_deccel_amount),
            ("accel_in_air", self.accel_in_air),
            ("deccel_in_air", self.deccel_in_air),
            ("jump_force", self.jump_force),
            ("jump_cut_gravity_mult", self.jump_cut_gravity_mult),
            ("jump_hang_gravity_mult", self.jump_hang_gravity_mult),
            ("jump_hang_time_threshold", self.jump_hang_time_threshold),
            ("jump_hang_acceleration_mult", self.jump_hang_acceleration_mult),
            ("jump_hang_max_speed_mult", self.jump_hang_max_speed_mult),
            ("wall_jump_force.x", self.wall_jump_force.x),
            ("wall_jump_force.y", self.wall_jump_force.y),
            ("wall_jump_run_lerp", self.wall_jump_run_lerp),
            ("wall_jump_time", self.wall_jump_time),
            ("slide_speed", self.slide_speed),
            ("slide_accel", self.slide_accel),
            ("coyote_time", self.coyote_time),
            ("jump_input_buffer_time", self.jump_input_buffer_time),
            ("dash_input_buffer_time", self.dash_input_buffer_time),
            ("dash_speed", self.dash_speed),
            ("dash_sleep_time", self.dash_sleep_time),
            ("dash_attack_time", self.dash_attack_time),
            ("dash_end_speed", self.dash_end_speed),
            ("dash_end_time", self.dash_end_time),
            ("dash_end_run_lerp", self.dash_end_run_lerp),
            ("dash_refill_time", self.dash_refill_time),
            ("dash_amount", self.dash_amount as f32),
        ]
    }

    /// Peak height of an uncut ground jump from rest: h = v² / (2g).
    pub fn jump_apex_height(&self) -> f32 {
        self.jump_force * self.jump_force / (2.0 * self.gravity_strength.abs())
    }
}
