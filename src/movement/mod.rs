//! Movement domain: tight-controls platformer locomotion.
//!
//! The controller core (`config`, `timers`, `state`, `dash`, `hitstop`,
//! `forces`, `controller`) is engine-agnostic and talks to the world through
//! the traits in `interfaces`. The rest of the module wires it into Bevy and
//! avian2d.

use bevy::prelude::*;

mod bootstrap;
mod components;
mod config;
mod controller;
mod dash;
#[cfg(feature = "dev-tools")]
mod dev;
mod events;
mod forces;
mod hitstop;
mod interfaces;
mod loader;
mod resources;
mod state;
mod systems;
mod timers;

#[cfg(test)]
mod tests;

pub use components::*;
pub use config::{
    ConfigError, DEFAULT_FIXED_HZ, DEFAULT_WORLD_GRAVITY_Y, MovementConfig, MovementProfile,
};
pub use controller::{LANDING_AIRTIME, MovementController, TickContext};
pub use dash::{DashCharges, DashPhase, DashProgress, DashRun};
pub use events::*;
pub use forces::{GravityInputs, GravityRegime, RunInputs, run_force, slide_forces};
pub use hitstop::Hitstop;
pub use interfaces::{AnimationSink, ForceMode, GroundProbe, InputSource, PhysicsBody, WallProbe};
pub use loader::{MOVEMENT_CONFIG_PATH, load_profile};
pub use resources::*;
pub use state::{Facing, JumpFeel, MotionState, MovementState, Phase, WallSide};
pub use timers::MovementTimers;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .add_message::<JumpStartedEvent>()
            .add_message::<LandedEvent>()
            .add_message::<DashStartedEvent>()
            .add_systems(
                Startup,
                (
                    bootstrap::load_movement_settings,
                    bootstrap::spawn_player,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    systems::read_input,
                    systems::route_input,
                    systems::attach_movers,
                    systems::tick_movers,
                    systems::update_mover_sprites,
                    systems::log_movement_events,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, systems::apply_mover_forces);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_room);
    }
}
