//! Movement domain: tuning and input resources.

use bevy::prelude::*;

use crate::movement::{InputSource, MovementConfig};

/// Movement configuration every spawned mover is built from.
#[derive(Resource, Debug, Clone)]
pub struct MovementSettings {
    pub config: MovementConfig,
    /// Where the config came from, for logs and debug overlays.
    pub source: String,
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub dash_just_pressed: bool,
}

impl InputSource for MovementInput {
    fn move_axis(&self) -> Vec2 {
        self.axis
    }

    fn jump_pressed(&self) -> bool {
        self.jump_just_pressed
    }

    fn jump_released(&self) -> bool {
        self.jump_just_released
    }

    fn dash_pressed(&self) -> bool {
        self.dash_just_pressed
    }
}
