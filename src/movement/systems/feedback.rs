//! Movement domain: presentation feedback driven by controller state.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::forces::inverse_lerp;
use crate::movement::{DashStartedEvent, JumpStartedEvent, LandedEvent, Mover, MoverSprite};

/// Lean used while sliding down a wall, as a fraction of the tilt range.
const SLIDE_TILT_PROGRESS: f32 = 0.25;

/// Tilt target in radians for a mover: leans into horizontal speed, or a fixed
/// lean against the wall while sliding.
pub(crate) fn tilt_target(mover: &Mover, velocity_x: f32, max_tilt: f32) -> f32 {
    let state = mover.controller.state();
    let run_max_speed = mover.controller.config().run_max_speed;

    if state.is_sliding() {
        let lean = SLIDE_TILT_PROGRESS * max_tilt * 2.0 - max_tilt;
        return lean * state.facing().sign();
    }

    let progress = inverse_lerp(-run_max_speed, run_max_speed, velocity_x);
    -(progress * max_tilt * 2.0 - max_tilt)
}

/// Mirror sprites with facing and ease their tilt toward the target.
pub(crate) fn update_mover_sprites(
    movers: Query<(&Mover, &LinearVelocity)>,
    mut sprites: Query<(&mut MoverSprite, &mut Transform)>,
) {
    for (mut sprite, mut transform) in &mut sprites {
        let Ok((mover, velocity)) = movers.get(sprite.owner) else {
            continue;
        };

        let target = tilt_target(mover, velocity.x, sprite.max_tilt);
        sprite.current_tilt += (target - sprite.current_tilt) * sprite.tilt_speed;

        transform.scale.x = mover.controller.state().facing().sign();
        transform.rotation = Quat::from_rotation_z(sprite.current_tilt);
    }
}

pub(crate) fn log_movement_events(
    mut jump_events: MessageReader<JumpStartedEvent>,
    mut land_events: MessageReader<LandedEvent>,
    mut dash_events: MessageReader<DashStartedEvent>,
) {
    for event in jump_events.read() {
        debug!("Jump started: {:?}", event.entity);
    }
    for event in land_events.read() {
        debug!("Landed: {:?}", event.entity);
    }
    for event in dash_events.read() {
        debug!("Dash started: {:?} toward {:?}", event.entity, event.direction);
    }
}
