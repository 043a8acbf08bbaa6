//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::{MovementInput, Mover, Player};

const JUMP_KEYS: [KeyCode; 3] = [KeyCode::Space, KeyCode::KeyC, KeyCode::KeyJ];
const DASH_KEYS: [KeyCode; 3] = [KeyCode::KeyX, KeyCode::ShiftLeft, KeyCode::KeyK];

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (fast fall, diagonal dashes)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_just_pressed = keyboard.any_just_pressed(JUMP_KEYS);
    input.jump_just_released = keyboard.any_just_released(JUMP_KEYS);
    input.dash_just_pressed = keyboard.any_just_pressed(DASH_KEYS);
}

/// Hand this frame's input to every player-controlled mover.
pub(crate) fn route_input(input: Res<MovementInput>, mut query: Query<&mut Mover, With<Player>>) {
    for mut mover in &mut query {
        mover.controller.apply_input(&*input);
    }
}
