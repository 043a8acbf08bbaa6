//! Movement domain: events raised for animation and effects.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Event fired when a mover leaves the ground with a jump
#[derive(Debug)]
pub struct JumpStartedEvent {
    pub entity: Entity,
}

impl Message for JumpStartedEvent {}

/// Event fired when a mover touches ground after real airtime
#[derive(Debug)]
pub struct LandedEvent {
    pub entity: Entity,
}

impl Message for LandedEvent {}

/// Event fired when a dash starts
#[derive(Debug)]
pub struct DashStartedEvent {
    pub entity: Entity,
    pub direction: Vec2,
}

impl Message for DashStartedEvent {}
