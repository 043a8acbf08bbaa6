//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::MovementController;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Drives an entity's rigid body with a [`MovementController`].
#[derive(Component, Debug)]
pub struct Mover {
    pub controller: MovementController,
    /// Set once the body has been checked and bound.
    pub(crate) attached: bool,
}

impl Mover {
    pub fn new(controller: MovementController) -> Self {
        Self {
            controller,
            attached: false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Contact sensor boxes, relative to the body's center, for a character facing right.
/// The wall boxes are mirrored when facing left.
#[derive(Component, Debug, Clone)]
pub struct ProbeLayout {
    pub ground_offset: Vec2,
    pub ground_size: Vec2,
    pub front_wall_offset: Vec2,
    pub back_wall_offset: Vec2,
    pub wall_size: Vec2,
}

impl ProbeLayout {
    /// Layout for a box-shaped body of the given size.
    pub fn for_body(size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            ground_offset: Vec2::new(0.0, -half.y),
            ground_size: Vec2::new(size.x * 0.98, 0.03),
            front_wall_offset: Vec2::new(half.x, 0.0),
            back_wall_offset: Vec2::new(-half.x, 0.0),
            wall_size: Vec2::new(0.5, size.y * 0.5),
        }
    }
}

/// The last trigger the controller raised, for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationTrigger {
    #[default]
    None,
    Jump,
    Land,
    Dash,
}

/// Presentation state fed by the controller through its animation sink.
#[derive(Component, Debug, Default)]
pub struct MoverAnimation {
    pub trigger: AnimationTrigger,
    pub velocity_y: f32,
}

/// Visual child of a mover. Mirrored with facing and tilted with horizontal speed.
#[derive(Component, Debug)]
pub struct MoverSprite {
    pub owner: Entity,
    /// Maximum tilt in radians at full run speed.
    pub max_tilt: f32,
    /// Fraction of the remaining tilt closed each frame.
    pub tilt_speed: f32,
    pub current_tilt: f32,
}

/// An entity has a [`Mover`] but lacks something the controller steers or probes with.
#[derive(Debug)]
pub enum MoverError {
    MissingCollaborator {
        entity: Entity,
        component: &'static str,
    },
}

impl std::fmt::Display for MoverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoverError::MissingCollaborator { entity, component } => {
                write!(f, "mover {:?} is missing required component {}", entity, component)
            }
        }
    }
}

impl std::error::Error for MoverError {}
