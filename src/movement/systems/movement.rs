//! Movement domain: systems driving movement controllers from the ECS.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::systems::collisions::AvianProbes;
use crate::movement::{
    AnimationSink, AnimationTrigger, DashStartedEvent, ForceMode, JumpStartedEvent, LandedEvent,
    Mover, MoverAnimation, MoverError, PhysicsBody, ProbeLayout, TickContext,
};

/// [`PhysicsBody`] over avian2d's velocity and gravity scale components.
///
/// Forces are turned into velocity changes directly: an impulse adds `J / m`,
/// a continuous force adds `F / m * dt` for the fixed step.
pub(crate) struct AvianBody<'a> {
    velocity: &'a mut LinearVelocity,
    gravity_scale: &'a mut GravityScale,
    inverse_mass: f32,
    fixed_dt: f32,
}

impl<'a> AvianBody<'a> {
    pub(crate) fn new(
        velocity: &'a mut LinearVelocity,
        gravity_scale: &'a mut GravityScale,
        mass: &Mass,
        fixed_dt: f32,
    ) -> Self {
        let inverse_mass = if mass.0 > 0.0 { 1.0 / mass.0 } else { 0.0 };
        Self {
            velocity,
            gravity_scale,
            inverse_mass,
            fixed_dt,
        }
    }
}

impl PhysicsBody for AvianBody<'_> {
    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn apply_force(&mut self, force: Vec2, mode: ForceMode) {
        let delta = match mode {
            ForceMode::Impulse => force * self.inverse_mass,
            ForceMode::Continuous => force * self.inverse_mass * self.fixed_dt,
        };
        self.velocity.0 += delta;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale.0
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale.0 = scale;
    }
}

/// Collects one frame of controller notifications for an entity.
struct FrameEvents<'a> {
    animation: &'a mut MoverAnimation,
    jumped: bool,
    landed: bool,
    dashed: Option<Vec2>,
}

impl AnimationSink for FrameEvents<'_> {
    fn on_jump_started(&mut self) {
        self.jumped = true;
        self.animation.trigger = AnimationTrigger::Jump;
    }

    fn on_landed(&mut self) {
        self.landed = true;
        self.animation.trigger = AnimationTrigger::Land;
    }

    fn on_dash_started(&mut self, direction: Vec2) {
        self.dashed = Some(direction);
        self.animation.trigger = AnimationTrigger::Dash;
    }

    fn on_vertical_velocity(&mut self, velocity_y: f32) {
        self.animation.velocity_y = velocity_y;
    }
}

fn require<T>(value: Option<T>, entity: Entity, component: &'static str) -> Result<T, MoverError> {
    value.ok_or(MoverError::MissingCollaborator { entity, component })
}

/// Check newly added movers for everything the controller needs and bind them
/// to their bodies. A mover missing a collaborator is a setup error.
pub(crate) fn attach_movers(
    fixed_time: Res<Time<Fixed>>,
    mut query: Query<
        (
            Entity,
            &mut Mover,
            Option<&RigidBody>,
            Option<&Collider>,
            Option<&ProbeLayout>,
            Option<&mut LinearVelocity>,
            Option<&mut GravityScale>,
            Option<&Mass>,
        ),
        Added<Mover>,
    >,
) -> Result {
    let fixed_dt = fixed_time.timestep().as_secs_f32();

    for (entity, mut mover, rigid_body, collider, layout, velocity, gravity, mass) in &mut query {
        require(rigid_body, entity, "RigidBody")?;
        require(collider, entity, "Collider")?;
        require(layout, entity, "ProbeLayout")?;
        let mut velocity = require(velocity, entity, "LinearVelocity")?;
        let mut gravity = require(gravity, entity, "GravityScale")?;
        let mass = require(mass, entity, "Mass")?;

        let mut body = AvianBody::new(&mut velocity, &mut gravity, mass, fixed_dt);
        mover.controller.attach(&mut body);
        mover.attached = true;

        debug!("Mover {:?} attached", entity);
    }

    Ok(())
}

/// Decision pass: windows, contacts, jumps, dashes, slides and gravity.
pub(crate) fn tick_movers(
    time: Res<Time>,
    fixed_time: Res<Time<Fixed>>,
    spatial_query: SpatialQuery,
    mut jump_events: MessageWriter<JumpStartedEvent>,
    mut land_events: MessageWriter<LandedEvent>,
    mut dash_events: MessageWriter<DashStartedEvent>,
    mut query: Query<(
        Entity,
        &mut Mover,
        &Transform,
        &ProbeLayout,
        &mut LinearVelocity,
        &mut GravityScale,
        &Mass,
        &mut MoverAnimation,
    )>,
) {
    let dt = time.delta_secs();
    let fixed_dt = fixed_time.timestep().as_secs_f32();

    for (entity, mut mover, transform, layout, mut velocity, mut gravity, mass, mut animation) in
        &mut query
    {
        if !mover.is_attached() {
            continue;
        }

        let probes = AvianProbes::new(
            &spatial_query,
            layout,
            transform.translation.truncate(),
            mover.controller.state().is_facing_right(),
        );
        let mut body = AvianBody::new(&mut velocity, &mut gravity, mass, fixed_dt);
        animation.trigger = AnimationTrigger::None;
        let mut events = FrameEvents {
            animation: &mut animation,
            jumped: false,
            landed: false,
            dashed: None,
        };

        mover.controller.update(
            dt,
            &mut TickContext {
                ground: &probes,
                walls: &probes,
                body: &mut body,
                events: &mut events,
            },
        );

        if events.jumped {
            jump_events.write(JumpStartedEvent { entity });
        }
        if events.landed {
            land_events.write(LandedEvent { entity });
        }
        if let Some(direction) = events.dashed {
            dash_events.write(DashStartedEvent { entity, direction });
        }
    }
}

/// Physics pass: run, dash and slide forces for one fixed step.
pub(crate) fn apply_mover_forces(
    time: Res<Time>,
    mut query: Query<(&mut Mover, &mut LinearVelocity, &mut GravityScale, &Mass)>,
) {
    let fixed_dt = time.delta_secs();

    for (mut mover, mut velocity, mut gravity, mass) in &mut query {
        if !mover.is_attached() {
            continue;
        }

        let mut body = AvianBody::new(&mut velocity, &mut gravity, mass, fixed_dt);
        mover.controller.fixed_update(fixed_dt, &mut body);
    }
}
