//! Movement domain: the movement controller.
//!
//! Two entry points drive it. [`MovementController::update`] runs once per
//! frame and makes every decision: windows, contacts, jumps, dashes, slides and
//! the gravity regime. [`MovementController::fixed_update`] runs once per
//! physics step and only turns the decided state into forces.

use bevy::log::debug;
use bevy::math::Vec2;

use crate::movement::dash::{DashPhase, DashProgress, DashRun};
use crate::movement::forces::{self, GravityInputs, GravityRegime, RunInputs};
use crate::movement::interfaces::{
    AnimationSink, ForceMode, GroundProbe, InputSource, PhysicsBody, WallProbe,
};
use crate::movement::{
    ConfigError, Facing, JumpFeel, MovementConfig, MovementState, Phase, WallSide,
};

/// Ground window below which touching ground counts as a landing.
pub const LANDING_AIRTIME: f32 = -0.1;

/// Contact windows are armed to at least this, so a zero coyote time still
/// reports contact on the frame it happens.
const MIN_WINDOW: f32 = 1e-6;

/// Collaborators for one decision tick.
pub struct TickContext<'a> {
    pub ground: &'a dyn GroundProbe,
    pub walls: &'a dyn WallProbe,
    pub body: &'a mut dyn PhysicsBody,
    pub events: &'a mut dyn AnimationSink,
}

#[derive(Debug, Clone)]
pub struct MovementController {
    config: MovementConfig,
    state: MovementState,
}

impl MovementController {
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let state = MovementState::new(config.dash_amount);
        Ok(Self { config, state })
    }

    /// Bind to the body the controller will steer for the rest of its life.
    pub fn attach(&mut self, body: &mut dyn PhysicsBody) {
        body.set_gravity_scale(self.config.gravity_scale);
        self.state.facing = Facing::Right;
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    // ------------------------------------------------------------------
    // Input-facing operations
    // ------------------------------------------------------------------

    pub fn set_move_input(&mut self, axis: Vec2) {
        self.state.move_input = axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    pub fn on_jump_input(&mut self) {
        self.state.pending.jump = true;
    }

    pub fn on_jump_release_input(&mut self) {
        self.state.pending.jump_release = true;
    }

    pub fn on_dash_input(&mut self) {
        self.state.pending.dash = true;
    }

    /// Turn to face the requested direction if not already facing it.
    pub fn request_facing(&mut self, moving_right: bool) {
        if moving_right != self.state.facing.is_right() {
            self.state.facing = self.state.facing.flipped();
        }
    }

    /// Feed one frame of polled input.
    pub fn apply_input(&mut self, input: &dyn InputSource) {
        let axis = input.move_axis();
        self.set_move_input(axis);

        if axis.x != 0.0 {
            self.request_facing(axis.x > 0.0);
        }
        if input.jump_pressed() {
            self.on_jump_input();
        }
        if input.jump_released() {
            self.on_jump_release_input();
        }
        if input.dash_pressed() {
            self.on_dash_input();
        }
    }

    /// Abort a dash in flight. Spent charges are not refunded.
    pub fn cancel_dash(&mut self, body: &mut dyn PhysicsBody) -> bool {
        if !self.state.is_dashing() {
            return false;
        }

        self.state.hitstop.release(body);
        self.state.phase = Phase::Free;
        body.set_gravity_scale(self.config.gravity_scale);
        debug!("Dash cancelled: charges={}", self.state.dash.remaining());
        true
    }

    // ------------------------------------------------------------------
    // Decision pass
    // ------------------------------------------------------------------

    pub fn update(&mut self, dt: f32, ctx: &mut TickContext<'_>) {
        if !self.state.hitstop.advance(dt, ctx.body) {
            return;
        }

        self.state.timers.tick(dt);
        self.consume_pending_presses();
        self.step_timed(dt, ctx.body);

        self.update_collisions(ctx);
        self.update_jumping(ctx);
        self.update_dash(ctx);
        self.update_slide();
        self.update_gravity(ctx.body);

        ctx.events.on_vertical_velocity(ctx.body.velocity().y);
    }

    fn consume_pending_presses(&mut self) {
        let pending = &mut self.state.pending;
        if std::mem::take(&mut pending.jump) {
            self.state.timers.last_pressed_jump =
                self.config.jump_input_buffer_time.max(MIN_WINDOW);
        }
        if std::mem::take(&mut pending.dash) {
            self.state.timers.last_pressed_dash =
                self.config.dash_input_buffer_time.max(MIN_WINDOW);
        }
    }

    /// Step the timed sub-states that were already running before this frame.
    fn step_timed(&mut self, dt: f32, body: &mut dyn PhysicsBody) {
        if self.state.dash.step(dt, self.config.dash_refill_time) {
            debug!("Dash refilled: charges={}", self.state.dash.remaining());
        }

        if let Phase::WallJumping { elapsed, .. } = &mut self.state.phase {
            *elapsed += dt;
        }

        let Phase::Dashing(run) = &mut self.state.phase else {
            return;
        };

        match run.step(dt, self.config.dash_attack_time, self.config.dash_end_time) {
            DashProgress::Continuing => {}
            DashProgress::AttackEnded => {
                body.set_gravity_scale(self.config.gravity_scale);
                body.set_velocity(run.direction * self.config.dash_end_speed);
            }
            DashProgress::Finished => {
                self.state.phase = Phase::Free;
                debug!("Dash finished");
            }
        }
    }

    fn update_collisions(&mut self, ctx: &mut TickContext<'_>) {
        if self.state.is_dashing() || self.state.is_jumping() {
            return;
        }

        let grace = self.config.coyote_time.max(MIN_WINDOW);
        let timers = &mut self.state.timers;

        if ctx.ground.is_grounded() {
            if timers.last_on_ground < LANDING_AIRTIME {
                debug!("Landed after {:.2}s airborne", -timers.last_on_ground);
                ctx.events.on_landed();
            }
            timers.last_on_ground = grace;
        }

        let facing_right = self.state.facing.is_right();
        if ctx.walls.is_touching_front(facing_right) || ctx.walls.is_touching_back(facing_right) {
            timers.arm_wall(WallSide::Right, grace);
        }
        if ctx.walls.is_touching_front(!facing_right) || ctx.walls.is_touching_back(!facing_right)
        {
            timers.arm_wall(WallSide::Left, grace);
        }
        timers.refresh_wall();
    }

    fn update_jumping(&mut self, ctx: &mut TickContext<'_>) {
        let velocity = ctx.body.velocity();

        if self.state.is_jumping() && velocity.y < 0.0 {
            self.state.phase = Phase::Free;
            self.state.feel.falling = true;
        }

        if let Phase::WallJumping { elapsed, .. } = self.state.phase
            && elapsed > self.config.wall_jump_time
        {
            self.state.phase = Phase::Free;
        }

        if self.state.timers.grounded() && !self.state.is_jumping() && !self.state.is_wall_jumping()
        {
            self.state.feel = JumpFeel::default();
        }

        // Judged against the motion before this frame's jump
        if std::mem::take(&mut self.state.pending.jump_release) && self.can_jump_cut(ctx.body) {
            self.state.feel.cut = true;
        }

        if !self.state.is_dashing() && self.state.timers.jump_buffered() {
            if self.can_jump() {
                self.state.phase = Phase::Jumping;
                self.state.feel = JumpFeel::default();
                self.jump(ctx.body);
                ctx.events.on_jump_started();
            } else if let Some(from) = self.wall_jump_source() {
                self.state.phase = Phase::WallJumping { from, elapsed: 0.0 };
                self.state.feel = JumpFeel::default();
                self.wall_jump(from, ctx.body);
            }
        }
    }

    fn can_jump(&self) -> bool {
        self.state.timers.grounded() && !self.state.is_jumping()
    }

    /// The wall a jump would push off from, if a wall jump is allowed now.
    /// While already wall jumping only the opposite wall is eligible.
    fn wall_jump_source(&self) -> Option<WallSide> {
        let timers = &self.state.timers;
        if !timers.jump_buffered() || !timers.on_wall() || timers.grounded() {
            return None;
        }

        let from = timers.touched_wall()?;
        match self.state.phase {
            Phase::WallJumping { from: last, .. } => {
                let other = last.opposite();
                timers.on_wall_side(other).then_some(other)
            }
            _ => Some(from),
        }
    }

    fn can_jump_cut(&self, body: &dyn PhysicsBody) -> bool {
        (self.state.is_jumping() || self.state.is_wall_jumping()) && body.velocity().y > 0.0
    }

    fn jump(&mut self, body: &mut dyn PhysicsBody) {
        self.state.timers.last_pressed_jump = 0.0;
        self.state.timers.last_on_ground = 0.0;

        let mut force = self.config.jump_force;
        let velocity_y = body.velocity().y;
        if velocity_y < 0.0 {
            force -= velocity_y;
        }

        body.apply_force(Vec2::Y * force, ForceMode::Impulse);
        debug!("Ground jump: impulse={:.2}", force);
    }

    fn wall_jump(&mut self, from: WallSide, body: &mut dyn PhysicsBody) {
        let timers = &mut self.state.timers;
        timers.last_pressed_jump = 0.0;
        timers.last_on_ground = 0.0;
        timers.last_on_wall_right = 0.0;
        timers.last_on_wall_left = 0.0;
        timers.refresh_wall();

        let velocity = body.velocity();
        let mut force = self.config.wall_jump_force;
        force.x *= from.away_sign();

        if forces::sign(velocity.x) != forces::sign(force.x) {
            force.x -= velocity.x;
        }
        if velocity.y < 0.0 {
            force.y -= velocity.y;
        }

        body.apply_force(force, ForceMode::Impulse);
        debug!("Wall jump off {:?}: impulse={:?}", from, force);
    }

    fn update_dash(&mut self, ctx: &mut TickContext<'_>) {
        let dashing = self.state.is_dashing();
        if self.state.dash.begin_refill(self.state.timers.grounded(), dashing) {
            debug!("Dash refill started: charges={}", self.state.dash.remaining());
        }

        if dashing || !self.state.dash.has_charge() || !self.state.timers.dash_buffered() {
            return;
        }

        let input = self.state.move_input;
        let direction = if input != Vec2::ZERO {
            input.normalize_or(Vec2::X)
        } else {
            Vec2::new(self.state.facing.sign(), 0.0)
        };

        self.state.dash.spend();
        self.state.last_dash_direction = direction;
        self.state.phase = Phase::Dashing(DashRun::new(direction));
        self.state.feel.cut = false;
        self.state.timers.last_on_ground = 0.0;
        self.state.timers.last_pressed_dash = 0.0;

        ctx.body.set_gravity_scale(0.0);
        ctx.body.set_velocity(direction * self.config.dash_speed);
        ctx.events.on_dash_started(direction);
        debug!(
            "Dash: direction={:?}, charges_left={}",
            direction,
            self.state.dash.remaining()
        );

        self.state
            .hitstop
            .start(self.config.dash_sleep_time, ctx.body);
    }

    fn update_slide(&mut self) {
        let timers = &self.state.timers;
        let free = matches!(self.state.phase, Phase::Free | Phase::Sliding);
        let x = self.state.move_input.x;
        let pressing_into_wall = (timers.on_wall_side(WallSide::Left) && x < 0.0)
            || (timers.on_wall_side(WallSide::Right) && x > 0.0);

        let sliding = free && timers.on_wall() && !timers.grounded() && pressing_into_wall;

        match self.state.phase {
            Phase::Free if sliding => self.state.phase = Phase::Sliding,
            Phase::Sliding if !sliding => self.state.phase = Phase::Free,
            _ => {}
        }
    }

    fn update_gravity(&mut self, body: &mut dyn PhysicsBody) {
        let mut velocity = body.velocity();
        let regime = GravityRegime::select(
            &self.config,
            &GravityInputs {
                velocity_y: velocity.y,
                input_y: self.state.move_input.y,
                dash_attacking: self.state.is_dash_attacking(),
                sliding: self.state.is_sliding(),
                jump_cut: self.state.feel.cut,
                in_jump_arc: self.state.in_jump_arc(),
            },
        );

        body.set_gravity_scale(regime.scale(&self.config));
        if let Some(cap) = regime.fall_cap(&self.config)
            && velocity.y < -cap
        {
            velocity.y = -cap;
            body.set_velocity(velocity);
        }
    }

    // ------------------------------------------------------------------
    // Physics pass
    // ------------------------------------------------------------------

    pub fn fixed_update(&mut self, fixed_dt: f32, body: &mut dyn PhysicsBody) {
        if self.state.hitstop.is_active() {
            return;
        }

        let lerp = match &self.state.phase {
            Phase::Dashing(run) if run.phase == DashPhase::Attack => {
                body.set_velocity(run.direction * self.config.dash_speed);
                None
            }
            Phase::Dashing(_) => Some(self.config.dash_end_run_lerp),
            Phase::WallJumping { .. } => Some(self.config.wall_jump_run_lerp),
            _ => Some(1.0),
        };

        if let Some(lerp) = lerp {
            self.run(lerp, body);
        }

        if self.state.is_sliding() {
            self.slide(fixed_dt, body);
        }
    }

    fn run(&self, lerp: f32, body: &mut dyn PhysicsBody) {
        let velocity = body.velocity();
        let force = forces::run_force(
            &self.config,
            &RunInputs {
                velocity_x: velocity.x,
                velocity_y: velocity.y,
                input_x: self.state.move_input.x,
                lerp,
                last_on_ground: self.state.timers.last_on_ground,
                in_jump_arc: self.state.in_jump_arc(),
            },
        );
        body.apply_force(Vec2::X * force, ForceMode::Continuous);
    }

    fn slide(&self, fixed_dt: f32, body: &mut dyn PhysicsBody) {
        let (cancel, movement) = forces::slide_forces(&self.config, body.velocity().y, fixed_dt);
        if let Some(cancel) = cancel {
            body.apply_force(Vec2::Y * cancel, ForceMode::Impulse);
        }
        body.apply_force(Vec2::Y * movement, ForceMode::Continuous);
    }
}
