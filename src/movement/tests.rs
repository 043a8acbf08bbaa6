//! Movement domain: controller tests against in-memory collaborators.

use bevy::math::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{
    AnimationSink, ForceMode, GroundProbe, InputSource, MotionState, MovementConfig,
    MovementController, PhysicsBody, TickContext, WallProbe, WallSide,
};

const DT: f32 = 0.01;

#[derive(Debug, Default)]
struct FakeBody {
    velocity: Vec2,
    gravity_scale: f32,
    impulses: Vec<Vec2>,
    forces: Vec<Vec2>,
    fixed_dt: f32,
}

impl PhysicsBody for FakeBody {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_force(&mut self, force: Vec2, mode: ForceMode) {
        match mode {
            ForceMode::Impulse => {
                self.impulses.push(force);
                self.velocity += force;
            }
            ForceMode::Continuous => {
                self.forces.push(force);
                self.velocity += force * self.fixed_dt;
            }
        }
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }
}

#[derive(Debug, Default)]
struct FakeGround {
    grounded: bool,
}

impl GroundProbe for FakeGround {
    fn is_grounded(&self) -> bool {
        self.grounded
    }
}

/// Walls in world terms. The sensors follow the character's facing, so the
/// fake maps world sides onto front and back the way mirrored boxes would.
#[derive(Debug, Default)]
struct FakeWalls {
    left: bool,
    right: bool,
    facing_right: bool,
}

impl FakeWalls {
    fn front_overlap(&self) -> bool {
        if self.facing_right { self.right } else { self.left }
    }

    fn back_overlap(&self) -> bool {
        if self.facing_right { self.left } else { self.right }
    }
}

impl WallProbe for FakeWalls {
    fn is_touching_front(&self, facing_right: bool) -> bool {
        self.front_overlap() && facing_right
    }

    fn is_touching_back(&self, facing_right: bool) -> bool {
        self.back_overlap() && !facing_right
    }
}

#[derive(Debug, Default)]
struct RecordingSink {
    jumps: u32,
    landings: u32,
    dashes: Vec<Vec2>,
    last_velocity_y: f32,
}

impl AnimationSink for RecordingSink {
    fn on_jump_started(&mut self) {
        self.jumps += 1;
    }

    fn on_landed(&mut self) {
        self.landings += 1;
    }

    fn on_dash_started(&mut self, direction: Vec2) {
        self.dashes.push(direction);
    }

    fn on_vertical_velocity(&mut self, velocity_y: f32) {
        self.last_velocity_y = velocity_y;
    }
}

#[derive(Debug, Default)]
struct FakeInput {
    axis: Vec2,
    jump: bool,
    release: bool,
    dash: bool,
}

impl InputSource for FakeInput {
    fn move_axis(&self) -> Vec2 {
        self.axis
    }

    fn jump_pressed(&self) -> bool {
        self.jump
    }

    fn jump_released(&self) -> bool {
        self.release
    }

    fn dash_pressed(&self) -> bool {
        self.dash
    }
}

struct Rig {
    controller: MovementController,
    body: FakeBody,
    ground: FakeGround,
    walls: FakeWalls,
    sink: RecordingSink,
}

impl Rig {
    fn new(config: MovementConfig) -> Self {
        let mut controller = MovementController::new(config).unwrap();
        let mut body = FakeBody {
            gravity_scale: 1.0,
            fixed_dt: 1.0 / 64.0,
            ..Default::default()
        };
        controller.attach(&mut body);

        Self {
            controller,
            body,
            ground: FakeGround::default(),
            walls: FakeWalls::default(),
            sink: RecordingSink::default(),
        }
    }

    fn grounded(config: MovementConfig) -> Self {
        let mut rig = Self::new(config);
        rig.ground.grounded = true;
        rig.update(DT);
        rig
    }

    fn update(&mut self, dt: f32) {
        self.walls.facing_right = self.controller.state().is_facing_right();
        let mut ctx = TickContext {
            ground: &self.ground,
            walls: &self.walls,
            body: &mut self.body,
            events: &mut self.sink,
        };
        self.controller.update(dt, &mut ctx);
    }

    fn run_for(&mut self, seconds: f32) {
        let frames = (seconds / DT).round() as usize;
        for _ in 0..frames {
            self.update(DT);
        }
    }

    fn fixed_update(&mut self) {
        let fixed_dt = self.body.fixed_dt;
        self.controller.fixed_update(fixed_dt, &mut self.body);
    }
}

fn dash_config() -> MovementConfig {
    MovementConfig {
        dash_speed: 20.0,
        dash_attack_time: 0.15,
        dash_end_speed: 5.0,
        dash_end_time: 0.1,
        dash_sleep_time: 0.0,
        dash_refill_time: 0.1,
        dash_amount: 1,
        ..Default::default()
    }
}

// ----------------------------------------------------------------------
// Jumping
// ----------------------------------------------------------------------

#[test]
fn test_ground_jump_cancels_downward_velocity() {
    let mut rig = Rig::grounded(MovementConfig {
        jump_force: 10.0,
        ..Default::default()
    });
    rig.body.velocity = Vec2::new(0.0, -2.0);

    rig.controller.on_jump_input();
    rig.update(DT);

    assert_eq!(rig.body.impulses, vec![Vec2::new(0.0, 12.0)]);
    assert!(rig.controller.state().is_jumping());
    assert_eq!(rig.controller.state().timers().last_pressed_jump, 0.0);
    assert_eq!(rig.controller.state().timers().last_on_ground, 0.0);
    assert_eq!(rig.sink.jumps, 1);
}

#[test]
fn test_double_press_in_one_frame_jumps_once() {
    let mut rig = Rig::grounded(MovementConfig::default());

    rig.controller.on_jump_input();
    rig.controller.on_jump_input();
    rig.update(DT);
    rig.update(DT);

    assert_eq!(rig.body.impulses.len(), 1);
    assert_eq!(rig.sink.jumps, 1);
}

#[test]
fn test_tap_in_one_frame_gives_full_jump() {
    let mut rig = Rig::grounded(MovementConfig {
        jump_force: 10.0,
        ..Default::default()
    });

    rig.controller.on_jump_input();
    rig.controller.on_jump_release_input();
    rig.update(DT);

    assert!(rig.controller.state().is_jumping());
    assert!(!rig.controller.state().is_jump_cut());

    // A release on a later frame still cuts
    rig.ground.grounded = false;
    rig.controller.on_jump_release_input();
    rig.update(DT);
    assert!(rig.controller.state().is_jump_cut());
}

#[test]
fn test_second_press_in_buffer_without_contact_jumps_once() {
    let mut rig = Rig::grounded(MovementConfig {
        jump_force: 10.0,
        jump_input_buffer_time: 0.1,
        ..Default::default()
    });

    rig.controller.on_jump_input();
    rig.update(DT);
    rig.ground.grounded = false;

    rig.update(DT);
    rig.controller.on_jump_input();
    rig.update(DT);
    rig.run_for(0.1);

    assert_eq!(rig.body.impulses.len(), 1);
    assert_eq!(rig.sink.jumps, 1);
}

#[test]
fn test_jump_buffer_carries_press_into_landing() {
    let mut rig = Rig::new(MovementConfig {
        jump_input_buffer_time: 0.1,
        ..Default::default()
    });

    rig.controller.on_jump_input();
    rig.update(0.02);
    assert!(rig.body.impulses.is_empty());

    rig.ground.grounded = true;
    rig.update(0.02);
    assert_eq!(rig.body.impulses.len(), 1);
    assert!(rig.controller.state().is_jumping());
}

#[test]
fn test_expired_jump_buffer_does_not_jump() {
    let mut rig = Rig::new(MovementConfig {
        jump_input_buffer_time: 0.1,
        ..Default::default()
    });

    rig.controller.on_jump_input();
    for _ in 0..7 {
        rig.update(0.02);
    }

    rig.ground.grounded = true;
    rig.update(0.02);
    assert!(rig.body.impulses.is_empty());
    assert!(!rig.controller.state().is_jumping());
}

#[test]
fn test_coyote_time_allows_late_jump() {
    let mut rig = Rig::grounded(MovementConfig {
        coyote_time: 0.1,
        ..Default::default()
    });

    rig.ground.grounded = false;
    rig.update(0.04);
    rig.controller.on_jump_input();
    rig.update(0.04);

    assert_eq!(rig.sink.jumps, 1);
}

#[test]
fn test_zero_coyote_still_jumps_on_contact_frame() {
    let mut rig = Rig::grounded(MovementConfig {
        coyote_time: 0.0,
        ..Default::default()
    });

    rig.controller.on_jump_input();
    rig.update(DT);
    assert_eq!(rig.sink.jumps, 1);
}

#[test]
fn test_zero_coyote_loses_ground_immediately() {
    let mut rig = Rig::grounded(MovementConfig {
        coyote_time: 0.0,
        ..Default::default()
    });

    rig.ground.grounded = false;
    rig.update(DT);
    rig.controller.on_jump_input();
    rig.update(DT);

    assert_eq!(rig.sink.jumps, 0);
}

#[test]
fn test_release_while_rising_cuts_jump() {
    let config = MovementConfig {
        jump_force: 10.0,
        ..Default::default()
    };
    let mut rig = Rig::grounded(config.clone());

    rig.controller.on_jump_input();
    rig.update(DT);
    rig.ground.grounded = false;

    rig.controller.on_jump_release_input();
    rig.update(DT);

    assert!(rig.controller.state().is_jump_cut());
    let expected = config.gravity_scale * config.jump_cut_gravity_mult;
    assert!((rig.body.gravity_scale - expected).abs() < 1e-5);
}

#[test]
fn test_release_on_ground_is_not_a_cut() {
    let mut rig = Rig::grounded(MovementConfig::default());

    rig.controller.on_jump_release_input();
    rig.update(DT);
    assert!(!rig.controller.state().is_jump_cut());

    // A stale release must not cut the next jump
    rig.controller.on_jump_input();
    rig.update(DT);
    assert!(rig.controller.state().is_jumping());
    assert!(!rig.controller.state().is_jump_cut());
}

#[test]
fn test_apex_turns_jump_into_hanging_fall() {
    let config = MovementConfig {
        jump_force: 10.0,
        ..Default::default()
    };
    let mut rig = Rig::grounded(config.clone());

    rig.controller.on_jump_input();
    rig.update(DT);
    rig.ground.grounded = false;

    rig.body.velocity.y = -0.5;
    rig.update(DT);

    let state = rig.controller.state();
    assert!(!state.is_jumping());
    assert!(state.is_jump_falling());
    assert_eq!(state.motion(), MotionState::Falling);

    let hang = config.gravity_scale * config.jump_hang_gravity_mult;
    assert!((rig.body.gravity_scale - hang).abs() < 1e-5);
}

#[test]
fn test_fall_speed_is_capped() {
    let config = MovementConfig::default();
    let mut rig = Rig::new(config.clone());

    rig.body.velocity.y = -(config.max_fall_speed + 10.0);
    rig.update(DT);
    assert_eq!(rig.body.velocity.y, -config.max_fall_speed);

    rig.controller.set_move_input(Vec2::NEG_Y);
    rig.body.velocity.y = -(config.max_fast_fall_speed + 10.0);
    rig.update(DT);
    assert_eq!(rig.body.velocity.y, -config.max_fast_fall_speed);
    let fast = config.gravity_scale * config.fast_fall_gravity_mult;
    assert!((rig.body.gravity_scale - fast).abs() < 1e-5);
}

#[test]
fn test_landing_fires_once_after_airtime() {
    let mut rig = Rig::new(MovementConfig::default());

    rig.run_for(0.2);
    rig.ground.grounded = true;
    rig.update(DT);
    rig.update(DT);

    assert_eq!(rig.sink.landings, 1);
    assert_eq!(rig.controller.state().motion(), MotionState::Grounded);
}

#[test]
fn test_short_hop_off_ledge_is_not_a_landing() {
    let mut rig = Rig::grounded(MovementConfig::default());

    rig.ground.grounded = false;
    rig.update(0.05);
    rig.ground.grounded = true;
    rig.update(0.05);

    assert_eq!(rig.sink.landings, 0);
}

#[test]
fn test_windows_drift_negative_without_floor() {
    let mut rig = Rig::new(MovementConfig::default());

    rig.run_for(2.0);

    let timers = rig.controller.state().timers();
    assert!(timers.last_on_ground < -1.0);
    assert!(timers.last_pressed_jump < -1.0);
    assert!(!timers.grounded());
}

// ----------------------------------------------------------------------
// Walls
// ----------------------------------------------------------------------

#[test]
fn test_wall_contact_follows_world_side_for_either_facing() {
    let mut rig = Rig::new(MovementConfig::default());
    rig.walls.left = true;

    rig.update(DT);
    assert!(rig.controller.state().timers().on_wall_side(WallSide::Left));
    assert!(!rig.controller.state().timers().on_wall_side(WallSide::Right));

    rig.controller.request_facing(false);
    rig.run_for(0.2);
    assert!(rig.controller.state().timers().on_wall_side(WallSide::Left));
    assert!(!rig.controller.state().timers().on_wall_side(WallSide::Right));
}

#[test]
fn test_wall_jump_pushes_away_from_wall() {
    let config = MovementConfig {
        wall_jump_force: Vec2::new(15.0, 25.0),
        ..Default::default()
    };
    let mut rig = Rig::new(config);
    rig.walls.right = true;
    rig.body.velocity = Vec2::new(0.0, -4.0);

    rig.controller.on_jump_input();
    rig.update(DT);

    assert!(rig.controller.state().is_wall_jumping());
    assert_eq!(rig.body.impulses, vec![Vec2::new(-15.0, 29.0)]);
    let timers = rig.controller.state().timers();
    assert_eq!(timers.last_on_wall, 0.0);
    assert_eq!(timers.last_pressed_jump, 0.0);
    assert_eq!(rig.sink.jumps, 0);
}

#[test]
fn test_wall_jump_chains_only_to_opposite_wall() {
    let config = MovementConfig {
        wall_jump_force: Vec2::new(15.0, 25.0),
        wall_jump_time: 0.15,
        ..Default::default()
    };
    let mut rig = Rig::new(config);
    rig.walls.right = true;

    rig.controller.on_jump_input();
    rig.update(DT);
    assert_eq!(rig.body.impulses.len(), 1);

    // Same wall again: refused
    rig.controller.on_jump_input();
    rig.update(DT);
    assert_eq!(rig.body.impulses.len(), 1);

    // Opposite wall: accepted, and the sideways correction cancels current velocity
    rig.walls.right = false;
    rig.walls.left = true;
    rig.controller.on_jump_input();
    rig.update(DT);

    assert_eq!(rig.body.impulses.len(), 2);
    assert_eq!(rig.body.impulses[1].x, 30.0);
    assert!(matches!(
        rig.controller.state().phase(),
        super::Phase::WallJumping {
            from: WallSide::Left,
            ..
        }
    ));
}

#[test]
fn test_second_press_on_same_wall_wall_jumps_once() {
    let mut rig = Rig::new(MovementConfig {
        jump_input_buffer_time: 0.1,
        wall_jump_time: 0.15,
        ..Default::default()
    });
    rig.walls.right = true;

    rig.controller.on_jump_input();
    rig.update(DT);
    rig.update(DT);
    rig.controller.on_jump_input();
    rig.run_for(0.1);

    assert_eq!(rig.body.impulses.len(), 1);
    assert!(rig.controller.state().is_wall_jumping());
}

#[test]
fn test_wall_jump_expiry_does_not_depend_on_uptime() {
    let mut rig = Rig::new(MovementConfig {
        wall_jump_time: 0.15,
        ..Default::default()
    });

    // About a week of airtime, past where f32 seconds stop resolving a frame
    rig.update(600_000.0);

    rig.walls.right = true;
    rig.controller.on_jump_input();
    rig.update(1.0 / 60.0);
    assert!(rig.controller.state().is_wall_jumping());
    rig.walls.right = false;

    for _ in 0..12 {
        rig.update(1.0 / 60.0);
    }
    assert!(!rig.controller.state().is_wall_jumping());
}

#[test]
fn test_wall_jump_expires_after_its_window() {
    let mut rig = Rig::new(MovementConfig {
        wall_jump_time: 0.15,
        ..Default::default()
    });
    rig.walls.right = true;
    rig.controller.on_jump_input();
    rig.update(DT);
    rig.walls.right = false;

    rig.run_for(0.2);
    assert!(!rig.controller.state().is_wall_jumping());
}

#[test]
fn test_slide_starts_and_stops_with_input() {
    let mut rig = Rig::new(MovementConfig::default());
    rig.walls.right = true;

    rig.controller.set_move_input(Vec2::X);
    rig.update(DT);
    assert!(rig.controller.state().is_sliding());
    assert_eq!(rig.body.gravity_scale, 0.0);

    rig.body.velocity.y = 2.0;
    rig.fixed_update();
    assert_eq!(rig.body.impulses, vec![Vec2::new(0.0, -2.0)]);

    rig.controller.set_move_input(Vec2::ZERO);
    rig.update(DT);
    assert!(!rig.controller.state().is_sliding());
}

#[test]
fn test_no_slide_when_pressing_away_or_grounded() {
    let mut rig = Rig::new(MovementConfig::default());
    rig.walls.right = true;

    rig.controller.set_move_input(Vec2::NEG_X);
    rig.update(DT);
    assert!(!rig.controller.state().is_sliding());

    rig.controller.set_move_input(Vec2::X);
    rig.ground.grounded = true;
    rig.update(DT);
    assert!(!rig.controller.state().is_sliding());
}

// ----------------------------------------------------------------------
// Dashing
// ----------------------------------------------------------------------

#[test]
fn test_dash_timeline() {
    let config = dash_config();
    let mut rig = Rig::new(config.clone());

    rig.controller.on_dash_input();
    rig.update(DT);

    let state = rig.controller.state();
    assert!(state.is_dashing());
    assert!(state.is_dash_attacking());
    assert_eq!(state.dash_charges(), 0);
    assert_eq!(rig.body.velocity, Vec2::new(20.0, 0.0));
    assert_eq!(rig.body.gravity_scale, 0.0);
    assert_eq!(rig.sink.dashes, vec![Vec2::X]);

    // Attack pins velocity every physics step
    rig.body.velocity = Vec2::new(0.0, -3.0);
    rig.fixed_update();
    assert_eq!(rig.body.velocity, Vec2::new(20.0, 0.0));

    // t = 0.2: attack over, still in the end phase at dash_end_speed
    for _ in 0..19 {
        rig.update(DT);
    }
    let state = rig.controller.state();
    assert!(state.is_dashing());
    assert!(!state.is_dash_attacking());
    assert_eq!(rig.body.velocity, Vec2::new(5.0, 0.0));
    assert!((rig.body.gravity_scale - config.gravity_scale).abs() < 1e-5);

    // t = 0.24: still inside attack plus end
    for _ in 0..4 {
        rig.update(DT);
    }
    assert!(rig.controller.state().is_dashing());

    // Over at 0.25 s, give or take one frame of overshoot per phase
    let mut frames = 23;
    while rig.controller.state().is_dashing() && frames < 40 {
        rig.update(DT);
        frames += 1;
    }
    assert!((25..=27).contains(&frames), "dash ended after {} frames", frames);
    assert_eq!(rig.controller.state().dash_charges(), 0);
    assert!(!rig.controller.state().is_dash_refilling());
}

#[test]
fn test_dash_follows_move_input() {
    let mut rig = Rig::new(dash_config());

    rig.controller.set_move_input(Vec2::new(1.0, 1.0));
    rig.controller.on_dash_input();
    rig.update(DT);

    let direction = rig.controller.state().last_dash_direction();
    assert!((direction - Vec2::new(1.0, 1.0).normalize()).length() < 1e-5);
    assert!((rig.body.velocity.length() - 20.0).abs() < 1e-4);
}

#[test]
fn test_dash_without_input_uses_facing() {
    let mut rig = Rig::new(dash_config());

    rig.controller.request_facing(false);
    rig.controller.on_dash_input();
    rig.update(DT);

    assert_eq!(rig.controller.state().last_dash_direction(), Vec2::NEG_X);
}

#[test]
fn test_dash_press_during_dash_is_ignored() {
    let mut rig = Rig::grounded(MovementConfig {
        dash_amount: 2,
        ..dash_config()
    });

    rig.controller.on_dash_input();
    rig.update(DT);
    rig.controller.on_dash_input();
    rig.update(DT);

    assert_eq!(rig.sink.dashes.len(), 1);
    assert_eq!(rig.controller.state().dash_charges(), 1);
}

#[test]
fn test_dash_refills_on_ground() {
    let mut rig = Rig::new(dash_config());

    rig.controller.on_dash_input();
    rig.update(DT);
    rig.run_for(0.3);
    assert!(!rig.controller.state().is_dashing());
    assert_eq!(rig.controller.state().dash_charges(), 0);

    rig.ground.grounded = true;
    rig.update(DT);
    assert!(rig.controller.state().is_dash_refilling());

    rig.run_for(0.15);
    assert_eq!(rig.controller.state().dash_charges(), 1);
    assert!(!rig.controller.state().is_dash_refilling());
}

#[test]
fn test_zero_dash_amount_never_dashes() {
    let mut rig = Rig::grounded(MovementConfig {
        dash_amount: 0,
        ..dash_config()
    });

    rig.controller.on_dash_input();
    rig.run_for(0.5);

    assert!(rig.sink.dashes.is_empty());
    assert!(!rig.controller.state().is_dashing());
    assert!(!rig.controller.state().is_dash_refilling());
}

#[test]
fn test_dash_buffer_fires_when_charge_returns() {
    let mut rig = Rig::grounded(MovementConfig {
        dash_input_buffer_time: 0.1,
        dash_refill_time: 0.05,
        ..dash_config()
    });

    rig.controller.on_dash_input();
    rig.update(DT);
    rig.run_for(0.3);
    assert_eq!(rig.sink.dashes.len(), 1);

    // Back on the ground with no charge yet: the press waits in the buffer
    rig.controller.on_dash_input();
    rig.update(DT);
    rig.run_for(0.08);
    assert_eq!(rig.sink.dashes.len(), 2);
}

#[test]
fn test_cancel_dash_restores_gravity_without_refund() {
    let config = dash_config();
    let mut rig = Rig::new(config.clone());

    rig.controller.on_dash_input();
    rig.update(DT);

    assert!(rig.controller.cancel_dash(&mut rig.body));
    assert!(!rig.controller.state().is_dashing());
    assert_eq!(rig.controller.state().dash_charges(), 0);
    assert!((rig.body.gravity_scale - config.gravity_scale).abs() < 1e-5);

    assert!(!rig.controller.cancel_dash(&mut rig.body));
}

#[test]
fn test_dash_hitstop_freezes_then_restores() {
    let mut rig = Rig::new(MovementConfig {
        dash_sleep_time: 0.05,
        ..dash_config()
    });

    rig.controller.on_dash_input();
    rig.update(DT);
    assert!(rig.controller.state().is_hitstopped());
    assert_eq!(rig.body.velocity, Vec2::ZERO);

    // Physics pass is skipped while frozen
    rig.controller.set_move_input(Vec2::X);
    rig.fixed_update();
    assert_eq!(rig.body.velocity, Vec2::ZERO);
    assert!(rig.body.forces.is_empty());

    rig.update(0.02);
    rig.update(0.02);
    assert!(rig.controller.state().is_hitstopped());

    rig.update(0.02);
    assert!(!rig.controller.state().is_hitstopped());
    assert_eq!(rig.body.velocity, Vec2::new(20.0, 0.0));
    assert!(rig.controller.state().is_dash_attacking());
}

#[test]
fn test_cancel_dash_during_hitstop_unfreezes() {
    let mut rig = Rig::new(MovementConfig {
        dash_sleep_time: 0.05,
        ..dash_config()
    });

    rig.controller.on_dash_input();
    rig.update(DT);
    assert!(rig.controller.cancel_dash(&mut rig.body));

    assert!(!rig.controller.state().is_hitstopped());
    assert_eq!(rig.body.velocity, Vec2::new(20.0, 0.0));
}

// ----------------------------------------------------------------------
// Input and running
// ----------------------------------------------------------------------

#[test]
fn test_apply_input_turns_and_queues_presses() {
    let mut rig = Rig::grounded(MovementConfig::default());

    rig.controller.apply_input(&FakeInput {
        axis: Vec2::new(-2.0, 0.0),
        jump: true,
        ..Default::default()
    });
    assert!(!rig.controller.state().is_facing_right());
    assert_eq!(rig.controller.state().move_input(), Vec2::NEG_X);

    rig.update(DT);
    assert!(rig.controller.state().is_jumping());

    // No horizontal input keeps the current facing
    rig.controller.apply_input(&FakeInput::default());
    assert!(!rig.controller.state().is_facing_right());
}

#[test]
fn test_run_accelerates_toward_input() {
    let mut rig = Rig::grounded(MovementConfig::default());

    rig.controller.set_move_input(Vec2::X);
    rig.fixed_update();

    assert_eq!(rig.body.forces.len(), 1);
    assert!(rig.body.forces[0].x > 0.0);
    assert_eq!(rig.body.forces[0].y, 0.0);
}

#[test]
fn test_vertical_velocity_reported_each_frame() {
    let mut rig = Rig::new(MovementConfig::default());
    rig.body.velocity.y = -3.0;

    rig.update(DT);
    assert_eq!(rig.sink.last_velocity_y, -3.0);
}

#[test]
fn test_unit_sink_accepts_events() {
    let mut controller = MovementController::new(MovementConfig::default()).unwrap();
    let mut body = FakeBody::default();
    let ground = FakeGround { grounded: true };
    let walls = FakeWalls::default();

    controller.on_jump_input();
    controller.update(
        DT,
        &mut TickContext {
            ground: &ground,
            walls: &walls,
            body: &mut body,
            events: &mut (),
        },
    );
    assert!(controller.state().is_jumping());
}

#[test]
fn test_random_input_keeps_state_consistent() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let config = MovementConfig {
        dash_amount: 2,
        dash_sleep_time: 0.03,
        ..Default::default()
    };
    let max_charges = config.dash_amount;
    let mut rig = Rig::new(config);

    for _ in 0..5000 {
        rig.ground.grounded = rng.random_bool(0.4);
        rig.walls.left = rng.random_bool(0.15);
        rig.walls.right = rng.random_bool(0.15);

        let input = FakeInput {
            axis: Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0)),
            jump: rng.random_bool(0.1),
            release: rng.random_bool(0.1),
            dash: rng.random_bool(0.05),
        };
        rig.controller.apply_input(&input);

        if rng.random_bool(0.05) {
            rig.controller.cancel_dash(&mut rig.body);
        }

        rig.update(rng.random_range(0.001..0.05));
        if rng.random_bool(0.7) {
            rig.fixed_update();
        }

        let state = rig.controller.state();
        assert!(state.dash_charges() <= max_charges);
        assert!(!(state.is_jumping() && state.is_wall_jumping()));
        assert!(!(state.is_sliding() && state.is_dashing()));
        assert!(!state.is_dash_attacking() || state.is_dashing());
        assert!(rig.body.velocity.is_finite());
        assert!(rig.body.gravity_scale.is_finite());
    }
}
