//! Movement domain: per-character motion state.

use bevy::math::Vec2;

use crate::movement::dash::{DashCharges, DashPhase, DashRun};
use crate::movement::hitstop::Hitstop;
use crate::movement::timers::MovementTimers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn is_right(self) -> bool {
        self == Facing::Right
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    pub fn opposite(self) -> Self {
        match self {
            WallSide::Left => WallSide::Right,
            WallSide::Right => WallSide::Left,
        }
    }

    /// Horizontal direction pointing away from this wall.
    pub fn away_sign(self) -> f32 {
        match self {
            WallSide::Left => 1.0,
            WallSide::Right => -1.0,
        }
    }
}

/// The exclusive part of the motion state. At most one of these holds at a time,
/// so a character can never be jumping and wall jumping at once.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    /// On the ground or in the air with no jump, dash or slide in progress.
    #[default]
    Free,
    /// Rising from a ground jump.
    Jumping,
    WallJumping {
        /// Wall the jump pushed off from.
        from: WallSide,
        /// Seconds since the push off.
        elapsed: f32,
    },
    Dashing(DashRun),
    Sliding,
}

/// Jump-feel modifiers. These overlap with [`Phase`]: a cut carries over into
/// the fall, and a post-apex fall survives a slide or a dash until landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpFeel {
    pub cut: bool,
    pub falling: bool,
}

/// Coarse classification for observers (animation, debug overlays).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    Grounded,
    Airborne,
    Jumping,
    Falling,
    WallJumping,
    Dashing,
    Sliding,
}

/// Intents queued by the input collaborator and consumed on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct PendingInput {
    pub jump: bool,
    pub jump_release: bool,
    pub dash: bool,
}

#[derive(Debug, Clone)]
pub struct MovementState {
    pub(crate) facing: Facing,
    pub(crate) phase: Phase,
    pub(crate) feel: JumpFeel,
    pub(crate) timers: MovementTimers,
    pub(crate) dash: DashCharges,
    pub(crate) last_dash_direction: Vec2,
    pub(crate) move_input: Vec2,
    pub(crate) pending: PendingInput,
    pub(crate) hitstop: Hitstop,
}

impl MovementState {
    pub(crate) fn new(dash_amount: u32) -> Self {
        Self {
            facing: Facing::Right,
            phase: Phase::Free,
            feel: JumpFeel::default(),
            timers: MovementTimers::default(),
            dash: DashCharges::new(dash_amount),
            last_dash_direction: Vec2::X,
            move_input: Vec2::ZERO,
            pending: PendingInput::default(),
            hitstop: Hitstop::default(),
        }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_facing_right(&self) -> bool {
        self.facing.is_right()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn timers(&self) -> &MovementTimers {
        &self.timers
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.phase, Phase::Jumping)
    }

    pub fn is_wall_jumping(&self) -> bool {
        matches!(self.phase, Phase::WallJumping { .. })
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.phase, Phase::Dashing(_))
    }

    pub fn is_dash_attacking(&self) -> bool {
        matches!(
            self.phase,
            Phase::Dashing(DashRun {
                phase: DashPhase::Attack,
                ..
            })
        )
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.phase, Phase::Sliding)
    }

    pub fn is_jump_cut(&self) -> bool {
        self.feel.cut
    }

    pub fn is_jump_falling(&self) -> bool {
        self.feel.falling
    }

    pub fn dash_charges(&self) -> u32 {
        self.dash.remaining()
    }

    pub fn is_dash_refilling(&self) -> bool {
        self.dash.is_refilling()
    }

    pub fn last_dash_direction(&self) -> Vec2 {
        self.last_dash_direction
    }

    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    pub fn is_hitstopped(&self) -> bool {
        self.hitstop.is_active()
    }

    /// Any jump-shaped airtime: rising, pushed off a wall, or falling after an apex.
    pub(crate) fn in_jump_arc(&self) -> bool {
        self.is_jumping() || self.is_wall_jumping() || self.feel.falling
    }

    pub fn motion(&self) -> MotionState {
        match self.phase {
            Phase::Dashing(_) => MotionState::Dashing,
            Phase::Sliding => MotionState::Sliding,
            Phase::WallJumping { .. } => MotionState::WallJumping,
            Phase::Jumping => MotionState::Jumping,
            Phase::Free if self.timers.grounded() => MotionState::Grounded,
            Phase::Free if self.feel.falling => MotionState::Falling,
            Phase::Free => MotionState::Airborne,
        }
    }
}
