//! Movement domain: dash run and dash charge bookkeeping.
//!
//! Both are explicit timed sub-states. The controller steps them once per
//! decision tick; nothing here suspends or schedules work on its own.

use bevy::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashPhase {
    /// High-speed burst, velocity pinned every physics step, no gravity.
    Attack,
    /// Recovery window, normal physics with slowed run blending.
    End,
}

/// What a dash run did during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashProgress {
    Continuing,
    AttackEnded,
    Finished,
}

/// A dash in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct DashRun {
    pub phase: DashPhase,
    /// Seconds spent in the current phase.
    pub elapsed: f32,
    /// Unit direction captured when the dash started.
    pub direction: Vec2,
}

impl DashRun {
    pub fn new(direction: Vec2) -> Self {
        Self {
            phase: DashPhase::Attack,
            elapsed: 0.0,
            direction: direction.normalize_or(Vec2::X),
        }
    }

    /// Advance by `dt`. A phase ends once its elapsed time exceeds its duration;
    /// the end phase starts from zero rather than inheriting the overshoot.
    pub fn step(&mut self, dt: f32, attack_time: f32, end_time: f32) -> DashProgress {
        self.elapsed += dt;
        match self.phase {
            DashPhase::Attack if self.elapsed > attack_time => {
                self.phase = DashPhase::End;
                self.elapsed = 0.0;
                DashProgress::AttackEnded
            }
            DashPhase::End if self.elapsed > end_time => DashProgress::Finished,
            _ => DashProgress::Continuing,
        }
    }
}

/// Remaining dash charges and the single refill cycle that may be running.
#[derive(Debug, Clone, PartialEq)]
pub struct DashCharges {
    remaining: u32,
    max: u32,
    refill_elapsed: Option<f32>,
}

impl DashCharges {
    pub fn new(max: u32) -> Self {
        Self {
            remaining: max,
            max,
            refill_elapsed: None,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_refilling(&self) -> bool {
        self.refill_elapsed.is_some()
    }

    pub fn has_charge(&self) -> bool {
        self.remaining > 0
    }

    /// Spend one charge. Returns false when none are left.
    pub fn spend(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Start a refill cycle if one is due. Only one cycle runs at a time.
    pub fn begin_refill(&mut self, grounded: bool, dashing: bool) -> bool {
        if dashing || !grounded || self.remaining >= self.max || self.refill_elapsed.is_some() {
            return false;
        }
        self.refill_elapsed = Some(0.0);
        true
    }

    /// Advance the running refill cycle. Returns true when a charge was added.
    pub fn step(&mut self, dt: f32, refill_time: f32) -> bool {
        let Some(elapsed) = self.refill_elapsed.as_mut() else {
            return false;
        };

        *elapsed += dt;
        if *elapsed < refill_time {
            return false;
        }

        self.refill_elapsed = None;
        self.remaining = (self.remaining + 1).min(self.max);
        true
    }
}
