//! Movement domain: grace and buffer windows.
//!
//! Every window counts down without a floor; `> 0` is the only question ever
//! asked of it. Contacts and presses re-arm a window to its configured length,
//! and spending a buffered intent zeroes it.

use crate::movement::WallSide;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementTimers {
    pub last_on_ground: f32,
    pub last_on_wall: f32,
    pub last_on_wall_left: f32,
    pub last_on_wall_right: f32,
    pub last_pressed_jump: f32,
    pub last_pressed_dash: f32,
}

impl MovementTimers {
    pub fn tick(&mut self, dt: f32) {
        self.last_on_ground -= dt;
        self.last_on_wall -= dt;
        self.last_on_wall_left -= dt;
        self.last_on_wall_right -= dt;
        self.last_pressed_jump -= dt;
        self.last_pressed_dash -= dt;
    }

    pub fn grounded(&self) -> bool {
        self.last_on_ground > 0.0
    }

    pub fn on_wall(&self) -> bool {
        self.last_on_wall > 0.0
    }

    pub fn on_wall_side(&self, side: WallSide) -> bool {
        match side {
            WallSide::Left => self.last_on_wall_left > 0.0,
            WallSide::Right => self.last_on_wall_right > 0.0,
        }
    }

    pub fn jump_buffered(&self) -> bool {
        self.last_pressed_jump > 0.0
    }

    pub fn dash_buffered(&self) -> bool {
        self.last_pressed_dash > 0.0
    }

    pub fn arm_wall(&mut self, side: WallSide, grace: f32) {
        match side {
            WallSide::Left => self.last_on_wall_left = grace,
            WallSide::Right => self.last_on_wall_right = grace,
        }
        self.refresh_wall();
    }

    /// The combined window always tracks the more recent side.
    pub fn refresh_wall(&mut self) {
        self.last_on_wall = self.last_on_wall_left.max(self.last_on_wall_right);
    }

    /// Wall contact the character most recently had, right wins a tie.
    pub fn touched_wall(&self) -> Option<WallSide> {
        if self.last_on_wall_right > 0.0 {
            Some(WallSide::Right)
        } else if self.last_on_wall_left > 0.0 {
            Some(WallSide::Left)
        } else {
            None
        }
    }
}
