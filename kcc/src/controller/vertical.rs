//! Vertical motion: gravity, jumping and the coyote window.
//!
//! Pure state transitions over `VerticalMotion`; the controller feeds in contact
//! flags and applies the returned displacement through a gravity pass.

use super::{
    config::JumpConstants,
    state::{MotionState, VerticalPhase},
};

/// Vertical bookkeeping carried between steps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VerticalMotion {
    pub phase: VerticalPhase,
    /// Signed vertical speed in m/s.
    pub velocity: f32,
    pub coyote_remaining: f32,
}

impl VerticalMotion {
    pub fn from_state(state: &MotionState) -> Self {
        Self {
            phase: state.phase,
            velocity: state.vertical_velocity,
            coyote_remaining: state.coyote_remaining,
        }
    }

    pub fn write_to(&self, state: &mut MotionState) {
        state.phase = self.phase;
        state.vertical_velocity = self.velocity;
        state.coyote_remaining = self.coyote_remaining;
    }

    /// True while a jump is still carrying the body upward.
    #[inline]
    pub fn is_rising_jump(&self) -> bool {
        self.phase == VerticalPhase::Jumping && self.velocity > 0.0
    }

    /// Advance the phase from this step's ground contact.
    ///
    /// Walking off the ground opens the coyote window; every further airborne
    /// step shrinks it by `dt` until it closes.
    pub fn update_phase(&mut self, grounded: bool, dt: f32, coyote_time: f32) {
        if grounded && !self.is_rising_jump() {
            self.phase = VerticalPhase::Grounded;
            self.coyote_remaining = 0.0;
            return;
        }

        match self.phase {
            VerticalPhase::Grounded => {
                if coyote_time > 0.0 {
                    self.phase = VerticalPhase::Coyote;
                    self.coyote_remaining = coyote_time;
                } else {
                    self.phase = VerticalPhase::Airborne;
                }
            }
            VerticalPhase::Coyote => {
                self.coyote_remaining -= dt;
                if self.coyote_remaining <= 0.0 {
                    self.coyote_remaining = 0.0;
                    self.phase = VerticalPhase::Airborne;
                }
            }
            VerticalPhase::Jumping if self.velocity <= 0.0 => {
                self.phase = VerticalPhase::Airborne;
            }
            VerticalPhase::Jumping | VerticalPhase::Airborne => {}
        }
    }

    /// Start a jump if the phase allows it. Returns whether the jump happened.
    pub fn try_jump(&mut self, requested: bool, jump: &JumpConstants) -> bool {
        if !requested || !matches!(self.phase, VerticalPhase::Grounded | VerticalPhase::Coyote) {
            return false;
        }
        self.phase = VerticalPhase::Jumping;
        self.velocity = jump.jump_force;
        self.coyote_remaining = 0.0;
        true
    }

    /// Put the body back on the ground, e.g. after a successful ground snap.
    pub fn reground(&mut self) {
        self.phase = VerticalPhase::Grounded;
        self.coyote_remaining = 0.0;
    }

    /// Integrate one step (semi-implicit Euler) and return the vertical displacement.
    ///
    /// - grounded and not jumping: velocity is pinned to one step of gravity
    /// - bumping a ceiling while airborne: same baseline, upward speed is lost
    /// - otherwise: accelerate by gravity, clamped at terminal fall speed
    pub fn integrate(
        &mut self,
        grounded: bool,
        bumping_head: bool,
        gravity: f32,
        max_fall_speed: f32,
        dt: f32,
    ) -> f32 {
        let baseline = gravity * dt;
        let on_ground = grounded && self.phase == VerticalPhase::Grounded;

        if on_ground || (!grounded && bumping_head) {
            self.velocity = baseline;
        } else {
            self.velocity = (self.velocity + baseline).max(-max_fall_speed);
        }
        self.velocity * dt
    }
}
