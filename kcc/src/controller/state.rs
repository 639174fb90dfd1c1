use crate::collision::Vec3;

/// Vertical motion phase of the body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalPhase {
    #[default]
    Grounded,
    /// Recently walked off an edge; a jump is still honored.
    Coyote,
    Airborne,
    Jumping,
}

/// Contact state and motion bookkeeping of one controlled body.
///
/// Produced by every step and readable between steps. `grounded` and `sliding`
/// are never both set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionState {
    pub grounded: bool,
    /// Walkable surface below the body, only while grounded.
    pub ground_normal: Option<Vec3>,
    pub ground_point: Option<Vec3>,
    /// Angle of the surface below (degrees), walkable or not.
    pub slope_angle: f32,
    pub on_slope: bool,
    /// Standing on something steeper than walkable.
    pub sliding: bool,
    pub bumping_head: bool,
    /// Set only by a step climb during horizontal resolution of the last step.
    pub climbing_step: bool,
    /// Signed vertical speed in m/s.
    pub vertical_velocity: f32,
    pub phase: VerticalPhase,
    pub coyote_remaining: f32,
    pub crouching: bool,
    pub sprinting: bool,
    pub was_grounded: bool,
    pub landed_this_frame: bool,
    /// Horizontal velocity chosen by the motor in the last step.
    pub ground_velocity: Vec3,
}

impl MotionState {
    #[inline]
    pub fn coyote_active(&self) -> bool {
        self.phase == VerticalPhase::Coyote
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.phase == VerticalPhase::Jumping
    }

    /// Forget contact flags before the probes of a new step.
    pub(crate) fn clear_contacts(&mut self) {
        self.grounded = false;
        self.ground_normal = None;
        self.ground_point = None;
        self.slope_angle = 0.0;
        self.on_slope = false;
        self.sliding = false;
        self.bumping_head = false;
        self.climbing_step = false;
    }
}
