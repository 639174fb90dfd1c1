/*!
Kinematic character controller (KCC) defaults and tolerances.

These constants centralize the parameters used by collide-and-slide, step
climbing, ground probing and the vertical integrator. `ControllerConfig::default()`
is assembled from them; keep them together so tuning stays in one place.

Notes
- Distances are in meters, time in seconds, angles in degrees.
- Favor practical world-space tolerances over machine epsilon for robust behavior.
*/

/// Inward buffer kept between the cast shape and any surface (meters).
/// Too large creates visible gaps; too small risks re-colliding every step.
pub const DEFAULT_SKIN: f32 = 0.015;

/// Maximum number of contact-producing casts per resolution pass.
/// Higher values help with tight corners at the cost of more queries.
pub const DEFAULT_MAX_BOUNCES: u32 = 5;

/// Surfaces at most this steep (angle from +Y) are ground.
pub const DEFAULT_MAX_SLOPE_DEG: f32 = 55.0;

/// Surfaces at least this inverted (angle from +Y) are ceilings.
pub const DEFAULT_MIN_CEILING_DEG: f32 = 165.0;

/// Tallest ledge the controller snaps up onto (meters).
pub const DEFAULT_MAX_STEP_HEIGHT: f32 = 0.2;

/// Minimum landing depth on top of a step (meters).
pub const DEFAULT_MIN_STEP_DEPTH: f32 = 0.1;

/// Grace window after walking off a ledge during which a jump is still accepted (seconds).
pub const DEFAULT_COYOTE_TIME: f32 = 0.2;

/// Terminal fall speed (meters per second, positive magnitude).
pub const DEFAULT_MAX_FALL_SPEED: f32 = 20.0;

/// Peak height of a jump (meters).
pub const DEFAULT_JUMP_HEIGHT: f32 = 2.0;

/// Horizontal distance covered by a jump at `DEFAULT_MAX_SPEED` (meters).
pub const DEFAULT_JUMP_DISTANCE: f32 = 4.0;

/// Default maximum horizontal speed (meters per second).
pub const DEFAULT_MAX_SPEED: f32 = 5.0;

/// Capsule dimensions used by `BodyShape::default()` (meters).
pub const DEFAULT_RADIUS: f32 = 0.5;
pub const DEFAULT_STANDING_HEIGHT: f32 = 2.0;
pub const DEFAULT_CROUCH_HEIGHT: f32 = 1.0;

/// Minimum squared movement threshold to consider a displacement meaningful (m^2).
/// Movements below this are treated as zero to avoid tiny oscillations.
pub const MIN_MOVE_SQ: f32 = 1.0e-10;

/// Practical small distance for comparisons (meters).
/// Use for dot-product guards, equality checks in world space, etc.
pub const DIST_EPS: f32 = 1.0e-6;

/// Ground steeper than this (degrees) counts as a slope rather than flat ground.
pub const ON_SLOPE_EPS_DEG: f32 = 0.1;
