//! Controller configuration, setup-time validation and derived jump constants.
//!
//! Everything here is checked once when a controller is built (or reconfigured).
//! Per-step code assumes a validated config and never re-checks it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision::{
    CastCapsule, LayerMask,
    settings::{
        DEFAULT_COYOTE_TIME, DEFAULT_CROUCH_HEIGHT, DEFAULT_JUMP_DISTANCE, DEFAULT_JUMP_HEIGHT,
        DEFAULT_MAX_BOUNCES, DEFAULT_MAX_FALL_SPEED, DEFAULT_MAX_SLOPE_DEG, DEFAULT_MAX_SPEED,
        DEFAULT_MAX_STEP_HEIGHT, DEFAULT_MIN_CEILING_DEG, DEFAULT_MIN_STEP_DEPTH, DEFAULT_RADIUS,
        DEFAULT_SKIN, DEFAULT_STANDING_HEIGHT,
    },
};

/// Capsule dimensions of the moving body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyShape {
    pub radius: f32,
    pub standing_height: f32,
    pub crouch_height: f32,
    /// Inward buffer kept between the body and every surface.
    pub skin_width: f32,
}

impl Default for BodyShape {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            standing_height: DEFAULT_STANDING_HEIGHT,
            crouch_height: DEFAULT_CROUCH_HEIGHT,
            skin_width: DEFAULT_SKIN,
        }
    }
}

impl BodyShape {
    #[inline]
    pub fn height(&self, crouching: bool) -> f32 {
        if crouching {
            self.crouch_height
        } else {
            self.standing_height
        }
    }

    /// The capsule swept for this body in its current stance.
    #[inline]
    pub fn cast_capsule(&self, crouching: bool) -> CastCapsule {
        CastCapsule {
            radius: self.radius,
            height: self.height(crouching),
            skin: self.skin_width,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub body: BodyShape,
    /// Default maximum horizontal speed; motors may scale it.
    pub max_speed: f32,
    /// Terminal fall speed (positive magnitude).
    pub max_fall_speed: f32,
    pub use_gravity: bool,
    /// Layers the controller collides with.
    pub collision_mask: LayerMask,
    /// Maximum contact-producing casts per resolution pass.
    pub max_bounces: u32,
    /// Steepest walkable surface, degrees from up (inclusive).
    pub max_slope_angle: f32,
    /// Flattest ceiling, degrees from up (inclusive). Must exceed `max_slope_angle`.
    pub min_ceiling_angle: f32,
    pub max_step_height: f32,
    pub min_step_depth: f32,
    /// Peak height of a jump. Determines gravity together with `jump_distance`.
    pub jump_height: f32,
    /// Distance covered by a jump at `max_speed`.
    pub jump_distance: f32,
    /// Seconds after leaving the ground during which a jump is still honored.
    pub coyote_time: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            body: BodyShape::default(),
            max_speed: DEFAULT_MAX_SPEED,
            max_fall_speed: DEFAULT_MAX_FALL_SPEED,
            use_gravity: true,
            collision_mask: LayerMask::ALL,
            max_bounces: DEFAULT_MAX_BOUNCES,
            max_slope_angle: DEFAULT_MAX_SLOPE_DEG,
            min_ceiling_angle: DEFAULT_MIN_CEILING_DEG,
            max_step_height: DEFAULT_MAX_STEP_HEIGHT,
            min_step_depth: DEFAULT_MIN_STEP_DEPTH,
            jump_height: DEFAULT_JUMP_HEIGHT,
            jump_distance: DEFAULT_JUMP_DISTANCE,
            coyote_time: DEFAULT_COYOTE_TIME,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must lie within [0, 180] degrees, got {value}")]
    AngleOutOfRange { field: &'static str, value: f32 },

    #[error("max_slope_angle ({max_slope}) must be below min_ceiling_angle ({min_ceiling})")]
    SlopeCeilingOverlap { max_slope: f32, min_ceiling: f32 },

    #[error("max_bounces must be at least 1")]
    ZeroBounces,

    #[error("skin_width ({skin}) must be smaller than the body radius ({radius})")]
    SkinTooLarge { skin: f32, radius: f32 },

    #[error("{field} ({height}) must be at least twice the radius ({radius})")]
    BodyTooShort {
        field: &'static str,
        height: f32,
        radius: f32,
    },

    #[error("crouch_height ({crouch}) must not exceed standing_height ({standing})")]
    CrouchTooTall { crouch: f32, standing: f32 },
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let body = &self.body;

        let finite = [
            ("radius", body.radius),
            ("standing_height", body.standing_height),
            ("crouch_height", body.crouch_height),
            ("skin_width", body.skin_width),
            ("max_speed", self.max_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("max_slope_angle", self.max_slope_angle),
            ("min_ceiling_angle", self.min_ceiling_angle),
            ("max_step_height", self.max_step_height),
            ("min_step_depth", self.min_step_depth),
            ("jump_height", self.jump_height),
            ("jump_distance", self.jump_distance),
            ("coyote_time", self.coyote_time),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let positive = [
            ("radius", body.radius),
            ("skin_width", body.skin_width),
            ("max_speed", self.max_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("jump_height", self.jump_height),
            ("jump_distance", self.jump_distance),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("max_step_height", self.max_step_height),
            ("min_step_depth", self.min_step_depth),
            ("coyote_time", self.coyote_time),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("max_slope_angle", self.max_slope_angle),
            ("min_ceiling_angle", self.min_ceiling_angle),
        ] {
            if !(0.0..=180.0).contains(&value) {
                return Err(ConfigError::AngleOutOfRange { field, value });
            }
        }
        if self.max_slope_angle >= self.min_ceiling_angle {
            return Err(ConfigError::SlopeCeilingOverlap {
                max_slope: self.max_slope_angle,
                min_ceiling: self.min_ceiling_angle,
            });
        }

        if self.max_bounces == 0 {
            return Err(ConfigError::ZeroBounces);
        }

        if body.skin_width >= body.radius {
            return Err(ConfigError::SkinTooLarge {
                skin: body.skin_width,
                radius: body.radius,
            });
        }
        for (field, height) in [
            ("standing_height", body.standing_height),
            ("crouch_height", body.crouch_height),
        ] {
            if height < 2.0 * body.radius {
                return Err(ConfigError::BodyTooShort {
                    field,
                    height,
                    radius: body.radius,
                });
            }
        }
        if body.crouch_height > body.standing_height {
            return Err(ConfigError::CrouchTooTall {
                crouch: body.crouch_height,
                standing: body.standing_height,
            });
        }

        Ok(())
    }
}

/// Gravity and jump impulse derived from the jump design parameters.
///
/// With `half = jump_distance / 2`, a jump at `max_speed` reaches its apex after
/// `half / max_speed` seconds at exactly `jump_height`:
/// - `gravity = -2 * h * v^2 / half^2`
/// - `jump_force = 2 * h * v / half`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpConstants {
    /// Vertical acceleration (negative, m/s^2).
    pub gravity: f32,
    /// Initial upward speed of a jump (m/s).
    pub jump_force: f32,
}

impl JumpConstants {
    pub fn derive(jump_height: f32, jump_distance: f32, max_speed: f32) -> Self {
        let half_dist = jump_distance / 2.0;
        Self {
            gravity: (-2.0 * jump_height * max_speed * max_speed) / (half_dist * half_dist),
            jump_force: (2.0 * jump_height * max_speed) / half_dist,
        }
    }

    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::derive(config.jump_height, config.jump_distance, config.max_speed)
    }

    /// Apex height reached from a standing jump.
    pub fn apex_height(&self) -> f32 {
        self.jump_force * self.jump_force / (-2.0 * self.gravity)
    }

    /// Time from take-off until landing back at the take-off height.
    pub fn air_time(&self) -> f32 {
        2.0 * self.jump_force / -self.gravity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn slope_and_ceiling_thresholds_must_not_overlap() {
        let config = ControllerConfig {
            max_slope_angle: 60.0,
            min_ceiling_angle: 60.0,
            ..ControllerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SlopeCeilingOverlap {
                max_slope: 60.0,
                min_ceiling: 60.0
            })
        );
    }

    #[test]
    fn skin_width_must_be_positive() {
        let mut config = ControllerConfig::default();
        config.body.skin_width = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "skin_width",
                value: 0.0
            })
        );
    }

    #[test]
    fn bounces_and_body_dimensions_are_checked() {
        let config = ControllerConfig {
            max_bounces: 0,
            ..ControllerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBounces));

        let mut config = ControllerConfig::default();
        config.body.crouch_height = 0.8;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BodyTooShort {
                field: "crouch_height",
                ..
            })
        ));

        let mut config = ControllerConfig::default();
        config.body.crouch_height = 3.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CrouchTooTall { .. })
        ));

        let mut config = ControllerConfig::default();
        config.coyote_time = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "coyote_time",
                ..
            })
        ));
    }

    #[test]
    fn jump_constants_follow_projectile_relations() {
        let jump = JumpConstants::derive(2.0, 4.0, 5.0);

        assert!((jump.gravity + 25.0).abs() < 1.0e-5);
        assert!((jump.jump_force - 10.0).abs() < 1.0e-5);
        assert!((jump.apex_height() - 2.0).abs() < 1.0e-5);
        // Air time at max speed covers exactly the jump distance.
        assert!((jump.air_time() * 5.0 - 4.0).abs() < 1.0e-5);
    }

    #[test]
    fn errors_render_readable_messages() {
        let err = ConfigError::SkinTooLarge {
            skin: 0.6,
            radius: 0.5,
        };
        assert_eq!(
            err.to_string(),
            "skin_width (0.6) must be smaller than the body radius (0.5)"
        );
    }
}
