//! Horizontal velocity policies.
//!
//! A motor turns the player's wish direction into a horizontal velocity. The
//! controller owns collision; motors never see geometry.

use crate::{collision::Vec3, utils::horizontal};

/// Per-step request handed to the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepInput {
    /// Desired horizontal direction (world space). The vertical component is ignored
    /// and the length is capped at 1.
    pub wish_direction: Vec3,
    pub jump: bool,
    pub crouch: bool,
    pub sprint: bool,
}

impl StepInput {
    pub fn walk(wish_direction: Vec3) -> Self {
        Self {
            wish_direction,
            ..Self::default()
        }
    }

    /// Horizontal wish direction with length at most 1.
    pub fn wish(&self) -> Vec3 {
        let flat = horizontal(self.wish_direction);
        let len = flat.norm();
        if len > 1.0 { flat / len } else { flat }
    }
}

/// What a motor may know about the body this step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotorContext {
    /// Horizontal velocity the motor produced last step.
    pub ground_velocity: Vec3,
    pub grounded: bool,
    pub landed_this_frame: bool,
    pub crouching: bool,
    pub sprinting: bool,
    pub max_speed: f32,
    pub dt: f32,
}

pub trait Motor {
    /// Horizontal velocity (m/s) for this step.
    fn compute_velocity(&mut self, input: &StepInput, ctx: &MotorContext) -> Vec3;
}

impl<M: Motor + ?Sized> Motor for Box<M> {
    fn compute_velocity(&mut self, input: &StepInput, ctx: &MotorContext) -> Vec3 {
        (**self).compute_velocity(input, ctx)
    }
}

/// Starts and stops instantly at the configured speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstantMotor {
    pub crouch_multiplier: f32,
    pub sprint_multiplier: f32,
}

impl Default for InstantMotor {
    fn default() -> Self {
        Self {
            crouch_multiplier: 0.5,
            sprint_multiplier: 2.0,
        }
    }
}

impl Motor for InstantMotor {
    fn compute_velocity(&mut self, input: &StepInput, ctx: &MotorContext) -> Vec3 {
        let v = input.wish() * ctx.max_speed;
        // Crouching wins over sprinting.
        if ctx.crouching {
            v * self.crouch_multiplier
        } else if ctx.sprinting {
            v * self.sprint_multiplier
        } else {
            v
        }
    }
}

/// Quake-style acceleration: ground friction, separate ground and air acceleration,
/// speed along the wish direction capped at `max_speed`.
///
/// Friction is skipped on the step the body lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcceleratedMotor {
    pub friction: f32,
    pub accelerate: f32,
    pub air_accelerate: f32,
}

impl Default for AcceleratedMotor {
    fn default() -> Self {
        Self {
            friction: 4.8,
            accelerate: 5.6,
            air_accelerate: 12.0,
        }
    }
}

impl AcceleratedMotor {
    fn accelerate(wish: Vec3, current: Vec3, accel: f32, max_speed: f32, dt: f32) -> Vec3 {
        let projected = current.dot(&wish);
        let add = (accel * dt).min(max_speed - projected).max(0.0);
        current + wish * add
    }
}

impl Motor for AcceleratedMotor {
    fn compute_velocity(&mut self, input: &StepInput, ctx: &MotorContext) -> Vec3 {
        let wish = input.wish();
        let mut current = horizontal(ctx.ground_velocity);

        if !ctx.grounded {
            return Self::accelerate(wish, current, self.air_accelerate, ctx.max_speed, ctx.dt);
        }

        if !ctx.landed_this_frame {
            let speed = current.norm();
            if speed > 0.0 {
                let drop = speed * self.friction * ctx.dt;
                current *= (speed - drop).max(0.0) / speed;
            }
        }
        Self::accelerate(wish, current, self.accelerate, ctx.max_speed, ctx.dt)
    }
}
