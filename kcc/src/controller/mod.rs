/*!
Kinematic capsule controller.

One `KinematicController` drives one body. Each `step` turns player input into a
collision-safe displacement and an updated `MotionState`:

- crouch:     stance transitions with a head-room check
- ground:     ground and ceiling probes, ground snap
- motor:      horizontal velocity policies (`Motor`)
- resolver:   collide-and-slide for horizontal and gravity passes
- step_climb: lifting the body over low steps
- vertical:   gravity, jumping and the coyote window
- surface:    walkable / wall / ceiling classification
*/

pub mod config;
pub mod crouch;
pub mod ground;
pub mod motor;
pub mod resolver;
pub mod state;
pub mod step_climb;
pub mod surface;
pub mod sweep;
pub mod vertical;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{BodyShape, ConfigError, ControllerConfig, JumpConstants};
pub use motor::{AcceleratedMotor, InstantMotor, Motor, MotorContext, StepInput};
pub use resolver::{Pass, Resolution};
pub use state::{MotionState, VerticalPhase};
pub use surface::{SurfaceClassifier, SurfaceKind};

use crate::{
    collision::{CollisionQuery, SurfaceContact, Vec3, settings::ON_SLOPE_EPS_DEG, types::up},
    utils::{project_and_scale, surface_angle_deg},
};

use sweep::SweepContext;
use vertical::VerticalMotion;

/// Where the controlled body lives. The controller reads the base position and
/// hands back the final displacement of each step.
pub trait BodyPose {
    /// Capsule base point (feet) in world space.
    fn position(&self) -> Vec3;
    fn apply_displacement(&mut self, displacement: Vec3);
}

impl BodyPose for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }

    fn apply_displacement(&mut self, displacement: Vec3) {
        *self += displacement;
    }
}

pub struct KinematicController<M: Motor = InstantMotor> {
    config: ControllerConfig,
    jump: JumpConstants,
    surfaces: SurfaceClassifier,
    motor: M,
    state: MotionState,
    contacts: Vec<SurfaceContact>,
    /// Displacement committed by the previous step.
    last_displacement: Vec3,
}

impl KinematicController<InstantMotor> {
    pub fn with_instant_motor(config: ControllerConfig) -> Result<Self, ConfigError> {
        Self::new(config, InstantMotor::default())
    }
}

impl<M: Motor> KinematicController<M> {
    pub fn new(config: ControllerConfig, motor: M) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            jump: JumpConstants::from_config(&config),
            surfaces: SurfaceClassifier::new(config.max_slope_angle, config.min_ceiling_angle),
            config,
            motor,
            state: MotionState::default(),
            contacts: Vec::new(),
            last_displacement: Vec3::zeros(),
        })
    }

    /// Swap in a new configuration. The old one stays active if validation fails.
    pub fn set_config(&mut self, config: ControllerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.jump = JumpConstants::from_config(&config);
        self.surfaces = SurfaceClassifier::new(config.max_slope_angle, config.min_ceiling_angle);
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn jump_constants(&self) -> JumpConstants {
        self.jump
    }

    /// Snapshot of the state produced by the last step.
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Contacts hit while resolving the last step, in hit order.
    pub fn last_contacts(&self) -> &[SurfaceContact] {
        &self.contacts
    }

    pub fn motor_mut(&mut self) -> &mut M {
        &mut self.motor
    }

    /// Current capsule height (standing or crouched).
    pub fn height(&self) -> f32 {
        self.config.body.height(self.state.crouching)
    }

    fn sweep<'q, Q: CollisionQuery + ?Sized>(&self, query: &'q Q) -> SweepContext<'q, Q> {
        SweepContext {
            query,
            capsule: self.config.body.cast_capsule(self.state.crouching),
            mask: self.config.collision_mask,
            surfaces: self.surfaces,
            max_bounces: self.config.max_bounces,
            max_step_height: self.config.max_step_height,
            min_step_depth: self.config.min_step_depth,
        }
    }

    /// Advance the body by one step of `dt` seconds and return its velocity (m/s).
    ///
    /// The displacement is committed through `pose`. A non-positive `dt` leaves
    /// everything untouched.
    pub fn step<Q, P>(&mut self, world: &Q, pose: &mut P, input: StepInput, dt: f32) -> Vec3
    where
        Q: CollisionQuery + ?Sized,
        P: BodyPose + ?Sized,
    {
        if dt <= 0.0 {
            return Vec3::zeros();
        }
        let start = pose.position();
        let mask = self.config.collision_mask;
        self.contacts.clear();
        self.state.clear_contacts();

        // 0) Stance first; every probe below uses the resulting capsule.
        self.state.crouching = crouch::next_crouch_state(
            world,
            &self.config.body,
            mask,
            start,
            self.state.crouching,
            input.crouch,
        );
        self.state.sprinting = input.sprint && !self.state.crouching;
        let sweep = self.sweep(world);

        // 1) Ground and ceiling. A rising jump does not land on what it just left.
        let mut vertical = VerticalMotion::from_state(&self.state);
        let probe = ground::probe_ground(&sweep, start);
        let grounded = probe.grounded && !vertical.is_rising_jump();
        self.state.grounded = grounded;
        self.state.ground_normal = probe.ground.filter(|_| grounded).map(|g| g.normal);
        self.state.ground_point = probe.ground.filter(|_| grounded).map(|g| g.point);
        self.state.slope_angle = probe.slope_angle;
        self.state.on_slope = grounded && probe.on_slope;
        self.state.sliding = probe.sliding;
        self.state.landed_this_frame = grounded && !self.state.was_grounded;
        self.state.bumping_head = ground::probe_ceiling(&sweep, start, self.last_displacement);

        // 2) Motor velocity, aligned to the slope underfoot.
        let ground_velocity = self.motor.compute_velocity(
            &input,
            &MotorContext {
                ground_velocity: self.state.ground_velocity,
                grounded,
                landed_this_frame: self.state.landed_this_frame,
                crouching: self.state.crouching,
                sprinting: self.state.sprinting,
                max_speed: self.config.max_speed,
                dt,
            },
        );
        self.state.ground_velocity = ground_velocity;

        let mut desired = ground_velocity * dt;
        if let Some(normal) = self.state.ground_normal
            && self.state.on_slope
            && !self.state.bumping_head
        {
            desired = project_and_scale(desired, normal);
        }

        // 3) Horizontal collide-and-slide.
        let horizontal = resolver::resolve(
            &sweep,
            desired,
            start,
            Pass::Horizontal,
            self.state.ground_point,
        );
        self.state.climbing_step = horizontal.climbed_step;
        self.contacts.extend_from_slice(&horizontal.contacts);
        let mut displacement = horizontal.displacement;

        // 4) Vertical motion: jump, ground snap, gravity pass.
        if self.config.use_gravity {
            vertical.update_phase(grounded, dt, self.config.coyote_time);
            let jumped = vertical.try_jump(input.jump, &self.jump);

            let mut supported = grounded;
            if (grounded || self.state.was_grounded) && !jumped && !vertical.is_rising_jump() {
                let snapped = ground::snap_to_ground(&sweep, start + displacement);
                if let Some((drop, contact)) = snapped {
                    displacement += drop;
                    supported = true;
                    vertical.reground();
                    self.state.grounded = true;
                    self.state.sliding = false;
                    self.state.ground_normal = Some(contact.normal);
                    self.state.ground_point = Some(contact.point);
                    self.state.slope_angle = surface_angle_deg(contact.normal);
                    self.state.on_slope = self.state.slope_angle > ON_SLOPE_EPS_DEG;
                }
            }

            let dy = vertical.integrate(
                supported,
                self.state.bumping_head,
                self.jump.gravity,
                self.config.max_fall_speed,
                dt,
            );
            let gravity = resolver::resolve(
                &sweep,
                up() * dy,
                start + displacement,
                Pass::Gravity,
                None,
            );
            self.contacts.extend_from_slice(&gravity.contacts);
            displacement += gravity.displacement;
        } else {
            vertical = VerticalMotion {
                phase: if grounded {
                    VerticalPhase::Grounded
                } else {
                    VerticalPhase::Airborne
                },
                ..VerticalMotion::default()
            };
        }
        vertical.write_to(&mut self.state);

        // 5) Commit.
        pose.apply_displacement(displacement);
        self.last_displacement = displacement;
        self.state.was_grounded = self.state.grounded;
        log::trace!(
            "step dt={dt:.4} moved {displacement:?} grounded={} phase={:?}",
            self.state.grounded,
            self.state.phase
        );

        displacement / dt
    }
}
