pub mod collision;
pub mod controller;
pub mod utils;

pub use collision::{
    CollisionLayer, CollisionQuery, LayerMask, StaticBody, StaticShape, StaticWorld,
    SurfaceContact, Transform, Vec3,
};
pub use controller::{
    AcceleratedMotor, BodyPose, BodyShape, ConfigError, ControllerConfig, InstantMotor,
    KinematicController, MotionState, Motor, MotorContext, StepInput, SurfaceKind, VerticalPhase,
};
