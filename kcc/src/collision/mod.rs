/*!
Collision root module.

This module holds the collision query port used by the kinematic controller and
a static-world implementation of it built on parry (via rapier3d). The code is
split for clarity:

- types:        shared data types (Transform, StaticShape, SurfaceContact, etc.)
- settings:     controller defaults and tolerance constants
- layers:       collision layer masks
- query:        the `CollisionQuery` port and the body's cast capsule
- broad:        broad-phase helpers (BVH over static AABBs, swept AABBs)
- narrow_phase: thin wrappers over parry shape casts
- world:        `StaticWorld`, the port implementation over immutable statics
*/

pub mod broad;
pub mod layers;
pub mod narrow_phase;
pub mod query;
pub mod settings;
pub mod types;
pub mod world;

// Re-export commonly used types and functions.
pub use layers::{CollisionLayer, LayerMask, LayerSet};
pub use query::{CastCapsule, CollisionQuery};
pub use types::{
    CastRequest, Point3, Quat, StaticBody, StaticShape, SurfaceContact, Transform, Vec3,
};
pub use world::StaticWorld;

/// Convenience: build a `StaticShape::Plane` from a world-space plane pose:
/// - normal = rotation * +Y
/// - dist = dot(normal, translation) + optional offset
#[inline]
pub fn plane_from_pose(rotation: Quat, translation: Vec3, offset_along_normal: f32) -> StaticShape {
    let normal = rotation * Vec3::new(0.0, 1.0, 0.0);
    let dist = normal.dot(&translation) + offset_along_normal;
    StaticShape::Plane { normal, dist }
}

/// Convenience: build a `StaticShape::Cuboid` with given half extents and pose.
#[inline]
pub fn cuboid_from_pose(half_extents: Vec3, translation: Vec3, rotation: Quat) -> StaticShape {
    StaticShape::Cuboid {
        half_extents,
        transform: Transform {
            translation,
            rotation,
        },
    }
}
