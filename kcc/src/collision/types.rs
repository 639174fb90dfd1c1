/*!
Core collision types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms. It defines the data types
exchanged between:
- broad (static world acceleration structure and candidate queries)
- narrow_phase (parry shape casts against a single static shape)
- world (the `CollisionQuery` implementation over static geometry)
- the controller (resolver, step climbing, ground and ceiling probes)

Conventions
- Units are meters, +Y is up.
- A body position is the capsule *base* point (its feet), not its center.
*/

use nalgebra as na;

use super::layers::LayerMask;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// World up axis.
#[inline]
pub fn up() -> Vec3 {
    Vec3::y()
}

/// A rigid transform (isometry) in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::identity())
    }

    /// Convert to nalgebra `Isometry3` for use with parry narrow-phase queries.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(na::Translation3::from(self.translation), self.rotation)
    }
}

/// Static collision shapes supported by the world.
///
/// - Plane: infinite plane in world-space represented by its normal and offset (dist)
///          satisfying: normal ⋅ x = dist. Everything below the plane is solid.
/// - Cuboid: oriented box with half-extents in local space, placed by `transform`.
#[derive(Clone, Copy, Debug)]
pub enum StaticShape {
    Plane {
        /// World-space unit normal of the plane.
        normal: Vec3,
        /// Plane offset along the normal, i.e., normal ⋅ x = dist.
        dist: f32,
    },
    Cuboid {
        /// Local-space half-extents (hx, hy, hz).
        half_extents: Vec3,
        /// World-space pose of the cuboid.
        transform: Transform,
    },
    Sphere {
        /// Radius of the sphere in meters.
        radius: f32,
        /// World-space pose (translation used; rotation ignored).
        transform: Transform,
    },
    Capsule {
        /// Radius of the spherical caps and cylinder.
        radius: f32,
        /// Half of the cylinder length along the local +Y axis.
        half_height: f32,
        /// World-space pose of the capsule.
        transform: Transform,
    },
}

/// A static shape plus the collision layers it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct StaticBody {
    pub shape: StaticShape,
    pub layers: LayerMask,
}

impl StaticBody {
    /// A body on every layer; any non-empty query mask sees it.
    #[inline]
    pub fn solid(shape: StaticShape) -> Self {
        Self {
            shape,
            layers: LayerMask::ALL,
        }
    }

    #[inline]
    pub fn on_layers(shape: StaticShape, layers: LayerMask) -> Self {
        Self { shape, layers }
    }
}

/// A cast issued by the controller against the query port.
#[derive(Clone, Copy, Debug)]
pub struct CastRequest {
    /// Capsule base point the cast starts from.
    pub origin: Vec3,
    /// Unit direction of travel.
    pub direction: Vec3,
    /// Maximum travel distance along `direction`.
    pub max_distance: f32,
    /// Layers the cast may hit.
    pub mask: LayerMask,
}

/// A single contact produced by a cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceContact {
    /// World-space point of first touch on the static surface.
    pub point: Vec3,
    /// World-space unit surface normal, facing against the cast direction.
    pub normal: Vec3,
    /// Distance travelled along the cast direction before first touch.
    pub distance: f32,
}
