use rapier3d::parry::{
    bounding_volume::{Aabb, BoundingVolume},
    partitioning::{Bvh, BvhBuildStrategy},
    shape::{self as pshape, Shape},
};

use super::types::{Iso, StaticBody, StaticShape, Transform, Vec3};

/// Acceleration structure for broad-phase queries over immutable world statics.
///
/// Notes:
/// - Finite shapes (Cuboid, Sphere, Capsule) are stored as world-space AABBs in a BVH.
///   Planes are handled separately because they are infinite.
/// - `non_plane_indices` maps each BVH leaf back to its index in the original `statics` slice.
/// - `plane_indices` stores indices of planes in the original `statics` slice.
pub struct WorldAccel {
    /// BVH over finite static shapes (AABBs).
    pub bvh: Bvh,
    /// Indices into the original `statics` slice for the BVH leaves.
    pub non_plane_indices: Vec<usize>,
    /// Indices into the original `statics` slice for planes.
    pub plane_indices: Vec<usize>,
}

impl WorldAccel {
    /// Return true if this accelerator has no non-plane entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.non_plane_indices.is_empty()
    }

    /// Number of non-plane entries (AABBs) in this accelerator.
    #[inline]
    pub fn len(&self) -> usize {
        self.non_plane_indices.len()
    }
}

/// Build the broad-phase accelerator over immutable world statics.
pub fn build_world_accel(statics: &[StaticBody]) -> WorldAccel {
    let mut aabbs: Vec<Aabb> = Vec::new();
    let mut non_plane_indices: Vec<usize> = Vec::new();
    let mut plane_indices: Vec<usize> = Vec::new();

    for (i, body) in statics.iter().enumerate() {
        match static_aabb(&body.shape) {
            Some(aabb) => {
                aabbs.push(aabb);
                non_plane_indices.push(i);
            }
            None => plane_indices.push(i),
        }
    }

    WorldAccel {
        bvh: Bvh::from_leaves(BvhBuildStrategy::Binned, &aabbs),
        non_plane_indices,
        plane_indices,
    }
}

/// World-space AABB of a finite static shape; `None` for planes.
fn static_aabb(shape: &StaticShape) -> Option<Aabb> {
    match *shape {
        StaticShape::Plane { .. } => None,
        StaticShape::Cuboid {
            half_extents,
            transform,
        } => Some(pshape::Cuboid::new(half_extents).aabb(&transform.iso())),
        StaticShape::Sphere { radius, transform } => {
            // Rotation is irrelevant for a ball.
            let iso = Transform::from_translation(transform.translation).iso();
            Some(pshape::Ball::new(radius).aabb(&iso))
        }
        StaticShape::Capsule {
            radius,
            half_height,
            transform,
        } => Some(pshape::Capsule::new_y(half_height, radius).aabb(&transform.iso())),
    }
}

/// Compute a swept AABB for `shape` moving from `start` along `translation`.
///
/// The resulting AABB is loosened by `margin` to conservatively include near misses.
pub fn swept_aabb(shape: &dyn Shape, start: &Iso, translation: Vec3, margin: f32) -> Aabb {
    let mut end = *start;
    end.translation.vector += translation;

    let swept = shape.compute_aabb(start).merged(&shape.compute_aabb(&end));
    if margin > 0.0 {
        swept.loosened(margin)
    } else {
        swept
    }
}

/// Query candidate static indices whose AABB intersects `swept`.
///
/// Returns indices referencing the original `statics` slice (not the BVH leaf array).
pub fn query_candidates(accel: &WorldAccel, swept: &Aabb) -> Vec<usize> {
    if accel.is_empty() {
        return Vec::new();
    }

    accel
        .bvh
        .intersect_aabb(swept)
        .map(|leaf_idx| accel.non_plane_indices[leaf_idx as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{cuboid_from_pose, plane_from_pose, types::Quat};

    fn statics() -> Vec<StaticBody> {
        vec![
            StaticBody::solid(plane_from_pose(Quat::identity(), Vec3::zeros(), 0.0)),
            StaticBody::solid(cuboid_from_pose(
                Vec3::new(0.5, 0.5, 0.5),
                Vec3::new(10.0, 0.5, 0.0),
                Quat::identity(),
            )),
            StaticBody::solid(cuboid_from_pose(
                Vec3::new(0.5, 0.5, 0.5),
                Vec3::new(-10.0, 0.5, 0.0),
                Quat::identity(),
            )),
        ]
    }

    #[test]
    fn planes_are_kept_out_of_the_bvh() {
        let accel = build_world_accel(&statics());
        assert_eq!(accel.plane_indices, vec![0]);
        assert_eq!(accel.len(), 2);
    }

    #[test]
    fn swept_query_returns_only_nearby_shapes() {
        let statics = statics();
        let accel = build_world_accel(&statics);

        let ball = pshape::Ball::new(0.5);
        let start = Transform::from_translation(Vec3::new(8.0, 0.5, 0.0)).iso();
        let swept = swept_aabb(&ball, &start, Vec3::new(2.0, 0.0, 0.0), 0.01);

        let candidates = query_candidates(&accel, &swept);
        assert_eq!(candidates, vec![1]);
    }
}
