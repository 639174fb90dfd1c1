use nalgebra as na;
use rapier3d::parry::{
    query::{self, ShapeCastHit, ShapeCastOptions},
    shape::{self as pshape, Shape},
};

use super::types::{Iso, StaticShape, SurfaceContact, Transform, Vec3};

/// Cast a moving shape against a single static shape and return the first contact (if any).
///
/// - `moving_iso`: the moving shape's starting isometry in world space.
/// - `moving`: the shape being swept (capsule for body casts, ball for probes).
/// - `dir`: unit world-space direction of travel.
/// - `max_distance`: furthest distance along `dir` to consider (meters).
/// - `shape`: the static shape to test against.
///
/// The returned contact carries the world-space point on the static surface, the static
/// surface normal (flipped if needed so it opposes the motion) and the travel distance.
pub fn cast_against_static(
    moving_iso: &Iso,
    moving: &dyn Shape,
    dir: Vec3,
    max_distance: f32,
    shape: &StaticShape,
) -> Option<SurfaceContact> {
    match *shape {
        StaticShape::Plane { normal, dist } => {
            // Plane `unit_n ⋅ x = dist` as a half-space placed at `unit_n * dist`.
            let unit_n = na::Unit::new_normalize(normal);
            let plane = pshape::HalfSpace::new(unit_n);
            let plane_iso = Transform::from_translation(unit_n.into_inner() * dist).iso();
            cast_pair(moving_iso, moving, dir, max_distance, &plane_iso, &plane)
        }
        StaticShape::Cuboid {
            half_extents,
            transform,
        } => {
            let cuboid = pshape::Cuboid::new(half_extents);
            cast_pair(moving_iso, moving, dir, max_distance, &transform.iso(), &cuboid)
        }
        StaticShape::Sphere { radius, transform } => {
            // Treat as a Ball; rotation is irrelevant.
            let ball = pshape::Ball::new(radius);
            let iso = Transform::from_translation(transform.translation).iso();
            cast_pair(moving_iso, moving, dir, max_distance, &iso, &ball)
        }
        StaticShape::Capsule {
            radius,
            half_height,
            transform,
        } => {
            let capsule = pshape::Capsule::new_y(half_height, radius);
            cast_pair(moving_iso, moving, dir, max_distance, &transform.iso(), &capsule)
        }
    }
}

fn cast_pair(
    moving_iso: &Iso,
    moving: &dyn Shape,
    dir: Vec3,
    max_distance: f32,
    static_iso: &Iso,
    fixed: &dyn Shape,
) -> Option<SurfaceContact> {
    // With a unit velocity the time of impact is the travel distance.
    let mut opts = ShapeCastOptions::with_max_time_of_impact(max_distance);
    opts.stop_at_penetration = true;

    match query::cast_shapes(
        moving_iso,
        &dir,
        moving,
        static_iso,
        &Vec3::zeros(),
        fixed,
        opts,
    ) {
        Ok(Some(hit)) => Some(contact_from_hit(&hit, dir, static_iso)),
        _ => None,
    }
}

/// Express a parry hit in world space using the static side of the pair.
fn contact_from_hit(hit: &ShapeCastHit, dir: Vec3, static_iso: &Iso) -> SurfaceContact {
    // The static shape does not move, so its witness is already at the impact pose.
    let point = static_iso * hit.witness2;
    let mut normal = static_iso.rotation * hit.normal2.into_inner();

    // Ensure the normal opposes the motion (penetrating starts report arbitrary normals).
    if normal.dot(&dir) > 0.0 {
        normal = -normal;
    }

    let len_sq = normal.norm_squared();
    if len_sq > 1.0e-12 {
        normal /= len_sq.sqrt();
    } else {
        normal = -dir;
    }

    SurfaceContact {
        point: point.coords,
        normal,
        distance: hit.time_of_impact.max(0.0),
    }
}
