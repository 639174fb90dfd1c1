//! Static collision world backing the `CollisionQuery` port.
//!
//! - Immutable: statics are fixed at construction; the broad phase is built once.
//! - Deterministic: candidates are tested in index order and ties keep the earliest shape.

use nalgebra as na;
use rapier3d::parry::shape::{self as pshape, Shape};

use super::{
    broad::{self, WorldAccel},
    layers::LayerMask,
    narrow_phase,
    query::CollisionQuery,
    types::{Iso, StaticBody, SurfaceContact, Transform, Vec3},
};

pub struct StaticWorld {
    statics: Vec<StaticBody>,
    accel: WorldAccel,
}

impl StaticWorld {
    pub fn new(statics: Vec<StaticBody>) -> Self {
        let accel = broad::build_world_accel(&statics);
        log::debug!(
            "static world built: {} planes, {} finite shapes",
            accel.plane_indices.len(),
            accel.len()
        );
        Self { statics, accel }
    }

    pub fn statics(&self) -> &[StaticBody] {
        &self.statics
    }

    /// Visit every contact of `moving` swept along `dir`: planes first, then broad-phase
    /// candidates in index order.
    fn for_each_contact(
        &self,
        iso: &Iso,
        moving: &dyn Shape,
        dir: Vec3,
        max_distance: f32,
        mask: LayerMask,
        mut visit: impl FnMut(SurfaceContact),
    ) {
        if max_distance <= 0.0 || mask.is_empty() {
            return;
        }

        let swept = broad::swept_aabb(moving, iso, dir * max_distance, 0.01);
        let mut candidates = broad::query_candidates(&self.accel, &swept);
        candidates.sort_unstable();

        for &idx in self.accel.plane_indices.iter().chain(candidates.iter()) {
            let body = &self.statics[idx];
            if !body.layers.intersects(&mask) {
                continue;
            }
            if let Some(contact) =
                narrow_phase::cast_against_static(iso, moving, dir, max_distance, &body.shape)
            {
                visit(contact);
            }
        }
    }
}

impl CollisionQuery for StaticWorld {
    fn capsule_cast(
        &self,
        base: Vec3,
        tip: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceContact> {
        // Capsule segment expressed relative to its base sphere center.
        let capsule =
            pshape::Capsule::new(na::Point3::origin(), na::Point3::from(tip - base), radius);
        let iso = Transform::from_translation(base).iso();

        let mut best: Option<SurfaceContact> = None;
        self.for_each_contact(&iso, &capsule, direction, max_distance, mask, |hit| {
            if best.is_none_or(|b| hit.distance < b.distance) {
                best = Some(hit);
            }
        });
        best
    }

    fn sphere_cast_all(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<SurfaceContact> {
        let ball = pshape::Ball::new(radius);
        let iso = Transform::from_translation(origin).iso();

        let mut hits = Vec::new();
        self.for_each_contact(&iso, &ball, direction, max_distance, mask, |hit| hits.push(hit));
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{StaticShape, cuboid_from_pose, plane_from_pose, types::Quat};

    crate::define_collision_layers!(Layer, u32, { World, Glass });

    fn ground() -> StaticShape {
        plane_from_pose(Quat::identity(), Vec3::zeros(), 0.0)
    }

    #[test]
    fn capsule_cast_returns_nearest_of_several_contacts() {
        let world = StaticWorld::new(vec![
            StaticBody::solid(cuboid_from_pose(
                Vec3::new(0.5, 1.0, 1.0),
                Vec3::new(5.0, 1.0, 0.0),
                Quat::identity(),
            )),
            StaticBody::solid(cuboid_from_pose(
                Vec3::new(0.5, 1.0, 1.0),
                Vec3::new(3.0, 1.0, 0.0),
                Quat::identity(),
            )),
        ]);

        let hit = world
            .capsule_cast(
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(0.0, 1.5, 0.0),
                0.5,
                Vec3::x(),
                10.0,
                LayerMask::ALL,
            )
            .unwrap();

        // Nearer box face at x = 2.5.
        assert!((hit.distance - 2.0).abs() < 1.0e-3);
    }

    #[test]
    fn mask_filters_out_bodies_on_other_layers() {
        let glass = LayerMask::from_layers(&[Layer::Glass]);
        let world_only = LayerMask::from_layers(&[Layer::World]);
        let world = StaticWorld::new(vec![StaticBody::on_layers(ground(), glass)]);

        let down = -Vec3::y();
        let origin = Vec3::new(0.0, 1.0, 0.0);
        assert!(world.sphere_cast_all(origin, 0.5, down, 2.0, world_only).is_empty());
        assert_eq!(world.sphere_cast_all(origin, 0.5, down, 2.0, glass).len(), 1);
        assert!(world.sphere_cast_all(origin, 0.5, down, 2.0, LayerMask::NONE).is_empty());
    }

    #[test]
    fn sphere_cast_all_is_sorted_by_distance() {
        let world = StaticWorld::new(vec![
            StaticBody::solid(ground()),
            StaticBody::solid(cuboid_from_pose(
                Vec3::new(1.0, 0.25, 1.0),
                Vec3::new(0.0, 0.25, 0.0),
                Quat::identity(),
            )),
        ]);

        let origin = Vec3::new(0.0, 2.0, 0.0);
        let hits = world.sphere_cast_all(origin, 0.5, -Vec3::y(), 5.0, LayerMask::ALL);

        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance <= hits[1].distance);
        assert!((hits[0].distance - 1.0).abs() < 1.0e-3);
        assert!((hits[1].distance - 1.5).abs() < 1.0e-3);
    }
}
