use crate::collision::{
    CastCapsule, CastRequest, CollisionQuery, LayerMask, SurfaceContact, Vec3, types::up,
};

use super::surface::SurfaceClassifier;

/// Everything a single body needs to issue casts during one step.
pub struct SweepContext<'a, Q: CollisionQuery + ?Sized> {
    pub query: &'a Q,
    pub capsule: CastCapsule,
    pub mask: LayerMask,
    pub surfaces: SurfaceClassifier,
    pub max_bounces: u32,
    pub max_step_height: f32,
    pub min_step_depth: f32,
}

impl<Q: CollisionQuery + ?Sized> SweepContext<'_, Q> {
    #[inline]
    pub fn skin(&self) -> f32 {
        self.capsule.skin
    }

    /// Capsule cast for the body standing at `origin`.
    pub fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SurfaceContact> {
        self.capsule.cast(
            self.query,
            &CastRequest {
                origin,
                direction,
                max_distance,
                mask: self.mask,
            },
        )
    }

    /// All contacts of the bottom sphere swept straight down, nearest first.
    pub fn probe_below(&self, position: Vec3, distance: f32) -> Vec<SurfaceContact> {
        let mut hits = self.query.sphere_cast_all(
            self.capsule.base_center(position),
            self.capsule.cast_radius(),
            -up(),
            distance,
            self.mask,
        );
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// All contacts of the top sphere swept straight up, nearest first.
    pub fn probe_above(&self, position: Vec3, distance: f32) -> Vec<SurfaceContact> {
        let mut hits = self.query.sphere_cast_all(
            self.capsule.tip_center(position),
            self.capsule.cast_radius(),
            up(),
            distance,
            self.mask,
        );
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
