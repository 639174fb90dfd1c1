use super::{
    layers::LayerMask,
    types::{CastRequest, SurfaceContact, Vec3},
};

/// Read-only collision queries the motion core issues against scene geometry.
///
/// Implementations must be side-effect free and synchronous. An implementation that
/// cannot answer (missing geometry, empty mask) reports "no contact".
pub trait CollisionQuery {
    /// Sweep a capsule whose sphere centers are `base` and `tip` along the unit `direction`
    /// and return the nearest contact within `max_distance`.
    fn capsule_cast(
        &self,
        base: Vec3,
        tip: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceContact>;

    /// Sweep a sphere along the unit `direction` and return every contact within
    /// `max_distance`. Order is unspecified.
    fn sphere_cast_all(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<SurfaceContact>;
}

impl<Q: CollisionQuery + ?Sized> CollisionQuery for &Q {
    fn capsule_cast(
        &self,
        base: Vec3,
        tip: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceContact> {
        (**self).capsule_cast(base, tip, radius, direction, max_distance, mask)
    }

    fn sphere_cast_all(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<SurfaceContact> {
        (**self).sphere_cast_all(origin, radius, direction, max_distance, mask)
    }
}

/// The capsule actually swept for a body standing at some base position.
///
/// Sphere centers sit `radius` above the base and `radius` below the top; the swept
/// radius is shrunk by the skin so contacts are reported a skin-width early.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastCapsule {
    pub radius: f32,
    pub height: f32,
    pub skin: f32,
}

impl CastCapsule {
    #[inline]
    pub fn cast_radius(&self) -> f32 {
        (self.radius - self.skin).max(0.0)
    }

    #[inline]
    pub fn base_center(&self, position: Vec3) -> Vec3 {
        position + Vec3::new(0.0, self.radius, 0.0)
    }

    #[inline]
    pub fn tip_center(&self, position: Vec3) -> Vec3 {
        position + Vec3::new(0.0, self.height - self.radius, 0.0)
    }

    /// Capsule cast for a body at `request.origin`.
    pub fn cast<Q: CollisionQuery + ?Sized>(
        &self,
        query: &Q,
        request: &CastRequest,
    ) -> Option<SurfaceContact> {
        if request.max_distance <= 0.0 {
            return None;
        }
        let hit = query.capsule_cast(
            self.base_center(request.origin),
            self.tip_center(request.origin),
            self.cast_radius(),
            request.direction,
            request.max_distance,
            request.mask,
        );
        if let Some(contact) = &hit {
            log::trace!(
                "capsule cast from {:?} dir {:?} hit {:?} at {:.4}",
                request.origin,
                request.direction,
                contact.normal,
                contact.distance
            );
        }
        hit
    }
}
