use crate::collision::{
    Vec3,
    settings::{DIST_EPS, MIN_MOVE_SQ},
    types::up,
};

/// Normalize `v`, or return zero when it is too short to have a direction.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let len_sq = v.norm_squared();
    if len_sq > DIST_EPS * DIST_EPS {
        v / len_sq.sqrt()
    } else {
        Vec3::zeros()
    }
}

/// Remove the component of `v` along the plane normal `n`.
#[inline]
pub fn project_on_plane(v: Vec3, n: Vec3) -> Vec3 {
    let n = normalize_or_zero(n);
    v - n * v.dot(&n)
}

/// Project `v` onto the plane with normal `n` and restore its original length.
///
/// Sliding along a slope therefore keeps full speed instead of `|v| * cos(angle)`.
#[inline]
pub fn project_and_scale(v: Vec3, n: Vec3) -> Vec3 {
    normalize_or_zero(project_on_plane(v, n)) * v.norm()
}

/// Drop the vertical component.
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Angle between two vectors in degrees, in [0, 180]. Zero-length input yields 0.
#[inline]
pub fn angle_deg(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.norm_squared() * b.norm_squared()).sqrt();
    if denom <= DIST_EPS * DIST_EPS {
        return 0.0;
    }
    (a.dot(&b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle of a surface normal from world up, in degrees.
#[inline]
pub fn surface_angle_deg(normal: Vec3) -> f32 {
    angle_deg(up(), normal)
}

/// True if a displacement is too small to be worth a query.
#[inline]
pub fn is_negligible(v: Vec3) -> bool {
    v.norm_squared() <= MIN_MOVE_SQ
}
