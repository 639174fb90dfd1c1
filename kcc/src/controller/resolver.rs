//! Collide-and-slide.
//!
//! A displacement is swept through the world in bounded iterations. Each contact
//! consumes the travel up to the skin buffer, and the rest is redirected along the
//! surface according to what the surface is:
//!
//! - walkable ground keeps the full leftover length along the slope (or ends a
//!   gravity pass)
//! - walls redirect the leftover along the wall, scaled down the more head-on the
//!   original motion was, unless a step can be climbed
//! - ceilings behave like walls when moving sideways and end a gravity pass
//!
//! Iteration stops once the leftover is negligible or turns away from the original
//! direction by more than 90 degrees, or when the bounce budget runs out.

use crate::{
    collision::{CollisionQuery, SurfaceContact, Vec3},
    utils::{angle_deg, horizontal, is_negligible, normalize_or_zero, project_and_scale},
};

use super::{step_climb, surface::SurfaceKind, sweep::SweepContext};

/// Which resolution pass is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    /// Motor-driven movement; may climb steps.
    Horizontal,
    /// Vertical displacement from gravity or jumping.
    Gravity,
}

/// Outcome of one resolution pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    pub displacement: Vec3,
    pub climbed_step: bool,
    /// Contacts in the order they were hit.
    pub contacts: Vec<SurfaceContact>,
    /// Capsule casts issued by the slide loop (raised step casts excluded).
    pub casts: u32,
    /// The bounce budget ran out and the remainder was dropped.
    pub exhausted: bool,
}

/// True when nothing meaningful is left to move.
#[inline]
fn settled(remaining: Vec3, reference: Vec3) -> bool {
    is_negligible(remaining) || angle_deg(remaining, reference) > 90.0
}

/// Redirect `leftover` along a wall.
///
/// The scale is `1 - (s - 1)^2` with `s = 1 - dot(wall_h, -reference_h)`: zero when
/// running straight into the wall, one when moving parallel to it.
pub fn slide_along_wall(leftover: Vec3, normal: Vec3, reference: Vec3, flat: bool) -> Vec3 {
    let wall_h = normalize_or_zero(horizontal(normal));
    let reference_h = normalize_or_zero(horizontal(reference));
    let s = 1.0 - wall_h.dot(&-reference_h);
    let scale = 1.0 - (s - 1.0) * (s - 1.0);

    let slid = if flat {
        // Grounded: a steep slope acts like an upright wall on flat ground.
        project_and_scale(horizontal(leftover), wall_h)
    } else {
        project_and_scale(leftover, normal)
    };
    slid * scale
}

/// Sweep `desired` from `position` and return the collision-safe displacement.
///
/// `ground` is the current ground point when the body is grounded; it enables the
/// grounded wall rules and step climbing on horizontal passes.
pub fn resolve<Q: CollisionQuery + ?Sized>(
    sweep: &SweepContext<'_, Q>,
    desired: Vec3,
    position: Vec3,
    pass: Pass,
    ground: Option<Vec3>,
) -> Resolution {
    let skin = sweep.skin();
    let grounded = ground.is_some();
    let mut ground_y = ground.map(|p| p.y);
    let mut out = Resolution::default();
    let mut remaining = desired;

    while !settled(remaining, desired) {
        if out.casts >= sweep.max_bounces {
            out.exhausted = true;
            log::warn!(
                "collide-and-slide ran out of bounces ({}) on {:?} pass; dropping {:?}",
                sweep.max_bounces,
                pass,
                remaining
            );
            break;
        }
        out.casts += 1;

        let origin = position + out.displacement;
        let distance = remaining.norm();
        let dir = remaining / distance;

        let Some(hit) = sweep.cast(origin, dir, distance + skin) else {
            out.displacement += remaining;
            break;
        };
        out.contacts.push(hit);

        let travel = hit.distance - skin;
        let mut snap = if travel > skin { dir * travel } else { Vec3::zeros() };
        let leftover = remaining - snap;

        match (sweep.surfaces.classify(hit.normal), pass) {
            (SurfaceKind::Walkable | SurfaceKind::Ceiling, Pass::Gravity) => {
                out.displacement += snap;
                break;
            }
            (SurfaceKind::Walkable, Pass::Horizontal) => {
                remaining = project_and_scale(leftover, hit.normal);
            }
            (SurfaceKind::Wall, _) | (SurfaceKind::Ceiling, Pass::Horizontal) => {
                let step = match (pass, ground_y) {
                    (Pass::Horizontal, Some(gy)) => {
                        step_climb::try_climb(sweep, origin + snap, &hit, gy, leftover)
                    }
                    _ => None,
                };
                match step {
                    Some(step) => {
                        snap += step.displacement();
                        ground_y = ground_y.map(|gy| gy + step.height);
                        out.climbed_step = true;
                        remaining = leftover;
                    }
                    None => {
                        let flat = grounded && pass == Pass::Horizontal;
                        remaining = slide_along_wall(leftover, hit.normal, desired, flat);
                    }
                }
            }
        }

        out.displacement += snap;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{
        CastCapsule, LayerMask, Quat, StaticBody, StaticWorld, cuboid_from_pose, plane_from_pose,
    };
    use crate::controller::{
        surface::SurfaceClassifier,
        testing::{ScriptedQuery, contact},
    };

    const SKIN: f32 = 0.015;
    const EPS: f32 = 1.0e-5;

    fn sweep<Q: CollisionQuery + ?Sized>(query: &Q) -> SweepContext<'_, Q> {
        SweepContext {
            query,
            capsule: CastCapsule {
                radius: 0.5,
                height: 2.0,
                skin: SKIN,
            },
            mask: LayerMask::ALL,
            surfaces: SurfaceClassifier::new(55.0, 165.0),
            max_bounces: 5,
            max_step_height: 0.2,
            min_step_depth: 0.1,
        }
    }

    fn on_floor() -> Option<Vec3> {
        Some(Vec3::zeros())
    }

    fn flat_world() -> StaticWorld {
        StaticWorld::new(vec![
            StaticBody::solid(plane_from_pose(Quat::identity(), Vec3::zeros(), 0.0)),
            // Wall whose near face is at x = 3.
            StaticBody::solid(cuboid_from_pose(
                Vec3::new(0.5, 2.0, 5.0),
                Vec3::new(3.5, 2.0, 0.0),
                Quat::identity(),
            )),
        ])
    }

    #[test]
    fn free_motion_on_flat_ground_is_unchanged() {
        let world = flat_world();
        let desired = Vec3::new(0.4, 0.0, 0.3);

        let res = resolve(&sweep(&world), desired, Vec3::zeros(), Pass::Horizontal, on_floor());

        assert!((res.displacement - desired).norm() < EPS);
        assert!(res.contacts.is_empty());
        assert_eq!(res.casts, 1);
    }

    #[test]
    fn body_stops_a_skin_width_before_a_wall() {
        let world = flat_world();
        let s = sweep(&world);

        let desired = Vec3::new(5.0, 0.0, 0.0);
        let res = resolve(&s, desired, Vec3::zeros(), Pass::Horizontal, on_floor());
        let end = res.displacement;

        assert!(end.x < 3.0);
        let gap = s.cast(end, Vec3::x(), 1.0).unwrap();
        assert!(gap.distance >= SKIN - 1.0e-3, "gap {}", gap.distance);
    }

    #[test]
    fn head_on_wall_leaves_no_slide() {
        let wall = contact(Vec3::new(1.0, 1.0, 0.0), -Vec3::x(), 0.5 + SKIN);
        let query = ScriptedQuery::with_script([Some(wall)]);

        let res = resolve(&sweep(&query), Vec3::x(), Vec3::zeros(), Pass::Horizontal, None);

        assert!((res.displacement - Vec3::new(0.5, 0.0, 0.0)).norm() < EPS);
        assert_eq!(query.capsule_casts.get(), 1);
    }

    #[test]
    fn glancing_wall_slides_along_it() {
        let normal = Vec3::new(-1.0, 0.0, 1.0).normalize();
        let v = slide_along_wall(Vec3::new(1.0, 0.0, 0.0), normal, Vec3::new(1.0, 0.0, 0.0), true);

        // 45 degrees: s = 1 - cos(45), scale = 1 - cos(45)^2 = 0.5.
        assert!(v.dot(&normal).abs() < EPS);
        assert!((v.norm() - 0.5).abs() < 1.0e-4);
        assert!(v.z > 0.0);
    }

    #[test]
    fn slope_keeps_full_speed() {
        let r = 25.0f32.to_radians();
        let slope = Vec3::new(-r.sin(), r.cos(), 0.0);
        let query = ScriptedQuery::with_script([Some(contact(Vec3::zeros(), slope, SKIN)), None]);
        let desired = Vec3::new(0.2, 0.0, 0.0);

        let res = resolve(&sweep(&query), desired, Vec3::zeros(), Pass::Horizontal, on_floor());

        assert!((res.displacement.norm() - 0.2).abs() < EPS);
        assert!(res.displacement.y > 0.0);
    }

    #[test]
    fn gravity_pass_stops_on_walkable_ground() {
        let world = flat_world();
        let res = resolve(
            &sweep(&world),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
            Pass::Gravity,
            None,
        );

        assert!((res.displacement.y + 0.5).abs() < 1.0e-3);
        assert_eq!(res.contacts.len(), 1);
    }

    #[test]
    fn bounces_are_bounded_in_a_corner() {
        // Every cast reports touching a wall parallel to the motion, so the slide never shrinks.
        let rail = contact(Vec3::new(0.0, 1.0, 0.5), -Vec3::z(), 0.0);
        let query = ScriptedQuery::always(rail);

        let res = resolve(&sweep(&query), Vec3::x(), Vec3::zeros(), Pass::Gravity, None);

        assert!(res.exhausted);
        assert_eq!(res.casts, 5);
        assert_eq!(query.capsule_casts.get(), 5);
    }

    #[test]
    fn motion_turning_back_is_dropped() {
        // The only slide direction points against the desired motion.
        assert!(settled(Vec3::new(-1.0, 0.0, 0.1), Vec3::new(1.0, 0.0, 0.0)));
        assert!(!settled(Vec3::new(0.1, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)));
        assert!(settled(Vec3::zeros(), Vec3::x()));
    }

    #[test]
    fn resolution_is_deterministic() {
        let world = flat_world();
        let desired = Vec3::new(4.0, -0.2, 1.5);
        let start = Vec3::new(0.0, 0.1, 0.0);
        let run = || resolve(&sweep(&world), desired, start, Pass::Horizontal, None);

        let (a, b) = (run(), run());
        assert_eq!(a, b);
    }
}
