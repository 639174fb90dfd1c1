use crate::{
    collision::{CollisionQuery, SurfaceContact, Vec3, types::up},
    utils::{horizontal, is_negligible, normalize_or_zero},
};

use super::sweep::SweepContext;

/// Extra displacement that lifts the body onto a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepAdjustment {
    /// Vertical lift, in meters.
    pub height: f32,
    /// Horizontal push of one skin width toward the step edge.
    pub nudge: Vec3,
}

impl StepAdjustment {
    #[inline]
    pub fn displacement(&self) -> Vec3 {
        up() * self.height + self.nudge
    }
}

/// Decide whether a wall contact is a climbable step.
///
/// `position` is the body after snapping up to the wall, `ground_y` the height of
/// the current ground point, `leftover` the displacement still to apply. The step
/// is climbable when the lift lies strictly between the skin width and the max step
/// height, and the body raised by that lift can move along `leftover` either freely,
/// further than `min_step_depth`, or onto walkable ground.
pub fn try_climb<Q: CollisionQuery + ?Sized>(
    sweep: &SweepContext<'_, Q>,
    position: Vec3,
    wall: &SurfaceContact,
    ground_y: f32,
    leftover: Vec3,
) -> Option<StepAdjustment> {
    let skin = sweep.skin();
    if is_negligible(leftover) {
        return None;
    }

    let height = wall.point.y - ground_y + 2.0 * skin;
    if height <= skin || height >= sweep.max_step_height {
        return None;
    }

    let distance = leftover.norm();
    let raised = position + up() * height;
    let clear = match sweep.cast(raised, leftover / distance, distance) {
        None => true,
        Some(hit) => {
            hit.distance - skin > sweep.min_step_depth || sweep.surfaces.is_walkable(hit.normal)
        }
    };
    if !clear {
        log::trace!("step of {height:.3} m rejected: no room on top");
        return None;
    }

    log::debug!("climbing step of {height:.3} m");
    Some(StepAdjustment {
        height,
        nudge: normalize_or_zero(horizontal(wall.point - position)) * skin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CastCapsule, LayerMask};
    use crate::controller::{
        surface::SurfaceClassifier,
        testing::{ScriptedQuery, contact},
    };

    const SKIN: f32 = 0.015;

    fn sweep(query: &ScriptedQuery) -> SweepContext<'_, ScriptedQuery> {
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

    fn wall_at(height: f32) -> SurfaceContact {
        contact(Vec3::new(0.5, height, 0.0), -Vec3::x(), 0.2)
    }

    #[test]
    fn low_step_with_free_space_is_climbed() {
        let query = ScriptedQuery::default();
        let step = try_climb(
            &sweep(&query),
            Vec3::zeros(),
            &wall_at(0.1),
            0.0,
            Vec3::new(0.3, 0.0, 0.0),
        )
        .unwrap();

        assert!((step.height - 0.13).abs() < 1.0e-6);
        assert!((step.nudge - Vec3::new(SKIN, 0.0, 0.0)).norm() < 1.0e-6);
        assert_eq!(query.capsule_casts.get(), 1);
    }

    #[test]
    fn offsets_outside_the_open_range_are_rejected() {
        let query = ScriptedQuery::default();
        let (origin, leftover) = (Vec3::zeros(), Vec3::new(0.3, 0.0, 0.0));

        // Ground noise: lift no larger than the skin.
        assert!(try_climb(&sweep(&query), origin, &wall_at(-0.02), 0.0, leftover).is_none());
        // A real wall.
        assert!(try_climb(&sweep(&query), origin, &wall_at(0.5), 0.0, leftover).is_none());
        // Neither case spends a raised cast.
        assert_eq!(query.capsule_casts.get(), 0);
    }

    #[test]
    fn shallow_ledge_is_not_a_step() {
        // Raised body runs into another wall almost immediately.
        let query = ScriptedQuery::always(contact(Vec3::new(0.6, 0.4, 0.0), -Vec3::x(), 0.05));
        let (origin, leftover) = (Vec3::zeros(), Vec3::new(0.3, 0.0, 0.0));

        assert!(try_climb(&sweep(&query), origin, &wall_at(0.1), 0.0, leftover).is_none());
    }

    #[test]
    fn deep_or_walkable_landing_is_accepted() {
        let (origin, leftover) = (Vec3::zeros(), Vec3::new(0.3, 0.0, 0.0));

        let deep = ScriptedQuery::always(contact(Vec3::new(1.0, 0.4, 0.0), -Vec3::x(), 0.2));
        assert!(try_climb(&sweep(&deep), origin, &wall_at(0.1), 0.0, leftover).is_some());

        let ramp_normal = Vec3::new(-0.3, 1.0, 0.0);
        let ramp = ScriptedQuery::always(contact(Vec3::new(0.6, 0.2, 0.0), ramp_normal, 0.01));
        assert!(try_climb(&sweep(&ramp), origin, &wall_at(0.1), 0.0, leftover).is_some());
    }
}
