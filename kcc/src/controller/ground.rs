//! Short probes around the body: ground below, ceiling above, and the ground snap.

use crate::{
    collision::{CollisionQuery, SurfaceContact, Vec3, settings::ON_SLOPE_EPS_DEG, types::up},
    utils::{angle_deg, is_negligible, surface_angle_deg},
};

use super::{surface::SurfaceKind, sweep::SweepContext};

/// Result of the downward probe at the start of a step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroundProbe {
    pub grounded: bool,
    /// Walkable contact, only when grounded.
    pub ground: Option<SurfaceContact>,
    pub slope_angle: f32,
    pub on_slope: bool,
    pub sliding: bool,
}

/// Sweep the bottom sphere down by two skin widths.
///
/// The nearest walkable contact grounds the body. With no walkable contact, the
/// nearest contact (if any) means the body rests on something too steep and slides.
pub fn probe_ground<Q: CollisionQuery + ?Sized>(
    sweep: &SweepContext<'_, Q>,
    position: Vec3,
) -> GroundProbe {
    let hits = sweep.probe_below(position, 2.0 * sweep.skin());

    if let Some(ground) = hits.iter().find(|h| sweep.surfaces.is_walkable(h.normal)) {
        let slope_angle = surface_angle_deg(ground.normal);
        return GroundProbe {
            grounded: true,
            ground: Some(*ground),
            slope_angle,
            on_slope: slope_angle > ON_SLOPE_EPS_DEG,
            sliding: false,
        };
    }

    match hits.first() {
        Some(steep) => GroundProbe {
            sliding: true,
            slope_angle: surface_angle_deg(steep.normal),
            ..GroundProbe::default()
        },
        None => GroundProbe::default(),
    }
}

/// Sweep the top sphere up by two skin widths; true when it touches a ceiling.
///
/// A contact also counts when it faces against `motion` (the previous step's
/// displacement) by at least the ceiling angle, so a sloped overhang stops a
/// body driving into it.
pub fn probe_ceiling<Q: CollisionQuery + ?Sized>(
    sweep: &SweepContext<'_, Q>,
    position: Vec3,
    motion: Vec3,
) -> bool {
    let min_angle = sweep.surfaces.min_ceiling_angle;
    sweep
        .probe_above(position, 2.0 * sweep.skin())
        .iter()
        .any(|h| {
            sweep.surfaces.classify(h.normal) == SurfaceKind::Ceiling
                || (!is_negligible(motion) && angle_deg(motion, h.normal) >= min_angle)
        })
}

/// Pull the body down onto walkable ground within `max_step_height`.
///
/// Returns the (non-positive) vertical displacement and the ground contact.
pub fn snap_to_ground<Q: CollisionQuery + ?Sized>(
    sweep: &SweepContext<'_, Q>,
    position: Vec3,
) -> Option<(Vec3, SurfaceContact)> {
    let skin = sweep.skin();
    let hit = sweep.cast(position, -up(), sweep.max_step_height + skin)?;

    let drop = hit.distance - skin;
    if drop >= sweep.max_step_height || !sweep.surfaces.is_walkable(hit.normal) {
        return None;
    }
    Some((-up() * drop.max(0.0), hit))
}
