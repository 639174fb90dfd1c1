//! Scripted collision port for controller unit tests.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

use crate::collision::{CollisionQuery, LayerMask, SurfaceContact, Vec3};

/// Answers capsule casts from a script, then from `fallback`. Sphere casts return
/// fixed contact lists.
#[derive(Default)]
pub struct ScriptedQuery {
    pub capsule_hits: RefCell<VecDeque<Option<SurfaceContact>>>,
    pub fallback: Option<SurfaceContact>,
    pub below: Vec<SurfaceContact>,
    pub above: Vec<SurfaceContact>,
    pub capsule_casts: Cell<u32>,
    pub sphere_casts: Cell<u32>,
}

impl ScriptedQuery {
    pub fn with_script(hits: impl IntoIterator<Item = Option<SurfaceContact>>) -> Self {
        Self {
            capsule_hits: RefCell::new(hits.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn always(hit: SurfaceContact) -> Self {
        Self {
            fallback: Some(hit),
            ..Self::default()
        }
    }
}

pub fn contact(point: Vec3, normal: Vec3, distance: f32) -> SurfaceContact {
    SurfaceContact {
        point,
        normal: normal.normalize(),
        distance,
    }
}

impl CollisionQuery for ScriptedQuery {
    fn capsule_cast(
        &self,
        _base: Vec3,
        _tip: Vec3,
        _radius: f32,
        _direction: Vec3,
        max_distance: f32,
        _mask: LayerMask,
    ) -> Option<SurfaceContact> {
        self.capsule_casts.set(self.capsule_casts.get() + 1);
        let next = self.capsule_hits.borrow_mut().pop_front();
        next.unwrap_or(self.fallback).filter(|hit| hit.distance <= max_distance)
    }

    fn sphere_cast_all(
        &self,
        _origin: Vec3,
        _radius: f32,
        direction: Vec3,
        max_distance: f32,
        _mask: LayerMask,
    ) -> Vec<SurfaceContact> {
        self.sphere_casts.set(self.sphere_casts.get() + 1);
        let source = if direction.y < 0.0 { &self.below } else { &self.above };
        source
            .iter()
            .copied()
            .filter(|hit| hit.distance <= max_distance)
            .collect()
    }
}
