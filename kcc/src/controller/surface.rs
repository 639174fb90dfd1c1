use crate::{collision::Vec3, utils::surface_angle_deg};

/// How the controller treats a surface it touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    Walkable,
    Wall,
    Ceiling,
}

/// Angle thresholds (degrees from world up) separating the surface kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceClassifier {
    pub max_slope_angle: f32,
    pub min_ceiling_angle: f32,
}

impl SurfaceClassifier {
    pub fn new(max_slope_angle: f32, min_ceiling_angle: f32) -> Self {
        Self {
            max_slope_angle,
            min_ceiling_angle,
        }
    }

    /// Both bounds are inclusive.
    pub fn classify(&self, normal: Vec3) -> SurfaceKind {
        let angle = surface_angle_deg(normal);
        if angle <= self.max_slope_angle {
            SurfaceKind::Walkable
        } else if angle >= self.min_ceiling_angle {
            SurfaceKind::Ceiling
        } else {
            SurfaceKind::Wall
        }
    }

    #[inline]
    pub fn is_walkable(&self, normal: Vec3) -> bool {
        self.classify(normal) == SurfaceKind::Walkable
    }
}
