//! Axis-aligned boxes and sphere overlap tests
//!
//! Everything here is pure: volumes are rebuilt from entity positions each
//! frame and thrown away afterwards.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Point inside (or on) the box closest to `p`
    #[inline]
    pub fn closest_point(&self, p: DVec3) -> DVec3 {
        p.clamp(self.min, self.max)
    }

    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> DVec3 {
        (self.max - self.min) * 0.5
    }
}

/// Which face family of a box a sphere touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AabbContact {
    /// Contact dominated by x or z (reflect horizontally)
    Side,
    /// Contact dominated by y (reflect vertically)
    TopBottom,
}

/// Build a box from half extents around a center
#[inline]
pub fn make_aabb(half_extents: DVec3, center: DVec3) -> Aabb {
    Aabb {
        min: center - half_extents,
        max: center + half_extents,
    }
}

/// True when the sphere overlaps the box (touching does not count)
#[inline]
pub fn sphere_intersects_aabb(aabb: &Aabb, center: DVec3, radius: f64) -> bool {
    aabb.closest_point(center).distance(center) < radius
}

/// Overlap test that also reports which face family was hit
///
/// The contact is `TopBottom` only when the y separation between the sphere
/// center and the closest box point is strictly larger than both the x and z
/// separations; ties, and a center buried inside the box, count as `Side`.
pub fn classify_sphere_aabb(aabb: &Aabb, center: DVec3, radius: f64) -> Option<AabbContact> {
    let closest = aabb.closest_point(center);
    if closest.distance(center) >= radius {
        return None;
    }

    let delta = (center - closest).abs();
    if delta.y > delta.x && delta.y > delta.z {
        Some(AabbContact::TopBottom)
    } else {
        Some(AabbContact::Side)
    }
}

/// True when two spheres overlap (touching does not count)
#[inline]
pub fn sphere_intersects_sphere(c1: DVec3, r1: f64, c2: DVec3, r2: f64) -> bool {
    c1.distance(c2) < r1 + r2
}
