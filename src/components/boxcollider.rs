use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space bounds of a collider or tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Touching edges do not count as an overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn centre(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Axis-aligned rectangle centred on the entity's [`MapPosition`](super::mapposition::MapPosition).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Bounds of the collider for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> Aabb {
        let p0 = position - self.half_size();
        let p1 = position + self.half_size();
        Aabb {
            min: Vec2::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            max: Vec2::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    /// Touching edges do not count as an overlap.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        self.aabb(position).overlaps(&other.aabb(other_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_is_centred_on_position() {
        let c = BoxCollider::new(18.0, 18.0);
        let aabb = c.aabb(Vec2::new(9.0, 9.0));
        assert_eq!(aabb.min, Vec2::new(0.0, 0.0));
        assert_eq!(aabb.max, Vec2::new(18.0, 18.0));
        assert_eq!(aabb.centre(), Vec2::new(9.0, 9.0));
    }

    #[test]
    fn overlap_requires_interpenetration() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(a.overlaps(Vec2::new(0.0, 0.0), &b, Vec2::new(9.0, 0.0)));
        // edges touching
        assert!(!a.overlaps(Vec2::new(0.0, 0.0), &b, Vec2::new(10.0, 0.0)));
        assert!(!a.overlaps(Vec2::new(0.0, 0.0), &b, Vec2::new(0.0, 30.0)));
    }
}
