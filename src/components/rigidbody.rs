//! Arcade-style kinematic body.
//!
//! The [`RigidBody`] component stores velocity and acceleration for an entity
//! together with the parameters the physics step needs: horizontal drag,
//! per-axis maximum velocity and whether the body collides with the world
//! bounds. After every step the physics system writes which sides of the body
//! are [`Blocked`], which is how "grounded" is derived.
//!
//! Horizontal drag only brakes the body while its horizontal acceleration is
//! zero, so a body that is being pushed keeps its full acceleration.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Sides of a body that touched solid tiles or world bounds during the last step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blocked {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Blocked {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Kinematic body storing velocity, acceleration and the contact flags.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `acceleration` - Acceleration applied this step, on top of gravity
/// - `drag_x` - Horizontal deceleration used while `acceleration.x` is zero
/// - `max_velocity` - Per-axis clamp of the velocity magnitude
/// - `gravity` - Whether world gravity is applied
/// - `collide_world_bounds` - Clamp the body inside the level rectangle
/// - `blocked` - Contacts reported by the last physics step
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub drag_x: f32,
    pub max_velocity: Vec2,
    pub gravity: bool,
    pub collide_world_bounds: bool,
    pub blocked: Blocked,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest with no drag and no velocity limit.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            drag_x: 0.0,
            max_velocity: Vec2::new(f32::INFINITY, f32::INFINITY),
            gravity: true,
            collide_world_bounds: false,
            blocked: Blocked::default(),
        }
    }

    /// Create a RigidBody with drag and a maximum velocity applied to both axes.
    pub fn with_physics(drag_x: f32, max_velocity: f32) -> Self {
        Self {
            drag_x,
            max_velocity: Vec2::new(max_velocity, max_velocity),
            ..Self::new()
        }
    }

    /// True when the body rests on something solid.
    pub fn grounded(&self) -> bool {
        self.blocked.down
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    pub fn set_acceleration_x(&mut self, ax: f32) {
        self.acceleration.x = ax;
    }

    /// Advance the horizontal velocity by one step of acceleration or drag.
    ///
    /// Drag brakes toward zero and never flips the direction of travel.
    pub fn integrate_horizontal(&mut self, dt: f32) {
        if self.acceleration.x != 0.0 {
            self.velocity.x += self.acceleration.x * dt;
        } else if self.drag_x > 0.0 {
            let brake = self.drag_x * dt;
            if self.velocity.x - brake > 0.0 {
                self.velocity.x -= brake;
            } else if self.velocity.x + brake < 0.0 {
                self.velocity.x += brake;
            } else {
                self.velocity.x = 0.0;
            }
        }
        self.velocity.x = self.velocity.x.clamp(-self.max_velocity.x, self.max_velocity.x);
    }

    /// Advance the vertical velocity by gravity and acceleration.
    pub fn integrate_vertical(&mut self, gravity: f32, dt: f32) {
        let g = if self.gravity { gravity } else { 0.0 };
        self.velocity.y += (g + self.acceleration.y) * dt;
        self.velocity.y = self.velocity.y.clamp(-self.max_velocity.y, self.max_velocity.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_rigidbody_new() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert_eq!(rb.acceleration, Vec2::ZERO);
        assert!(rb.gravity);
        assert!(!rb.collide_world_bounds);
        assert!(!rb.grounded());
    }

    #[test]
    fn test_with_physics_sets_both_axes() {
        let rb = RigidBody::with_physics(2000.0, 700.0);
        assert!(approx_eq(rb.drag_x, 2000.0));
        assert!(approx_eq(rb.max_velocity.x, 700.0));
        assert!(approx_eq(rb.max_velocity.y, 700.0));
    }

    #[test]
    fn test_acceleration_ignores_drag() {
        let mut rb = RigidBody::with_physics(2000.0, 700.0);
        rb.set_acceleration_x(400.0);
        rb.integrate_horizontal(0.5);
        assert!(approx_eq(rb.velocity.x, 200.0));
    }

    #[test]
    fn test_drag_brakes_without_overshoot() {
        let mut rb = RigidBody::with_physics(2000.0, 700.0);
        rb.velocity.x = 30.0;
        rb.integrate_horizontal(0.01);
        assert!(approx_eq(rb.velocity.x, 10.0));
        rb.integrate_horizontal(0.01);
        assert!(approx_eq(rb.velocity.x, 0.0));

        rb.velocity.x = -30.0;
        rb.integrate_horizontal(0.1);
        assert!(approx_eq(rb.velocity.x, 0.0));
    }

    #[test]
    fn test_max_velocity_clamps() {
        let mut rb = RigidBody::with_physics(0.0, 700.0);
        rb.set_acceleration_x(-10_000.0);
        rb.integrate_horizontal(1.0);
        assert!(approx_eq(rb.velocity.x, -700.0));

        rb.integrate_vertical(10_000.0, 1.0);
        assert!(approx_eq(rb.velocity.y, 700.0));
    }

    #[test]
    fn test_gravity_can_be_disabled() {
        let mut rb = RigidBody::new();
        rb.gravity = false;
        rb.integrate_vertical(1500.0, 1.0);
        assert!(approx_eq(rb.velocity.y, 0.0));
    }

    #[test]
    fn test_blocked_clear() {
        let mut blocked = Blocked {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        blocked.clear();
        assert_eq!(blocked, Blocked::default());
    }
}
