use nalgebra::Vector2;

use crate::physics::geometry;

// ---------------------------------------------------------------------------
// One record for everything that orbits: planets, the Moon, the vehicle
// ---------------------------------------------------------------------------

/// One gravitational pull acting on a body.
///
/// Magnitude and bearing are refreshed at the top of every tick and are
/// stale in between; nothing reads them across a step boundary.
#[derive(Debug, Clone, Copy)]
pub struct GravityPull {
    /// Index of the attractor in the system's body list.
    pub attractor: usize,
    /// Acceleration magnitude, m/s^2.
    pub accel: f64,
    /// Signed co-latitude bearing of this body as seen from the attractor, rad.
    pub bearing: f64,
}

impl GravityPull {
    pub fn new(attractor: usize) -> Self {
        GravityPull { attractor, accel: 0.0, bearing: 0.0 }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub mass: f64,      // kg
    pub radius: f64,    // m
    pub periapsis: f64, // m, orbit-defining, read only at construction
    pub apoapsis: f64,  // m
    pub pos: Vector2<f64>,   // m
    pub vel: Vector2<f64>,   // m/s
    pub accel: Vector2<f64>, // m/s^2
    /// Pulls from this body's reference bodies; empty for the central body.
    pub pulls: Vec<GravityPull>,
}

impl Body {
    /// Center-to-center distance, clamped away from zero.
    pub fn distance_to(&self, other: &Body) -> f64 {
        geometry::separation(&self.pos, &other.pos)
    }

    /// Height above `other`'s surface; negative once below it.
    pub fn altitude_above(&self, other: &Body) -> f64 {
        self.distance_to(other) - other.radius
    }

    /// The refreshed pull exerted by `attractor`, if it is one of this
    /// body's reference bodies.
    pub fn pull_from(&self, attractor: usize) -> Option<GravityPull> {
        self.pulls.iter().copied().find(|p| p.attractor == attractor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f64, y: f64, radius: f64) -> Body {
        Body {
            name: "test".into(),
            mass: 1.0,
            radius,
            periapsis: 0.0,
            apoapsis: 0.0,
            pos: Vector2::new(x, y),
            vel: Vector2::zeros(),
            accel: Vector2::zeros(),
            pulls: vec![GravityPull::new(0)],
        }
    }

    #[test]
    fn altitude_is_surface_relative() {
        let planet = body_at(0.0, 0.0, 100.0);
        let probe = body_at(0.0, 250.0, 0.0);
        assert_eq!(probe.altitude_above(&planet), 150.0);
        let buried = body_at(0.0, 50.0, 0.0);
        assert!(buried.altitude_above(&planet) < 0.0);
    }

    #[test]
    fn pull_lookup_by_attractor_index() {
        let b = body_at(0.0, 0.0, 1.0);
        assert!(b.pull_from(0).is_some());
        assert!(b.pull_from(3).is_none());
    }
}
