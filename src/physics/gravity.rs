// ---------------------------------------------------------------------------
// Point-mass gravity
// ---------------------------------------------------------------------------

/// Gravitational constant, m^3/(kg*s^2).
pub const G: f64 = 6.6743015e-11;

/// Standard gravitational parameter of a body, m^3/s^2.
pub fn mu(mass: f64) -> f64 {
    G * mass
}

/// Inverse-square acceleration magnitude toward a point mass at distance `r`.
/// Callers clamp `r` first (see `geometry::separation`).
pub fn point_accel(mass: f64, r: f64) -> f64 {
    G * mass / (r * r)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EARTH_MASS: f64 = 5.9726e24;
    const EARTH_RADIUS: f64 = 6.371e6;

    #[test]
    fn surface_gravity_near_standard() {
        let g = point_accel(EARTH_MASS, EARTH_RADIUS);
        assert!((g - 9.82).abs() < 0.02, "surface g = {g}");
    }

    #[test]
    fn gravity_decreases_with_distance() {
        let g0 = point_accel(EARTH_MASS, EARTH_RADIUS);
        let g_leo = point_accel(EARTH_MASS, EARTH_RADIUS + 400_000.0);
        assert!(g_leo < g0);
        assert!(g_leo > 0.8 * g0);
    }
}
