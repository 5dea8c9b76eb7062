use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// Impulsive maneuver sizing (vis-viva / Hohmann relations)
// ---------------------------------------------------------------------------

/// Circular orbit speed at radius `r` about a body with parameter `mu`.
pub fn circular_velocity(mu: f64, r: f64) -> f64 {
    (mu / r).sqrt()
}

/// Semi-major axis from periapsis/apoapsis distances.
pub fn semi_major_axis(periapsis: f64, apoapsis: f64) -> f64 {
    (periapsis + apoapsis) / 2.0
}

/// Orbital period from apsides, s.
pub fn period_from_apsides(mu: f64, periapsis: f64, apoapsis: f64) -> f64 {
    let a = semi_major_axis(periapsis, apoapsis);
    2.0 * PI * (a.powi(3) / mu).sqrt()
}

/// Speed change that stretches the current orbit into a transfer ellipse
/// with apoapsis `r_target`, starting at radius `r` with speed `speed`:
/// `dv = v * (sqrt(2 q / (q + 1)) - 1)` with `q = r_target / r`.
pub fn injection_dv(speed: f64, r: f64, r_target: f64) -> f64 {
    let q = r_target / r;
    speed * ((2.0 * q / (q + 1.0)).sqrt() - 1.0)
}

/// Delta-v to capture into a circular orbit of radius `r_target` about a
/// body with parameter `mu`: the transfer-shaping term at the current
/// radius plus the excess of the approach speed over local circular speed.
pub fn capture_dv(mu: f64, r: f64, r_target: f64, rel_speed: f64) -> f64 {
    let v_circ = circular_velocity(mu, r);
    injection_dv(v_circ, r, r_target).abs() + (rel_speed - v_circ).abs()
}

/// Delta-v to lower periapsis to `r_target` from radius `r` at `rel_speed`.
pub fn lowering_dv(rel_speed: f64, r: f64, r_target: f64) -> f64 {
    injection_dv(rel_speed, r, r_target).abs()
}

// ---------------------------------------------------------------------------
// Reference two-impulse solution between circular orbits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct HohmannTransfer {
    pub dv1: f64,           // m/s, first burn (raise apoapsis)
    pub dv2: f64,           // m/s, second burn (circularize)
    pub total_dv: f64,      // m/s
    pub transfer_time: f64, // s, half the transfer orbit period
    pub r1: f64,            // m, initial orbit radius
    pub r2: f64,            // m, final orbit radius
}

/// Compute a Hohmann transfer between two circular orbits of radius `r1`
/// and `r2` (not altitudes) about a body with parameter `mu`.
pub fn hohmann(r1: f64, r2: f64, mu: f64) -> HohmannTransfer {
    let a_transfer = semi_major_axis(r1, r2);

    let v_circ1 = circular_velocity(mu, r1);
    let v_circ2 = circular_velocity(mu, r2);

    let v_transfer_1 = (mu * (2.0 / r1 - 1.0 / a_transfer)).sqrt();
    let v_transfer_2 = (mu * (2.0 / r2 - 1.0 / a_transfer)).sqrt();

    let dv1 = (v_transfer_1 - v_circ1).abs();
    let dv2 = (v_circ2 - v_transfer_2).abs();

    HohmannTransfer {
        dv1,
        dv2,
        total_dv: dv1 + dv2,
        transfer_time: period_from_apsides(mu, r1, r2) / 2.0,
        r1,
        r2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::gravity;

    const EARTH_MASS: f64 = 5.9726e24;
    const EARTH_RADIUS: f64 = 6.371e6;

    #[test]
    fn hohmann_leo_to_geo() {
        let mu = gravity::mu(EARTH_MASS);
        let r_leo = EARTH_RADIUS + 200_000.0;
        let r_geo = 42_164_000.0;
        let h = hohmann(r_leo, r_geo, mu);

        // Known values: ~2.46 km/s + ~1.48 km/s = ~3.94 km/s total
        assert!(h.total_dv > 3_800.0 && h.total_dv < 4_100.0,
            "LEO->GEO dv should be ~3.94 km/s, got {:.0} m/s", h.total_dv);
        // Transfer time ~5.3 hours
        assert!(h.transfer_time > 18_000.0 && h.transfer_time < 20_000.0,
            "transfer time should be ~5.3 hr, got {:.0} s", h.transfer_time);
    }

    #[test]
    fn injection_matches_hohmann_first_burn_from_circular() {
        let mu = gravity::mu(EARTH_MASS);
        let r1 = EARTH_RADIUS + 180_000.0;
        let r2 = 3.9e8;
        let v_circ = circular_velocity(mu, r1);
        let h = hohmann(r1, r2, mu);
        let dv = injection_dv(v_circ, r1, r2);
        assert!((dv - h.dv1).abs() < 1e-6 * h.dv1);
    }

    #[test]
    fn zero_dv_for_same_orbit() {
        let mu = gravity::mu(EARTH_MASS);
        let r = EARTH_RADIUS + 400_000.0;
        let h = hohmann(r, r, mu);
        assert!(h.total_dv < 1e-6);
        assert!(injection_dv(7_000.0, r, r).abs() < 1e-9);
    }

    #[test]
    fn capture_dv_covers_both_terms() {
        let mu = gravity::mu(7.3477e22);
        let r = 2.0e6;
        let v_circ = circular_velocity(mu, r);
        // Approaching faster than circular from a higher orbit target
        let dv = capture_dv(mu, r, 1.9e6, v_circ + 500.0);
        assert!(dv > 500.0);
    }

    #[test]
    fn period_of_circular_leo_is_about_90_minutes() {
        let mu = gravity::mu(EARTH_MASS);
        let r = EARTH_RADIUS + 400_000.0;
        let period = period_from_apsides(mu, r, r);
        assert!(period > 5_400.0 && period < 5_700.0, "got {period}");
    }
}
