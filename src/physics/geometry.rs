use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Planar geometry shared by the integrator and the guidance logic
// ---------------------------------------------------------------------------

/// Smallest separation used in any distance-derived quantity, m.
/// Keeps gravity magnitudes and bearings finite if two bodies coincide.
pub const MIN_SEPARATION: f64 = 1.0e-3;

/// Euclidean distance between two points, clamped to `MIN_SEPARATION`.
pub fn separation(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    (a - b).norm().max(MIN_SEPARATION)
}

/// Signed co-latitude of `delta` measured from the +y axis, rad.
///
/// Positive iff `delta.x >= 0`. This is a two-valued bearing, not a full
/// polar angle: the construction cannot separate all four quadrants, and the
/// acceleration decomposition downstream assumes exactly this convention.
pub fn bearing(delta: &Vector2<f64>) -> f64 {
    let r = delta.norm().max(MIN_SEPARATION);
    let c = (delta.y / r).clamp(-1.0, 1.0).acos();
    if delta.x >= 0.0 {
        c
    } else {
        -c
    }
}

/// Unit vector along a bearing: `(sin phi, cos phi)`.
pub fn radial(phi: f64) -> Vector2<f64> {
    Vector2::new(phi.sin(), phi.cos())
}

/// Local tangential direction at a bearing: `(cos phi, -sin phi)`.
/// Used when a circular-orbit speed is imposed about a reference body.
pub fn tangential(phi: f64) -> Vector2<f64> {
    Vector2::new(phi.cos(), -phi.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn bearing_on_axes() {
        assert_abs_diff_eq!(bearing(&Vector2::new(0.0, 1.0)), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bearing(&Vector2::new(1.0, 0.0)), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(bearing(&Vector2::new(-1.0, 0.0)), -FRAC_PI_2, epsilon = 1e-12);
        // x == 0 counts as the positive side
        assert_abs_diff_eq!(bearing(&Vector2::new(0.0, -1.0)), PI, epsilon = 1e-12);
    }

    #[test]
    fn bearing_collapses_mirrored_quadrants() {
        let right = bearing(&Vector2::new(1.0, -1.0));
        let left = bearing(&Vector2::new(-1.0, -1.0));
        assert_abs_diff_eq!(right, 3.0 * PI / 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(left, -right, epsilon = 1e-12);
    }

    #[test]
    fn coincident_points_stay_finite() {
        let p = Vector2::new(5.0, 5.0);
        assert!(separation(&p, &p) >= MIN_SEPARATION);
        assert!(bearing(&Vector2::zeros()).is_finite());
    }

    #[test]
    fn radial_and_tangential_are_orthogonal() {
        for phi in [0.0, 0.4, -1.3, 2.9] {
            assert_abs_diff_eq!(radial(phi).dot(&tangential(phi)), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(radial(phi).norm(), 1.0, epsilon = 1e-12);
        }
    }
}
