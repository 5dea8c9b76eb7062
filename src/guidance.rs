use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use nalgebra::Vector2;

use crate::config::{GuidanceConfig, ManeuverSchedule};
use crate::physics::geometry::MIN_SEPARATION;

// ---------------------------------------------------------------------------
// Flight phases
// ---------------------------------------------------------------------------

/// Mission phases, entered in order as mission time crosses the schedule
/// thresholds. The planner clears the velocity-match latch at every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ascent,
    Injection,
    Capture,
    Lowering,
    Braking,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Ascent => "ascent",
            Phase::Injection => "injection",
            Phase::Capture => "capture",
            Phase::Lowering => "lowering",
            Phase::Braking => "braking",
        };
        f.write_str(name)
    }
}

/// Phase at mission time `t`.
pub fn phase_at(t: f64, s: &ManeuverSchedule) -> Phase {
    if t < s.injection_start {
        Phase::Ascent
    } else if t < s.capture_start {
        Phase::Injection
    } else if t < s.lowering_start {
        Phase::Capture
    } else if t < s.braking_start {
        Phase::Lowering
    } else {
        Phase::Braking
    }
}

// ---------------------------------------------------------------------------
// Thrust-bearing building blocks
// ---------------------------------------------------------------------------

/// Ascent pitch offset from the local vertical, rad: zero through the
/// vertical segment, then a clamped linear ramp in altitude up to 90 deg.
pub fn ascent_pitch(altitude: f64, g: &GuidanceConfig) -> f64 {
    if altitude < g.vertical_altitude {
        0.0
    } else {
        (FRAC_PI_2 * altitude / g.pitch_span).clamp(0.0, FRAC_PI_2)
    }
}

/// Bearing of a relative velocity. The sign comes from the vehicle/reference
/// y-ordering, not from the velocity itself; the position bearings use the
/// same convention.
pub fn prograde_bearing(rel_vel: &Vector2<f64>, above_reference: bool) -> f64 {
    let speed = rel_vel.norm().max(MIN_SEPARATION);
    let c = (rel_vel.y / speed).clamp(-1.0, 1.0).acos();
    if above_reference {
        c
    } else {
        -c
    }
}

/// Direction opposite the relative velocity, same sign convention.
pub fn retrograde_bearing(rel_vel: &Vector2<f64>, above_reference: bool) -> f64 {
    let speed = rel_vel.norm().max(MIN_SEPARATION);
    let c = (rel_vel.y / speed).clamp(-1.0, 1.0).acos();
    if above_reference {
        PI + c
    } else {
        PI - c
    }
}

// ---------------------------------------------------------------------------
// Descent gates
// ---------------------------------------------------------------------------

/// Closing rate toward the reference, projected along `(cos phi, sin phi)`
/// where `phi` is the reference-relative bearing.
pub fn closing_rate(rel_vel: &Vector2<f64>, bearing: f64) -> f64 {
    rel_vel.x * bearing.cos() + rel_vel.y * bearing.sin()
}

/// Transverse rate, projected along `(sin phi, cos phi)`.
pub fn transverse_rate(rel_vel: &Vector2<f64>, bearing: f64) -> f64 {
    rel_vel.x * bearing.sin() + rel_vel.y * bearing.cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;
    use approx::assert_abs_diff_eq;

    fn schedule() -> ManeuverSchedule {
        presets::translunar().vehicle.unwrap().schedule
    }

    fn guidance() -> GuidanceConfig {
        presets::translunar().vehicle.unwrap().guidance
    }

    #[test]
    fn phases_follow_schedule_order() {
        let s = schedule();
        assert_eq!(phase_at(0.0, &s), Phase::Ascent);
        assert_eq!(phase_at(s.injection_start, &s), Phase::Injection);
        assert_eq!(phase_at(s.capture_start, &s), Phase::Capture);
        assert_eq!(phase_at(s.lowering_start, &s), Phase::Lowering);
        assert_eq!(phase_at(s.braking_start + 1.0, &s), Phase::Braking);
    }

    #[test]
    fn pitch_is_vertical_low_and_clamped_high() {
        let g = guidance();
        assert_abs_diff_eq!(ascent_pitch(0.0, &g), 0.0);
        assert_abs_diff_eq!(ascent_pitch(19_999.0, &g), 0.0);
        // Past the vertical segment the ramp picks up mid-slope
        let mid = ascent_pitch(90_000.0, &g);
        assert_abs_diff_eq!(mid, FRAC_PI_2 / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ascent_pitch(500_000.0, &g), FRAC_PI_2);
    }

    #[test]
    fn prograde_sign_follows_position_not_velocity() {
        let v = Vector2::new(3.0, 4.0);
        let above = prograde_bearing(&v, true);
        let below = prograde_bearing(&v, false);
        assert_abs_diff_eq!(above, (4.0f64 / 5.0).acos(), epsilon = 1e-12);
        assert_abs_diff_eq!(below, -above, epsilon = 1e-12);
    }

    #[test]
    fn retrograde_is_offset_by_pi() {
        let v = Vector2::new(0.0, 1.0);
        assert_abs_diff_eq!(retrograde_bearing(&v, true), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(retrograde_bearing(&v, false), PI, epsilon = 1e-12);
    }

    #[test]
    fn rate_projections_use_swapped_axes() {
        let v = Vector2::new(2.0, -3.0);
        let phi = 0.0;
        // At phi = 0 the closing axis is +x and the transverse axis is +y
        assert_abs_diff_eq!(closing_rate(&v, phi), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(transverse_rate(&v, phi), -3.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_relative_velocity_is_finite() {
        let v = Vector2::zeros();
        assert!(prograde_bearing(&v, true).is_finite());
        assert!(retrograde_bearing(&v, false).is_finite());
    }
}
