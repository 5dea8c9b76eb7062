// ---------------------------------------------------------------------------
// Piecewise-exponential atmosphere (sea level to 100 km)
// ---------------------------------------------------------------------------

/// Molar mass figure the pressure/density formulas are calibrated with.
/// Paired with `GAS_CONSTANT`; only the ratio of a density to
/// `sea_level_density()` ever leaves this module.
pub const MOLAR_MASS_AIR: f64 = 28.98;

/// Universal gas constant, J/(mol*K).
pub const GAS_CONSTANT: f64 = 8.314;

/// Sea-level pressure, Pa.
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;

/// Above this altitude engines see pure vacuum, m.
pub const CEILING: f64 = 100_000.0;

/// (altitude m, temperature K); altitude strictly increasing, temperature
/// non-monotonic across the atmospheric layers.
const TEMPERATURE_TABLE: [(f64, f64); 29] = [
    (0.0, 288.2),
    (500.0, 284.9),
    (1_000.0, 281.7),
    (1_500.0, 278.4),
    (2_000.0, 275.2),
    (2_500.0, 271.9),
    (3_000.0, 268.7),
    (4_000.0, 262.2),
    (5_000.0, 255.7),
    (6_000.0, 249.2),
    (7_000.0, 242.7),
    (8_000.0, 236.2),
    (9_000.0, 229.7),
    (10_000.0, 223.3),
    (11_000.0, 216.8),
    (12_000.0, 216.7),
    (14_000.0, 216.7),
    (16_000.0, 216.7),
    (18_000.0, 216.7),
    (20_000.0, 216.7),
    (24_000.0, 220.6),
    (28_000.0, 224.5),
    (32_000.0, 228.5),
    (36_000.0, 239.3),
    (40_000.0, 250.4),
    (50_000.0, 270.7),
    (60_000.0, 247.0),
    (80_000.0, 198.6),
    (100_000.0, 196.6),
];

/// Temperature at altitude: the entry with the greatest tabulated altitude
/// at or below the query (no interpolation).
pub fn temperature(altitude: f64) -> f64 {
    let mut t = TEMPERATURE_TABLE[0].1;
    for &(h, temp) in TEMPERATURE_TABLE.iter() {
        if altitude >= h {
            t = temp;
        } else {
            break;
        }
    }
    t
}

/// Pressure at altitude, Pa. `g_local` is the local gravitational
/// acceleration toward the body owning the atmosphere.
pub fn pressure(altitude: f64, g_local: f64) -> f64 {
    let t = temperature(altitude);
    SEA_LEVEL_PRESSURE * (-MOLAR_MASS_AIR * g_local * altitude / (GAS_CONSTANT * t)).exp()
}

/// Density at altitude, same calibration as `sea_level_density`.
pub fn density(altitude: f64, g_local: f64) -> f64 {
    let t = temperature(altitude);
    pressure(altitude, g_local) * MOLAR_MASS_AIR / (GAS_CONSTANT * t)
}

/// Density of the model at sea level. Thrust and impulse interpolation are
/// driven by `density / sea_level_density`.
pub fn sea_level_density() -> f64 {
    SEA_LEVEL_PRESSURE * MOLAR_MASS_AIR / (GAS_CONSTANT * TEMPERATURE_TABLE[0].1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn lookup_is_floor_style() {
        assert_abs_diff_eq!(temperature(0.0), 288.2);
        assert_abs_diff_eq!(temperature(499.0), 288.2);
        assert_abs_diff_eq!(temperature(500.0), 284.9);
        assert_abs_diff_eq!(temperature(13_999.0), 216.7);
        assert_abs_diff_eq!(temperature(250_000.0), 196.6);
    }

    #[test]
    fn negative_altitude_clamps_to_first_entry() {
        assert_abs_diff_eq!(temperature(-10.0), 288.2);
    }

    #[test]
    fn sea_level_ratio_is_one() {
        let ratio = density(0.0, 9.81) / sea_level_density();
        assert_abs_diff_eq!(ratio, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn density_falls_with_altitude() {
        let g = 9.81;
        let rho0 = density(0.0, g);
        let rho1 = density(1_000.0, g);
        let rho2 = density(10_000.0, g);
        assert!(rho0 > rho1);
        assert!(rho1 > rho2);
        assert!(rho2 >= 0.0);
    }

    #[test]
    fn pressure_never_negative() {
        for alt in [0.0, 5_000.0, 50_000.0, 99_999.0] {
            assert!(pressure(alt, 9.81) >= 0.0);
        }
    }
}
