use crate::vehicle::Stage;

// ---------------------------------------------------------------------------
// Scenario configuration: every literal the simulation consumes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MissionConfig {
    /// Integration step, s.
    pub dt: f64,
    /// Record one track sample every this many ticks (0 disables the track).
    pub sample_every: usize,
    /// Celestial bodies, parents before children.
    pub bodies: Vec<BodyConfig>,
    /// Optional flight vehicle; `None` runs the celestial system alone.
    pub vehicle: Option<VehicleConfig>,
}

#[derive(Debug, Clone)]
pub struct BodyConfig {
    pub name: &'static str,
    pub mass: f64,   // kg
    pub radius: f64, // m
    /// Apsis distances about the parent, m; position is initialized at
    /// `periapsis` along +y from the parent.
    pub periapsis: f64,
    pub apoapsis: f64,
    /// Speed at periapsis relative to the parent, along +x, m/s.
    pub periapsis_speed: f64,
    pub parent: Option<&'static str>,
    /// Bodies whose gravity acts on this one.
    pub attractors: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct VehicleConfig {
    pub name: &'static str,
    /// Stages in firing order; the last one is the payload.
    pub stages: Vec<Stage>,
    /// Body the vehicle launches from (surface start on its +y axis).
    pub launch_body: &'static str,
    /// Initial speed along +x relative to the launch body (site rotation), m/s.
    pub launch_speed: f64,
    /// Body the mission captures around and descends to.
    pub target_body: &'static str,
    pub attractors: Vec<&'static str>,
    pub schedule: ManeuverSchedule,
    pub guidance: GuidanceConfig,
}

/// Mission-time gates for the impulsive maneuvers. All values in seconds
/// except the margins/offsets noted.
#[derive(Debug, Clone, Copy)]
pub struct ManeuverSchedule {
    /// Trans-lunar injection burn opens (t1).
    pub injection_start: f64,
    /// Capture burn opens (t2).
    pub capture_start: f64,
    /// Capture burn accounting closes.
    pub capture_burn_end: f64,
    /// The capture-orbit snap no longer applies after this.
    pub capture_deadline: f64,
    /// Periapsis-lowering burn opens (t3).
    pub lowering_start: f64,
    /// Lowering burn accounting closes.
    pub lowering_burn_end: f64,
    /// Braking/descent phase opens (t4).
    pub braking_start: f64,
    /// Injection cutoff margin over the computed delta-v.
    pub injection_margin: f64,
    /// Transfer-apogee clearance above the target body's surface, m.
    pub injection_clearance: f64,
    /// Capture orbit altitude, m.
    pub capture_altitude: f64,
    /// Periapsis-lowering target altitude, m.
    pub lowering_altitude: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct GuidanceConfig {
    /// Pure vertical thrust below this launch-body altitude, m.
    pub vertical_altitude: f64,
    /// Altitude span of the 0-90 deg pitch ramp, m.
    pub pitch_span: f64,
    /// Parking-orbit insertion trigger altitude, m.
    pub parking_altitude: f64,
    /// Imposed parking-orbit speed, m/s.
    pub parking_speed: f64,
    /// Parking-orbit insertion only fires before this mission time, s.
    pub parking_deadline: f64,
    /// Imposed capture-orbit speed about the target body, m/s.
    pub capture_speed: f64,
    /// Descent success is judged above this target-body altitude, m.
    pub descent_gate_altitude: f64,
    /// Closing rate at or below which descent counts as achieved, m/s.
    pub descent_contact_rate: f64,
    /// Below the gate, thrust holds while the transverse rate is at or
    /// above this, m/s.
    pub descent_min_transverse: f64,
    /// Propulsive-acceleration multiplier from braking start.
    pub braking_throttle: f64,
}

// ---------------------------------------------------------------------------
// Preset scenarios
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;
    use crate::vehicle::StageBuilder;

    /// The full trans-lunar scenario: Sun, eight planets, the Moon, and the
    /// five-stage vehicle, all with their literal figures.
    pub fn translunar() -> MissionConfig {
        let bodies = vec![
            BodyConfig {
                name: "Sun",
                mass: 1.9885e30,
                radius: 6.9551e8,
                periapsis: 0.0,
                apoapsis: 0.0,
                periapsis_speed: 0.0,
                parent: None,
                attractors: vec![],
            },
            BodyConfig {
                name: "Mercury",
                mass: 3.33022e23,
                radius: 2.4397e6,
                periapsis: 4.6001009e10,
                apoapsis: 6.9817445e10,
                periapsis_speed: 4.736e4,
                parent: Some("Sun"),
                attractors: vec!["Sun"],
            },
            BodyConfig {
                name: "Venus",
                mass: 4.8675e24,
                radius: 6.0518e6,
                periapsis: 1.07476259e11,
                apoapsis: 1.08942109e11,
                periapsis_speed: 3.502e4,
                parent: Some("Sun"),
                attractors: vec!["Sun"],
            },
            BodyConfig {
                name: "Earth",
                mass: 5.9726e24,
                radius: 6.371e6,
                periapsis: 1.4709829e11,
                apoapsis: 1.52098232e11,
                periapsis_speed: 2.9783e4,
                parent: Some("Sun"),
                attractors: vec!["Sun"],
            },
            BodyConfig {
                name: "Moon",
                mass: 7.3477e22,
                radius: 1.7971e6,
                periapsis: 3.63104e8,
                apoapsis: 4.05696e8,
                periapsis_speed: 1.023e3,
                parent: Some("Earth"),
                attractors: vec!["Sun", "Earth"],
            },
            BodyConfig {
                name: "Mars",
                mass: 6.4171e23,
                radius: 3.3895e6,
                periapsis: 2.06655e11,
                apoapsis: 2.49232e11,
                periapsis_speed: 2.4077e4,
                parent: Some("Sun"),
                attractors: vec!["Sun"],
            },
            BodyConfig {
                name: "Jupiter",
                mass: 1.8986e27,
                radius: 6.9911e7,
                periapsis: 7.405736e11,
                apoapsis: 8.165208e11,
                periapsis_speed: 1.307e4,
                parent: Some("Sun"),
                attractors: vec!["Sun"],
            },
            BodyConfig {
                name: "Saturn",
                mass: 5.6846e26,
                radius: 5.8232e7,
                periapsis: 1.353572956e12,
                apoapsis: 1.513325783e12,
                periapsis_speed: 9.69e3,
                parent: Some("Sun"),
                attractors: vec!["Sun"],
            },
            BodyConfig {
                name: "Uranus",
                mass: 8.6813e25,
                radius: 2.5362e7,
                periapsis: 2.748938461e12,
                apoapsis: 3.004419704e12,
                periapsis_speed: 6.81e3,
                parent: Some("Sun"),
                attractors: vec!["Sun"],
            },
            BodyConfig {
                name: "Neptune",
                mass: 1.0243e26,
                radius: 2.4622e7,
                periapsis: 4.452940833e12,
                apoapsis: 4.55394649e12,
                periapsis_speed: 5.4349e3,
                parent: Some("Sun"),
                attractors: vec!["Sun"],
            },
        ];

        let stages = vec![
            StageBuilder::new("first")
                .dry_mass(15_136.0)
                .total_mass(177_562.0)
                .thrust_sl(3_354.0)
                .thrust_vac(4_085.2)
                .isp_sl(2_582.973)
                .isp_vac(3_141.162)
                .build(),
            StageBuilder::new("second")
                .dry_mass(6_545.0)
                .total_mass(99_765.0)
                .thrust_sl(792.5)
                .thrust_vac(990.2)
                .isp_sl(2_528.037)
                .isp_vac(3_145.086)
                .build(),
            StageBuilder::new("third")
                .dry_mass(2_355.0)
                .total_mass(27_755.0)
                .vacuum_only(294.3, 3_521.79)
                .build(),
            StageBuilder::new("transfer")
                .dry_mass(887.0)
                .total_mass(6_280.0)
                .vacuum_only(19.9, 3_268.692)
                .build(),
            StageBuilder::new("payload")
                .dry_mass(605.0)
                .total_mass(1_605.0)
                .vacuum_only(4.7072, 3_103.457)
                .build(),
        ];

        let vehicle = VehicleConfig {
            name: "vehicle",
            stages,
            launch_body: "Earth",
            launch_speed: 286.487,
            target_body: "Moon",
            attractors: vec!["Sun", "Earth", "Moon"],
            schedule: ManeuverSchedule {
                injection_start: 3_550.0,
                capture_start: 340_700.0,
                capture_burn_end: 345_500.0,
                capture_deadline: 346_000.0,
                lowering_start: 346_500.0,
                lowering_burn_end: 349_700.0,
                braking_start: 349_990.0,
                injection_margin: 1.015,
                injection_clearance: 1.0e5,
                capture_altitude: 100_000.0,
                lowering_altitude: 18_000.0,
            },
            guidance: GuidanceConfig {
                vertical_altitude: 20_000.0,
                pitch_span: 180_000.0,
                parking_altitude: 180_000.0,
                parking_speed: 7_800.650602,
                parking_deadline: 3_000.0,
                capture_speed: 1_607.80548,
                descent_gate_altitude: 6_100.0,
                descent_contact_rate: 1.0,
                descent_min_transverse: 2.0,
                braking_throttle: 5.0,
            },
        };

        MissionConfig {
            dt: 0.25,
            sample_every: 40,
            bodies,
            vehicle: Some(vehicle),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn preset_is_well_formed() {
            let cfg = translunar();
            assert_eq!(cfg.bodies.len(), 10);
            let names: Vec<_> = cfg.bodies.iter().map(|b| b.name).collect();
            // Parents appear before their children
            for b in &cfg.bodies {
                if let Some(parent) = b.parent {
                    let pi = names.iter().position(|n| *n == parent).unwrap();
                    let bi = names.iter().position(|n| *n == b.name).unwrap();
                    assert!(pi < bi, "{} must come after its parent", b.name);
                }
            }
            let vehicle = cfg.vehicle.unwrap();
            assert_eq!(vehicle.stages.len(), 5);
            for s in &vehicle.stages {
                assert!(s.propellant_mass() > 0.0, "{} carries no propellant", s.name);
            }
            let s = vehicle.schedule;
            assert!(s.injection_start < s.capture_start);
            assert!(s.capture_start < s.capture_burn_end);
            assert!(s.capture_burn_end < s.capture_deadline);
            assert!(s.capture_deadline < s.lowering_start);
            assert!(s.lowering_start < s.lowering_burn_end);
            assert!(s.lowering_burn_end < s.braking_start);
        }
    }
}
