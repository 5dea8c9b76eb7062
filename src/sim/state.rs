use nalgebra::Vector2;

use crate::config::VehicleConfig;
use crate::guidance::Phase;
use crate::vehicle::Propulsion;

// ---------------------------------------------------------------------------
// Mutable flight state and read-only snapshots
// ---------------------------------------------------------------------------

/// Scalar state of the planner and the propulsion stack. The vehicle's
/// kinematic state lives in its `Body` record; this holds everything else.
#[derive(Debug, Clone)]
pub struct FlightState {
    pub config: VehicleConfig,
    /// Index of the vehicle's `Body` in the system list.
    pub body: usize,
    /// Index of the launch body (ascent/injection reference).
    pub launch_ref: usize,
    /// Index of the target body (capture/descent reference).
    pub target_ref: usize,
    pub propulsion: Propulsion,
    pub phase: Phase,
    /// Engine-off latch: the current maneuver's target velocity is met.
    /// Cleared when the next phase opens.
    pub velocity_matched: bool,
    /// Terminal latch: the descent criteria were met; thrust stays zero.
    pub descent_achieved: bool,
    /// Delta-v accumulated toward the in-progress maneuver, m/s.
    pub burn_dv: f64,
    /// Planned maneuver sizes, filled once when their phase opens, m/s.
    pub injection_target: f64,
    pub capture_target: f64,
    pub lowering_target: f64,
    /// Propulsive acceleration applied on the last tick, m/s^2.
    pub thrust_accel: f64,
    /// Time from braking start to surface contact, once touched down, s.
    pub touchdown: Option<f64>,
    pub(crate) capture_announced: bool,
}

impl FlightState {
    pub fn new(
        config: VehicleConfig,
        body: usize,
        launch_ref: usize,
        target_ref: usize,
    ) -> Self {
        let propulsion = Propulsion::new(config.stages.clone());
        FlightState {
            config,
            body,
            launch_ref,
            target_ref,
            propulsion,
            phase: Phase::Ascent,
            velocity_matched: false,
            descent_achieved: false,
            burn_dv: 0.0,
            injection_target: 0.0,
            capture_target: 0.0,
            lowering_target: 0.0,
            thrust_accel: 0.0,
            touchdown: None,
            capture_announced: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Copy-on-read views for the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BodySnapshot {
    pub name: String,
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
}

#[derive(Debug, Clone)]
pub struct VehicleSnapshot {
    pub mass: f64,
    pub propellant: f64,
    pub stage: usize,
    pub phase: Phase,
    pub velocity_matched: bool,
    pub descent_achieved: bool,
    pub burn_dv: f64,
    pub touchdown: Option<f64>,
}

/// Read-only view handed out after each batch of ticks. The presentation
/// layer never sees the live records.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub time: f64,
    pub bodies: Vec<BodySnapshot>,
    pub vehicle: Option<VehicleSnapshot>,
}

/// One row of the recorded vehicle track.
#[derive(Debug, Clone, Copy)]
pub struct TrackSample {
    pub time: f64,
    /// Altitude above the launch body's surface, m.
    pub launch_altitude: f64,
    /// Speed relative to the launch body, m/s.
    pub launch_rel_speed: f64,
    /// Altitude above the target body's surface, m.
    pub target_altitude: f64,
    /// Speed relative to the target body, m/s.
    pub target_rel_speed: f64,
    pub mass: f64,
    pub stage: usize,
    pub phase: Phase,
    /// Propulsive acceleration on the sampled tick, m/s^2.
    pub thrust_accel: f64,
}
