use crate::guidance::Phase;
use crate::sim::event::{EventKind, SimEvent};
use crate::sim::state::{Snapshot, TrackSample};

/// Mission statistics condensed from the event log and the recorded track.
#[derive(Debug, Clone, Default)]
pub struct MissionSummary {
    pub parking_orbit_time: Option<f64>,
    pub capture_orbit_time: Option<f64>,
    pub descent_time: Option<f64>,
    /// Time from braking start to surface contact, s.
    pub braking_time: Option<f64>,
    /// Planned maneuver sizes, m/s.
    pub injection_dv: Option<f64>,
    pub capture_dv: Option<f64>,
    pub lowering_dv: Option<f64>,
    pub stagings: usize,
    pub max_launch_altitude: f64,
    pub final_mass: Option<f64>,
    pub elapsed: f64,
}

impl MissionSummary {
    pub fn from_run(events: &[SimEvent], track: &[TrackSample], last: &Snapshot) -> Self {
        let mut summary = MissionSummary {
            elapsed: last.time,
            final_mass: last.vehicle.as_ref().map(|v| v.mass),
            ..Default::default()
        };

        for e in events {
            match e.kind {
                EventKind::Staging { .. } => summary.stagings += 1,
                EventKind::ParkingOrbit => summary.parking_orbit_time = Some(e.time),
                EventKind::CaptureOrbit => summary.capture_orbit_time = Some(e.time),
                EventKind::DescentAchieved => summary.descent_time = Some(e.time),
                EventKind::Touchdown { braking_time } => {
                    summary.braking_time = Some(braking_time)
                }
                EventKind::BurnPlanned { phase, dv } => match phase {
                    Phase::Injection => summary.injection_dv = Some(dv),
                    Phase::Capture => summary.capture_dv = Some(dv),
                    Phase::Lowering => summary.lowering_dv = Some(dv),
                    _ => {}
                },
                EventKind::Cutoff { .. } => {}
            }
        }

        summary.max_launch_altitude = track
            .iter()
            .map(|s| s.launch_altitude)
            .fold(0.0_f64, f64::max);

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::VehicleSnapshot;

    #[test]
    fn summary_folds_events_and_track() {
        let events = vec![
            SimEvent { time: 120.0, kind: EventKind::Staging { from: 0, to: 1 } },
            SimEvent { time: 500.0, kind: EventKind::ParkingOrbit },
            SimEvent {
                time: 3550.0,
                kind: EventKind::BurnPlanned { phase: Phase::Injection, dv: 3_140.0 },
            },
            SimEvent {
                time: 4100.0,
                kind: EventKind::Cutoff { phase: Phase::Injection, dv: 3_188.0 },
            },
            SimEvent { time: 350_500.0, kind: EventKind::Touchdown { braking_time: 510.0 } },
        ];
        let track = vec![TrackSample {
            time: 500.0,
            launch_altitude: 181_000.0,
            launch_rel_speed: 7_800.0,
            target_altitude: 3.8e8,
            target_rel_speed: 900.0,
            mass: 130_000.0,
            stage: 1,
            phase: Phase::Ascent,
            thrust_accel: 0.0,
        }];
        let snap = Snapshot {
            time: 350_500.0,
            bodies: vec![],
            vehicle: Some(VehicleSnapshot {
                mass: 1_100.0,
                propellant: 495.0,
                stage: 4,
                phase: Phase::Braking,
                velocity_matched: true,
                descent_achieved: true,
                burn_dv: 0.0,
                touchdown: Some(510.0),
            }),
        };

        let s = MissionSummary::from_run(&events, &track, &snap);
        assert_eq!(s.stagings, 1);
        assert_eq!(s.parking_orbit_time, Some(500.0));
        assert_eq!(s.injection_dv, Some(3_140.0));
        assert_eq!(s.capture_dv, None);
        assert_eq!(s.braking_time, Some(510.0));
        assert_eq!(s.final_mass, Some(1_100.0));
        assert_eq!(s.max_launch_altitude, 181_000.0);
    }
}
