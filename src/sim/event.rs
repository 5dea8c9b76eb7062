use std::fmt;

use crate::guidance::Phase;

// ---------------------------------------------------------------------------
// Mission events
// ---------------------------------------------------------------------------

/// Discrete events recorded by the simulation, in occurrence order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// A stage burned dry and was jettisoned.
    Staging { from: usize, to: usize },
    /// Parking-orbit insertion about the launch body.
    ParkingOrbit,
    /// A maneuver's delta-v was sized as its phase opened.
    BurnPlanned { phase: Phase, dv: f64 },
    /// Accumulated delta-v met the maneuver target; engine off.
    Cutoff { phase: Phase, dv: f64 },
    /// Circular orbit imposed about the target body.
    CaptureOrbit,
    /// Descent criteria met; thrust locked off for the rest of the run.
    DescentAchieved,
    /// Surface contact. Carries the time since braking start, s.
    Touchdown { braking_time: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:>9.1}s  ", self.time)?;
        match self.kind {
            EventKind::Staging { from, to } => write!(f, "STAGING    {} -> {}", from, to),
            EventKind::ParkingOrbit => write!(f, "PARKING    circular orbit imposed"),
            EventKind::BurnPlanned { phase, dv } => {
                write!(f, "PLAN       {} burn, dv = {:.1} m/s", phase, dv)
            }
            EventKind::Cutoff { phase, dv } => {
                write!(f, "CUTOFF     {} burn complete, dv = {:.1} m/s", phase, dv)
            }
            EventKind::CaptureOrbit => write!(f, "CAPTURE    circular orbit imposed"),
            EventKind::DescentAchieved => write!(f, "DESCENT    contact criteria met"),
            EventKind::Touchdown { braking_time } => {
                write!(f, "TOUCHDOWN  {:.1} s after braking start", braking_time)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_payload() {
        let e = SimEvent {
            time: 3550.0,
            kind: EventKind::BurnPlanned { phase: Phase::Injection, dv: 3140.2 },
        };
        let s = e.to_string();
        assert!(s.contains("injection"));
        assert!(s.contains("3140.2"));
    }
}
