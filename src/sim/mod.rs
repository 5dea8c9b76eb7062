pub mod event;
pub mod runner;
pub mod state;

pub use event::{EventKind, SimEvent};
pub use runner::Simulation;
pub use state::{FlightState, Snapshot, TrackSample};
