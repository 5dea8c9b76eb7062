pub mod propulsion;
pub mod stage;

pub use propulsion::{Propulsion, Staging};
pub use stage::{stack_delta_v, Stage, StageBuilder};
