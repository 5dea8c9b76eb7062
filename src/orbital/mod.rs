pub mod maneuvers;

pub use maneuvers::{hohmann, HohmannTransfer};
