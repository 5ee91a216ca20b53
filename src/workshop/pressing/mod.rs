//! Pressing station.
//!
//! Steamed leaves are pressed into a tea cake. The run has no user control:
//! the press plate descends through fixed stages while the pressure gauge
//! climbs, and the finished cake is revealed shortly after completion.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
