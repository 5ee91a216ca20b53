//! Steaming station.
//!
//! Fresh leaves are steamed over an adjustable fire. Heat sets how fast the
//! steaming ticks and how fast the leaves lose moisture; the run ends when
//! steaming completes or the leaves dry out, whichever comes first.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
