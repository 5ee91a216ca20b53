//! Grinding station.
//!
//! A grindstone works the leaves into paste for a fixed-length run while a
//! particle field sprays tea dust. The pressure level picks how fast the leaf
//! pile is consumed and how much dust flies.

pub mod logic;
pub mod particles;
pub mod types;

pub use logic::*;
pub use particles::*;
pub use types::*;
