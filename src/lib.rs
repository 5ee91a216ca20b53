//! Teacraft - terminal tea workshop.
//!
//! Three process stations (steaming, grinding, pressing) built on a shared
//! fixed-step progress driver. This module exposes the simulation for the
//! terminal binary, the headless simulator and tests.

pub mod assets;
pub mod build_info;
pub mod config;
pub mod error;
pub mod process;
pub mod simulator;
pub mod utils;
pub mod workshop;

pub use config::WorkshopConfig;
pub use error::AssetError;
pub use process::{FinishReason, RunPhase, Verdict};
pub use workshop::{CraftStep, Workshop, WorkshopInput};
