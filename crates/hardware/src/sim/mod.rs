//! Simulation utilities: program loading and the cycle-level scheduler.

pub mod loader;
pub mod simulator;
