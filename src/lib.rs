//! qton: a state-vector quantum circuit simulator.
//!
//! The library is the engine ([`core::quantum`]); the `qton` binary runs
//! TOML circuit scripts through it.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;

pub use crate::core::error::{QuantumError, QuantumResult};
pub use crate::core::quantum::{Circuit, Gate, GateKind, StateVector};
