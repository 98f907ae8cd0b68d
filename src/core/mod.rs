//! Core module tree: errors, tracing setup and the quantum engine.

pub mod debug;
pub mod error;
pub mod quantum;
