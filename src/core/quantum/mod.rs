//! State-vector quantum circuit simulation.
//!
//! - [`gates`] / [`ops`]: gate matrices and the transforms that derive
//!   controlled and dagger variants.
//! - [`state`]: the amplitude vector and the 1/2/3-qubit apply paths.
//! - [`circuit`]: named gates on top of the engine.
//! - [`script`]: TOML circuit descriptions replayed through [`circuit`].

pub mod circuit;
pub mod gates;
pub mod ops;
pub mod script;
pub mod state;
pub mod types;

pub use circuit::Circuit;
pub use gates::{build_base, Gate, GateKind};
pub use ops::{add_control, invert, kron, lift};
pub use script::{Op, Script};
pub use state::{Counts, StateVector};
pub use types::{basis_label, GateMatrix, MAX_GATE_QUBITS, MAX_QUBITS, QUBIT0_IS_MSB};
