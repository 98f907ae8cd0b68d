//! Named-gate front end over [`StateVector`].
//!
//! Qubits are indexed from 0, and qubit 0 is the leftmost character of every
//! basis label:
//!
//! ```ignore
//! let mut qc = Circuit::new(2);
//! qc.h(&[0])?;
//! qc.cx(0, 1)?;
//! let counts = qc.measure(1000)?; // roughly {"00": 500, "11": 500}
//! ```
use num_complex::Complex64 as C64;

use super::gates::{Gate, GateKind};
use super::state::{Counts, StateVector};
use crate::core::error::{QuantumError, QuantumResult};

#[derive(Clone, Debug, PartialEq)]
pub struct Circuit {
    state: StateVector,
}

impl Circuit {
    /// Starts from |0…0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self { state: StateVector::new(num_qubits) }
    }

    /// Like [`Circuit::new`], with the register width checked.
    pub fn try_new(num_qubits: usize) -> QuantumResult<Self> {
        Ok(Self { state: StateVector::try_new(num_qubits)? })
    }

    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits()
    }

    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn state_vector(&self) -> &[C64] {
        self.state.as_slice()
    }

    pub fn initialize(&mut self, values: &[C64]) -> QuantumResult<()> {
        self.state.initialize(values)
    }

    pub fn measure(&self, shots: usize) -> QuantumResult<Counts> {
        self.state.sample(shots)
    }

    pub fn measure_seeded(&self, shots: usize, seed: u64) -> QuantumResult<Counts> {
        self.state.sample_seeded(shots, seed)
    }

    /// Apply any gate, dispatching on the size of its matrix.
    ///
    /// A 2x2 matrix goes to every qubit in `qubits`; larger matrices need
    /// exactly as many qubits as they act on, controls first. The qubit
    /// count is checked against [`Gate::arity`] before any matrix is built.
    pub fn apply(&mut self, gate: &Gate, qubits: &[usize]) -> QuantumResult<()> {
        let arity = gate.arity();
        if arity > 1 && qubits.len() != arity {
            return Err(QuantumError::invalid_qubits(format!(
                "{gate} acts on {arity} qubits, got {qubits:?}"
            )));
        }
        if arity > 3 {
            return Err(QuantumError::dimension(format!(
                "{gate} acts on {arity} qubits; only 1-3 qubit gates can be applied"
            )));
        }
        let m = gate.matrix()?;
        match (m.nrows(), qubits) {
            (2, _) => self.state.apply_one_qubit_gate(&m, qubits),
            (4, &[a, b]) => self.state.apply_two_qubit_gate(&m, a, b),
            (8, &[a, b, c]) => self.state.apply_three_qubit_gate(&m, a, b, c),
            (4 | 8, _) => Err(QuantumError::invalid_qubits(format!(
                "{gate} acts on {} qubits, got {qubits:?}",
                gate.arity()
            ))),
            (dim, _) => Err(QuantumError::dimension(format!(
                "{gate} has a {dim}x{dim} matrix; only 1-3 qubit gates can be applied"
            ))),
        }
    }

    fn one(&mut self, kind: GateKind, inverse: bool, targ: &[usize]) -> QuantumResult<()> {
        let m = Gate::new(kind).dagger(inverse).matrix()?;
        self.state.apply_one_qubit_gate(&m, targ)
    }

    fn two(&mut self, gate: Gate, qubit1: usize, qubit2: usize) -> QuantumResult<()> {
        let m = gate.matrix()?;
        self.state.apply_two_qubit_gate(&m, qubit1, qubit2)
    }

    fn three(&mut self, gate: Gate, qubit1: usize, qubit2: usize, qubit3: usize) -> QuantumResult<()> {
        let m = gate.matrix()?;
        self.state.apply_three_qubit_gate(&m, qubit1, qubit2, qubit3)
    }

    fn c1(&mut self, kind: GateKind, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.two(Gate::new(kind).controlled(1), ctrl, targ)
    }

    fn c2(&mut self, kind: GateKind, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.three(Gate::new(kind).controlled(2), ctrl1, ctrl2, targ)
    }

    // Single-qubit gates. Several targets apply the gate to each of them.

    pub fn i(&mut self, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::I, false, targ)
    }
    pub fn h(&mut self, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::H, false, targ)
    }
    pub fn x(&mut self, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::X, false, targ)
    }
    pub fn y(&mut self, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::Y, false, targ)
    }
    pub fn z(&mut self, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::Z, false, targ)
    }
    pub fn s(&mut self, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::S, false, targ)
    }
    pub fn sdg(&mut self, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::S, true, targ)
    }
    pub fn t(&mut self, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::T, false, targ)
    }
    pub fn tdg(&mut self, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::T, true, targ)
    }
    pub fn p(&mut self, phi: f64, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::P { phi }, false, targ)
    }
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, gamma: f64, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::U { theta, phi, lambda, gamma }, false, targ)
    }
    pub fn rx(&mut self, theta: f64, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::Rx { theta }, false, targ)
    }
    pub fn ry(&mut self, theta: f64, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::Ry { theta }, false, targ)
    }
    pub fn rz(&mut self, theta: f64, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::Rz { theta }, false, targ)
    }
    pub fn u1(&mut self, lambda: f64, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::U1 { lambda }, false, targ)
    }
    pub fn u2(&mut self, phi: f64, lambda: f64, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::U2 { phi, lambda }, false, targ)
    }
    pub fn u3(&mut self, theta: f64, phi: f64, lambda: f64, targ: &[usize]) -> QuantumResult<()> {
        self.one(GateKind::U3 { theta, phi, lambda }, false, targ)
    }

    // Two-qubit gates: (ctrl, targ).

    pub fn swap(&mut self, qubit1: usize, qubit2: usize) -> QuantumResult<()> {
        self.two(Gate::new(GateKind::Swap), qubit1, qubit2)
    }
    pub fn ch(&mut self, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::H, ctrl, targ)
    }
    pub fn cx(&mut self, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::X, ctrl, targ)
    }
    pub fn cy(&mut self, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::Y, ctrl, targ)
    }
    pub fn cz(&mut self, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::Z, ctrl, targ)
    }
    pub fn cs(&mut self, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::S, ctrl, targ)
    }
    pub fn ct(&mut self, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::T, ctrl, targ)
    }
    pub fn cp(&mut self, phi: f64, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::P { phi }, ctrl, targ)
    }
    pub fn cu(&mut self, theta: f64, phi: f64, lambda: f64, gamma: f64, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::U { theta, phi, lambda, gamma }, ctrl, targ)
    }
    pub fn crx(&mut self, theta: f64, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::Rx { theta }, ctrl, targ)
    }
    pub fn cry(&mut self, theta: f64, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::Ry { theta }, ctrl, targ)
    }
    pub fn crz(&mut self, theta: f64, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::Rz { theta }, ctrl, targ)
    }
    pub fn cu1(&mut self, lambda: f64, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::U1 { lambda }, ctrl, targ)
    }
    pub fn cu2(&mut self, phi: f64, lambda: f64, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::U2 { phi, lambda }, ctrl, targ)
    }
    pub fn cu3(&mut self, theta: f64, phi: f64, lambda: f64, ctrl: usize, targ: usize) -> QuantumResult<()> {
        self.c1(GateKind::U3 { theta, phi, lambda }, ctrl, targ)
    }

    // Three-qubit gates: (ctrl1, ctrl2, targ), except cswap(ctrl, qubit1, qubit2).

    pub fn cswap(&mut self, ctrl: usize, qubit1: usize, qubit2: usize) -> QuantumResult<()> {
        self.three(Gate::new(GateKind::Swap).controlled(1), ctrl, qubit1, qubit2)
    }
    pub fn cch(&mut self, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.c2(GateKind::H, ctrl1, ctrl2, targ)
    }
    pub fn ccx(&mut self, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.c2(GateKind::X, ctrl1, ctrl2, targ)
    }
    pub fn ccy(&mut self, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.c2(GateKind::Y, ctrl1, ctrl2, targ)
    }
    pub fn ccz(&mut self, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.c2(GateKind::Z, ctrl1, ctrl2, targ)
    }
    pub fn ccs(&mut self, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.c2(GateKind::S, ctrl1, ctrl2, targ)
    }
    pub fn cct(&mut self, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.c2(GateKind::T, ctrl1, ctrl2, targ)
    }
    pub fn ccp(&mut self, phi: f64, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.c2(GateKind::P { phi }, ctrl1, ctrl2, targ)
    }
    #[allow(clippy::too_many_arguments)]
    pub fn ccu(
        &mut self,
        theta: f64,
        phi: f64,
        lambda: f64,
        gamma: f64,
        ctrl1: usize,
        ctrl2: usize,
        targ: usize,
    ) -> QuantumResult<()> {
        self.c2(GateKind::U { theta, phi, lambda, gamma }, ctrl1, ctrl2, targ)
    }
    pub fn ccrx(&mut self, theta: f64, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.c2(GateKind::Rx { theta }, ctrl1, ctrl2, targ)
    }
    pub fn ccry(&mut self, theta: f64, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.c2(GateKind::Ry { theta }, ctrl1, ctrl2, targ)
    }
    pub fn ccrz(&mut self, theta: f64, ctrl1: usize, ctrl2: usize, targ: usize) -> QuantumResult<()> {
        self.c2(GateKind::Rz { theta }, ctrl1, ctrl2, targ)
    }
}
