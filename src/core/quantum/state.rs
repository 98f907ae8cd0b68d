//! Dense state-vector engine.
//!
//! The engine never builds the full 2^N x 2^N operator. For a k-qubit gate it
//! works out which 2^k amplitudes vary together and multiplies the gate into
//! each such block in place:
//!
//! - one-qubit gates swap the target into the least significant position,
//!   walk stride-2 pairs, then swap back;
//! - two- and three-qubit gates enumerate basis indices in the register order
//!   `[last named, …, first named, remaining qubits descending]`, so every run
//!   of 2^k consecutive indices is one block with the first-named qubit as the
//!   most significant local bit. That is where [`ops::add_control`] places
//!   controls, so a controlled matrix must be called with its controls first.
//!
//! [`ops::add_control`]: super::ops::add_control
use std::collections::{BTreeMap, BTreeSet};

use nalgebra::DVector;
use num_complex::Complex64 as C64;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use tracing::{debug, trace};

use super::types::{basis_label, c, checked_dim, qubit_weight, Amplitudes, GateMatrix, MAX_QUBITS};
use crate::core::error::{QuantumError, QuantumResult};

/// Measurement histogram keyed by big-endian basis label.
pub type Counts = BTreeMap<String, usize>;

#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amps: Amplitudes,
}

impl StateVector {
    /// |0…0⟩ over `num_qubits` qubits.
    ///
    /// Panics past [`MAX_QUBITS`]; use [`StateVector::try_new`] for widths
    /// that come from input.
    pub fn new(num_qubits: usize) -> Self {
        assert!(
            num_qubits <= MAX_QUBITS,
            "{num_qubits} qubits exceeds the limit of {MAX_QUBITS}"
        );
        Self::ground(num_qubits, 1usize << num_qubits)
    }

    /// |0…0⟩, or a dimension error when `num_qubits` exceeds [`MAX_QUBITS`].
    pub fn try_new(num_qubits: usize) -> QuantumResult<Self> {
        let len = checked_dim(num_qubits, MAX_QUBITS)?;
        Ok(Self::ground(num_qubits, len))
    }

    fn ground(num_qubits: usize, len: usize) -> Self {
        let mut amps = DVector::from_element(len, c(0.0, 0.0));
        amps[0] = c(1.0, 0.0);
        Self { num_qubits, amps }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn len(&self) -> usize {
        self.amps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amps.is_empty()
    }

    pub fn amplitudes(&self) -> &Amplitudes {
        &self.amps
    }

    pub fn as_slice(&self) -> &[C64] {
        self.amps.as_slice()
    }

    /// Σ|amplitude|²
    pub fn norm_sqr(&self) -> f64 {
        self.amps.iter().map(|z| z.norm_sqr()).sum()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|z| z.norm_sqr()).collect()
    }

    /// Replace the state with `values`, zero-padded or truncated to 2^N and
    /// normalized.
    pub fn initialize(&mut self, values: &[C64]) -> QuantumResult<()> {
        let mut ket = DVector::from_element(self.amps.len(), c(0.0, 0.0));
        for (slot, v) in ket.iter_mut().zip(values) {
            *slot = *v;
        }
        let norm = ket.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Err(QuantumError::normalization("zero norm detected"));
        }
        ket /= C64::from(norm);
        debug!(num_qubits = self.num_qubits, given = values.len(), norm, "initialize");
        self.amps = ket;
        Ok(())
    }

    fn check_qubit(&self, q: usize) -> QuantumResult<()> {
        if q >= self.num_qubits {
            return Err(QuantumError::invalid_qubits(format!(
                "qubit {q} out of range for {} qubit(s)",
                self.num_qubits
            )));
        }
        Ok(())
    }

    fn check_matrix(m: &GateMatrix, dim: usize) -> QuantumResult<()> {
        if m.nrows() != dim || m.ncols() != dim {
            return Err(QuantumError::dimension(format!(
                "expected a {dim}x{dim} matrix, got {}x{}",
                m.nrows(),
                m.ncols()
            )));
        }
        Ok(())
    }

    fn check_distinct(&self, qubits: &[usize]) -> QuantumResult<()> {
        for (pos, &q) in qubits.iter().enumerate() {
            self.check_qubit(q)?;
            if qubits[..pos].contains(&q) {
                return Err(QuantumError::invalid_qubits(format!(
                    "qubits must be distinct, got {qubits:?}"
                )));
            }
        }
        Ok(())
    }

    /// Exchange the roles of qubits `a` and `b`.
    ///
    /// Every index whose bits at `a` and `b` differ takes the amplitude of the
    /// index with those two bits exchanged. Reads come from a snapshot taken
    /// before the pass.
    pub(crate) fn swap_qubits(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (wa, wb) = (
            qubit_weight(self.num_qubits, a),
            qubit_weight(self.num_qubits, b),
        );
        let snapshot = self.amps.clone();
        for i in 0..snapshot.len() {
            if (i & wa != 0) != (i & wb != 0) {
                self.amps[i] = snapshot[i ^ wa ^ wb];
            }
        }
    }

    /// Apply a 2x2 matrix to each distinct qubit in `targets`, one at a time.
    ///
    /// Targets are handled independently and sequentially, which equals the
    /// joint action only for gates that factor per qubit (every uncontrolled
    /// single-qubit gate applied to several wires does).
    pub fn apply_one_qubit_gate(&mut self, m: &GateMatrix, targets: &[usize]) -> QuantumResult<()> {
        Self::check_matrix(m, 2)?;
        if targets.is_empty() {
            return Err(QuantumError::invalid_qubits("no target qubit given"));
        }
        for &q in targets {
            self.check_qubit(q)?;
        }
        trace!(targets = ?targets, "apply one-qubit gate");

        let last = self.num_qubits - 1;
        let distinct: BTreeSet<usize> = targets.iter().copied().collect();
        for q in distinct {
            self.swap_qubits(q, last);
            for j in (0..self.amps.len()).step_by(2) {
                let (a0, a1) = (self.amps[j], self.amps[j + 1]);
                self.amps[j] = m[(0, 0)] * a0 + m[(0, 1)] * a1;
                self.amps[j + 1] = m[(1, 0)] * a0 + m[(1, 1)] * a1;
            }
            self.swap_qubits(q, last);
        }
        Ok(())
    }

    /// Apply a 4x4 matrix with `qubit1` as the most significant local bit.
    pub fn apply_two_qubit_gate(
        &mut self,
        m: &GateMatrix,
        qubit1: usize,
        qubit2: usize,
    ) -> QuantumResult<()> {
        Self::check_matrix(m, 4)?;
        self.check_distinct(&[qubit1, qubit2])?;
        trace!(qubit1, qubit2, "apply two-qubit gate");
        self.apply_blocked(m, &[qubit2, qubit1]);
        Ok(())
    }

    /// Apply an 8x8 matrix with `qubit1` as the most significant local bit.
    pub fn apply_three_qubit_gate(
        &mut self,
        m: &GateMatrix,
        qubit1: usize,
        qubit2: usize,
        qubit3: usize,
    ) -> QuantumResult<()> {
        Self::check_matrix(m, 8)?;
        self.check_distinct(&[qubit1, qubit2, qubit3])?;
        trace!(qubit1, qubit2, qubit3, "apply three-qubit gate");
        self.apply_blocked(m, &[qubit3, qubit2, qubit1]);
        Ok(())
    }

    /// Basis indices in register order: `leading` first (least significant
    /// offset bit first), then the remaining qubits in descending order.
    fn register_indices(&self, leading: &[usize]) -> Vec<usize> {
        let n = self.num_qubits;
        let mut order = leading.to_vec();
        order.extend((0..n).rev().filter(|q| !leading.contains(q)));
        let weights: Vec<usize> = order.iter().map(|&q| qubit_weight(n, q)).collect();

        (0..1usize << n)
            .map(|offset| {
                weights
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| (offset >> j) & 1 == 1)
                    .fold(0, |acc, (_, w)| acc | w)
            })
            .collect()
    }

    fn apply_blocked(&mut self, m: &GateMatrix, leading: &[usize]) {
        let dim = m.nrows();
        let indices = self.register_indices(leading);
        for block in indices.chunks(dim) {
            let local = DVector::from_iterator(dim, block.iter().map(|&i| self.amps[i]));
            let out = m * local;
            for (k, &i) in block.iter().enumerate() {
                self.amps[i] = out[k];
            }
        }
    }

    /// Draw `shots` basis states from |amplitude|² using the thread RNG.
    pub fn sample(&self, shots: usize) -> QuantumResult<Counts> {
        self.sample_with_rng(shots, &mut rand::thread_rng())
    }

    /// Draw `shots` basis states from |amplitude|² with a seeded RNG.
    pub fn sample_seeded(&self, shots: usize, seed: u64) -> QuantumResult<Counts> {
        self.sample_with_rng(shots, &mut StdRng::seed_from_u64(seed))
    }

    /// The probabilities are taken as they are; the state is assumed to be
    /// normalized already.
    pub fn sample_with_rng<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> QuantumResult<Counts> {
        let mut counts = Counts::new();
        if shots == 0 {
            return Ok(counts);
        }
        let dist = WeightedIndex::new(self.probabilities())
            .map_err(|e| QuantumError::normalization(format!("cannot sample: {e}")))?;
        let mut hits = vec![0usize; self.amps.len()];
        for _ in 0..shots {
            hits[dist.sample(rng)] += 1;
        }
        for (index, n) in hits.into_iter().enumerate().filter(|(_, n)| *n > 0) {
            counts.insert(basis_label(index, self.num_qubits), n);
        }
        debug!(shots, outcomes = counts.len(), "sample");
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quantum::{gates, ops};

    fn ket(values: &[f64]) -> Vec<C64> {
        values.iter().map(|&v| c(v, 0.0)).collect()
    }

    fn assert_close(actual: &[C64], expected: &[C64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).norm() < 1e-9, "amp {i}: {a} != {e}");
        }
    }

    #[test]
    fn swap_exchanges_bit_positions() {
        // |100> -> |001> when swapping qubits 0 and 2
        let mut sv = StateVector::new(3);
        sv.initialize(&ket(&[0.0, 0.0, 0.0, 0.0, 1.0])).unwrap();
        sv.swap_qubits(0, 2);
        assert_eq!(sv.as_slice()[1], c(1.0, 0.0));
        assert_eq!(sv.norm_sqr(), 1.0);
    }

    #[test]
    fn swap_with_itself_is_noop() {
        let mut sv = StateVector::new(2);
        sv.initialize(&ket(&[0.1, 0.2, 0.3, 0.4])).unwrap();
        let before = sv.clone();
        sv.swap_qubits(1, 1);
        assert_eq!(sv, before);
    }

    #[test]
    fn register_order_puts_first_named_qubit_high() {
        let sv = StateVector::new(3);
        // order [q2=2, q1=0, rest=1]: offsets 0..4 walk (q0,q2) = 00,01,10,11
        let idx = sv.register_indices(&[2, 0]);
        assert_eq!(&idx[..4], &[0b000, 0b001, 0b100, 0b101]);
        assert_eq!(&idx[4..], &[0b010, 0b011, 0b110, 0b111]);
    }

    #[test]
    fn x_on_middle_qubit_flips_middle_bit() {
        let mut sv = StateVector::new(3);
        sv.apply_one_qubit_gate(&gates::x(), &[1]).unwrap();
        assert_eq!(sv.as_slice()[0b010], c(1.0, 0.0));
    }

    #[test]
    fn duplicate_targets_collapse() {
        let mut sv = StateVector::new(2);
        sv.apply_one_qubit_gate(&gates::x(), &[0, 0]).unwrap();
        assert_eq!(sv.as_slice()[0b10], c(1.0, 0.0));
    }

    #[test]
    fn empty_targets_rejected() {
        let mut sv = StateVector::new(2);
        assert!(matches!(
            sv.apply_one_qubit_gate(&gates::x(), &[]),
            Err(QuantumError::InvalidQubits(_))
        ));
    }

    #[test]
    fn wrong_matrix_size_rejected() {
        let mut sv = StateVector::new(2);
        assert!(matches!(
            sv.apply_two_qubit_gate(&gates::x(), 0, 1),
            Err(QuantumError::Dimension(_))
        ));
    }

    #[test]
    fn out_of_range_rejected_before_any_write() {
        let mut sv = StateVector::new(2);
        let before = sv.clone();
        assert!(sv.apply_one_qubit_gate(&gates::x(), &[0, 2]).is_err());
        assert_eq!(sv, before);
    }

    #[test]
    fn cnot_with_control_below_target() {
        // control qubit 1, target qubit 0: |01> -> |11>
        let mut sv = StateVector::new(2);
        sv.initialize(&ket(&[0.0, 1.0, 0.0, 0.0])).unwrap();
        let cx = ops::add_control(&gates::x(), 1).unwrap();
        sv.apply_two_qubit_gate(&cx, 1, 0).unwrap();
        assert_close(sv.as_slice(), &ket(&[0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn toffoli_on_non_adjacent_qubits() {
        // controls 0 and 3, target 1 on |1001> -> |1101>
        let mut sv = StateVector::new(4);
        let mut start = vec![c(0.0, 0.0); 16];
        start[0b1001] = c(1.0, 0.0);
        sv.initialize(&start).unwrap();
        let ccx = ops::add_control(&gates::x(), 2).unwrap();
        sv.apply_three_qubit_gate(&ccx, 0, 3, 1).unwrap();
        assert_eq!(sv.as_slice()[0b1101], c(1.0, 0.0));
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let mut sv = StateVector::new(2);
        sv.apply_one_qubit_gate(&gates::h(), &[0, 1]).unwrap();
        let a = sv.sample_seeded(500, 42).unwrap();
        let b = sv.sample_seeded(500, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.values().sum::<usize>(), 500);
    }

    #[test]
    fn try_new_rejects_oversized_registers() {
        assert_eq!(StateVector::try_new(3).unwrap(), StateVector::new(3));
        for n in [MAX_QUBITS + 1, 64, usize::MAX] {
            assert!(matches!(StateVector::try_new(n), Err(QuantumError::Dimension(_))), "{n}");
        }
    }

    #[test]
    #[should_panic(expected = "exceeds the limit")]
    fn new_panics_on_oversized_registers() {
        let _ = StateVector::new(64);
    }

    #[test]
    fn zero_shots_give_empty_counts() {
        let sv = StateVector::new(1);
        assert!(sv.sample(0).unwrap().is_empty());
    }
}
