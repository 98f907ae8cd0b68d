//! Structural transforms on gate matrices: control embedding, adjoints,
//! Kronecker products and full-register lifts.
use super::types::{c, checked_dim, qubit_weight, GateMatrix, MAX_GATE_QUBITS};
use crate::core::error::{QuantumError, QuantumResult};

/// Number of qubits a square matrix acts on, i.e. log2 of its dimension.
pub fn qubit_count(m: &GateMatrix) -> QuantumResult<usize> {
    let (rows, cols) = (m.nrows(), m.ncols());
    if rows != cols {
        return Err(QuantumError::dimension(format!("not a square matrix ({rows}x{cols})")));
    }
    if !rows.is_power_of_two() {
        return Err(QuantumError::dimension(format!(
            "dimension {rows} is not a power of two"
        )));
    }
    Ok(rows.trailing_zeros() as usize)
}

/// Embed `m` as the trailing block of a larger identity.
///
/// The result acts as identity unless all `num_ctrl` leading (most
/// significant) qubits are 1, in which case it applies `m` to the rest.
/// Fails with a dimension error past [`MAX_GATE_QUBITS`] total qubits.
pub fn add_control(m: &GateMatrix, num_ctrl: usize) -> QuantumResult<GateMatrix> {
    let k = qubit_count(m)?;
    let dim = checked_dim(k.saturating_add(num_ctrl), MAX_GATE_QUBITS)?;
    let offset = dim - m.nrows();
    let mut out = GateMatrix::identity(dim, dim);
    out.view_mut((offset, offset), (m.nrows(), m.ncols())).copy_from(m);
    Ok(out)
}

/// Conjugate transpose (dagger).
pub fn invert(m: &GateMatrix) -> GateMatrix {
    m.adjoint()
}

/// Kronecker product A ⊗ B
pub fn kron(a: &GateMatrix, b: &GateMatrix) -> GateMatrix {
    a.kronecker(b)
}

/// Materialize `u` as a full 2^n operator acting on `qubits`.
///
/// `qubits[0]` is the most significant local bit of `u`, matching the
/// engine's control-first ordering. This builds the whole 2^n x 2^n matrix
/// and is meant for small registers and cross-checks, never for the
/// simulation path.
pub fn lift(u: &GateMatrix, n_qubits: usize, qubits: &[usize]) -> QuantumResult<GateMatrix> {
    let k = qubit_count(u)?;
    if k != qubits.len() {
        return Err(QuantumError::dimension(format!(
            "{k}-qubit matrix cannot act on {} qubits",
            qubits.len()
        )));
    }
    for (pos, &q) in qubits.iter().enumerate() {
        if q >= n_qubits || qubits[..pos].contains(&q) {
            return Err(QuantumError::invalid_qubits(format!("{qubits:?} on {n_qubits} qubits")));
        }
    }

    let weights: Vec<usize> = qubits.iter().map(|&q| qubit_weight(n_qubits, q)).collect();
    let target_mask = weights.iter().fold(0, |acc, w| acc | w);
    let local = |basis: usize| {
        weights
            .iter()
            .fold(0usize, |acc, &w| (acc << 1) | usize::from(basis & w != 0))
    };

    let dim = checked_dim(n_qubits, MAX_GATE_QUBITS)?;
    let mut out = GateMatrix::from_element(dim, dim, c(0.0, 0.0));
    for row in 0..dim {
        for col in 0..dim {
            if row & !target_mask == col & !target_mask {
                out[(row, col)] = u[(local(row), local(col))];
            }
        }
    }
    Ok(out)
}
