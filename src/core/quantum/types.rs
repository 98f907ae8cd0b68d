//! Core quantum types: amplitudes, gate matrices and the basis-index convention.
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;

use crate::core::error::{QuantumError, QuantumResult};

pub const EPS: f64 = 1e-12;

/// Widest register a dense state vector is built for (2^30 amplitudes).
pub const MAX_QUBITS: usize = 30;

/// Widest operator `add_control` and `lift` will materialize.
pub const MAX_GATE_QUBITS: usize = 10;

/// Dense amplitude vector over 2^N basis states.
pub type Amplitudes = DVector<C64>;

/// Square complex matrix of dimension 2^k.
pub type GateMatrix = DMatrix<C64>;

/// Qubit 0 is the most significant bit of every basis index.
///
/// A basis index `i` of an N-qubit register reads as the N-bit string
/// `b0 b1 … b(N-1)` with `b0` the value of qubit 0. This is the opposite of
/// the little-endian convention used by Qiskit and must not change: the
/// engine's index arithmetic and the builder's control embedding both rely
/// on it.
pub const QUBIT0_IS_MSB: bool = true;

#[inline]
pub fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

/// Bit weight of qubit `q` inside an `num_qubits`-qubit basis index.
#[inline]
pub fn qubit_weight(num_qubits: usize, q: usize) -> usize {
    debug_assert!(q < num_qubits);
    1usize << (num_qubits - 1 - q)
}

/// 2^`num_qubits`, or a dimension error once it would exceed 2^`cap`.
pub fn checked_dim(num_qubits: usize, cap: usize) -> QuantumResult<usize> {
    let too_wide = || {
        QuantumError::dimension(format!(
            "{num_qubits} qubits exceeds the limit of {cap}"
        ))
    };
    if num_qubits > cap {
        return Err(too_wide());
    }
    u32::try_from(num_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .ok_or_else(too_wide)
}

/// N-digit big-endian binary rendering of a basis index.
pub fn basis_label(index: usize, num_qubits: usize) -> String {
    if num_qubits == 0 {
        return String::new();
    }
    format!("{index:0width$b}", width = num_qubits)
}

/// Check U^† U = I within `tol` (max-abs entry norm).
pub fn is_unitary(m: &GateMatrix, tol: f64) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    let u_dag_u = m.adjoint() * m;
    let i = GateMatrix::identity(m.nrows(), m.ncols());
    let max_diff = (u_dag_u - i)
        .iter()
        .map(|z| z.norm())
        .fold(0.0_f64, f64::max);
    max_diff <= tol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_dim_caps_width() {
        assert_eq!(checked_dim(0, MAX_QUBITS), Ok(1));
        assert_eq!(checked_dim(3, MAX_QUBITS), Ok(8));
        assert!(matches!(checked_dim(MAX_QUBITS + 1, MAX_QUBITS), Err(QuantumError::Dimension(_))));
        assert!(matches!(checked_dim(64, usize::MAX), Err(QuantumError::Dimension(_))));
    }

    #[test]
    fn qubit_zero_is_most_significant() {
        assert!(QUBIT0_IS_MSB);
        assert_eq!(qubit_weight(3, 0), 4);
        assert_eq!(qubit_weight(3, 1), 2);
        assert_eq!(qubit_weight(3, 2), 1);
    }

    #[test]
    fn labels_are_big_endian_and_padded() {
        assert_eq!(basis_label(1, 3), "001");
        assert_eq!(basis_label(4, 3), "100");
        assert_eq!(basis_label(0, 0), "");
    }

    #[test]
    fn rejects_non_square_as_unitary() {
        let m = GateMatrix::from_element(2, 3, c(0.0, 0.0));
        assert!(!is_unitary(&m, 1e-9));
    }
}
