use std::f64::consts::{FRAC_1_SQRT_2, PI};

use qton::core::quantum::{gates, Circuit, Gate, GateKind};
use qton::QuantumError;

#[test]
fn hadamard_on_zero() {
    let mut qc = Circuit::new(1);
    qc.h(&[0]).unwrap();
    // |+> amplitudes ~ [1/√2, 1/√2]
    let a0 = qc.state_vector()[0].re;
    let a1 = qc.state_vector()[1].re;
    assert!((a0 - 0.70710678).abs() < 1e-6);
    assert!((a1 - 0.70710678).abs() < 1e-6);
}

#[test]
fn cnot_build() {
    let cnot = Gate::new(GateKind::X).controlled(1).matrix().unwrap();
    assert_eq!(cnot.nrows(), 4);
    assert_eq!(cnot.ncols(), 4);
}

#[test]
fn toffoli_build() {
    let ccx = Gate::parse("ccx", &[], false).unwrap().matrix().unwrap();
    assert_eq!(ccx.shape(), (8, 8));
    assert_eq!(ccx.view((6, 6), (2, 2)).clone_owned(), gates::x());
}

#[test]
fn ghz_over_non_adjacent_qubits() {
    let mut qc = Circuit::new(4);
    qc.h(&[3]).unwrap();
    qc.cx(3, 0).unwrap();
    qc.cx(0, 1).unwrap();
    let sv = qc.state_vector();
    assert!((sv[0b0000].re - FRAC_1_SQRT_2).abs() < 1e-12);
    assert!((sv[0b1101].re - FRAC_1_SQRT_2).abs() < 1e-12);
    assert!((qc.state().norm_sqr() - 1.0).abs() < 1e-12);
}

#[test]
fn ccz_flips_sign_of_all_ones_only() {
    let mut qc = Circuit::new(3);
    qc.h(&[0, 1, 2]).unwrap();
    qc.ccz(0, 1, 2).unwrap();
    let amp = 1.0 / 8f64.sqrt();
    for (i, a) in qc.state_vector().iter().enumerate() {
        let expected = if i == 0b111 { -amp } else { amp };
        assert!((a.re - expected).abs() < 1e-12, "amp {i}");
    }
}

#[test]
fn controlled_rotation_by_two_pi_is_minus_one_on_target() {
    let mut qc = Circuit::new(2);
    qc.x(&[0, 1]).unwrap();
    qc.crx(2.0 * PI, 0, 1).unwrap();
    assert!((qc.state_vector()[0b11].re + 1.0).abs() < 1e-12);
}

#[test]
fn facade_surfaces_engine_errors() {
    let mut qc = Circuit::new(2);
    assert!(matches!(qc.cx(1, 1), Err(QuantumError::InvalidQubits(_))));
    assert!(matches!(qc.ccx(0, 1, 2), Err(QuantumError::InvalidQubits(_))));
    assert!(matches!(qc.h(&[5]), Err(QuantumError::InvalidQubits(_))));
}

#[test]
fn initialize_then_measure() {
    let mut qc = Circuit::new(2);
    qc.initialize(&[
        num_complex::Complex64::new(0.0, 0.0),
        num_complex::Complex64::new(0.0, 0.0),
        num_complex::Complex64::new(0.0, 2.0),
    ])
    .unwrap();
    let counts = qc.measure_seeded(64, 1).unwrap();
    assert_eq!(counts.get("10"), Some(&64));
}
