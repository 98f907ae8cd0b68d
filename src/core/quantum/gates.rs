//! Standard quantum gates and builders.
//!
//! Every gate family is a variant of [`GateKind`] carrying its angles; a
//! [`Gate`] adds the number of controls and the dagger flag. Controlled and
//! inverse variants are derived with [`ops::add_control`] and
//! [`ops::invert`] rather than written out by hand.
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;

use nalgebra::DMatrix;
use num_complex::Complex64 as C64;
use serde::{Deserialize, Serialize};

use super::ops;
use super::types::{c, GateMatrix};
use crate::core::error::{QuantumError, QuantumResult};

pub fn i2() -> DMatrix<C64> {
    DMatrix::identity(2, 2)
}
pub fn x() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)])
}
pub fn y() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, 0.0)])
}
pub fn z() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)])
}
pub fn h() -> DMatrix<C64> {
    let s = FRAC_1_SQRT_2;
    DMatrix::from_row_slice(2, 2, &[c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)])
}
pub fn s() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 1.0)])
}
pub fn t() -> DMatrix<C64> {
    let phi = FRAC_PI_4;
    DMatrix::from_row_slice(
        2,
        2,
        &[
            c(1.0, 0.0),
            c(0.0, 0.0),
            c(0.0, 0.0),
            c(phi.cos(), phi.sin()),
        ],
    )
}
pub fn swap() -> DMatrix<C64> {
    let (o, l) = (c(0.0, 0.0), c(1.0, 0.0));
    DMatrix::from_row_slice(
        4,
        4,
        &[
            l, o, o, o, //
            o, o, l, o, //
            o, l, o, o, //
            o, o, o, l,
        ],
    )
}
pub fn phase(phi: f64) -> DMatrix<C64> {
    DMatrix::from_row_slice(
        2,
        2,
        &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), C64::from_polar(1.0, phi)],
    )
}
pub fn rx(theta: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    DMatrix::from_row_slice(2, 2, &[c(c0, 0.0), c(0.0, -s0), c(0.0, -s0), c(c0, 0.0)])
}
pub fn ry(theta: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    DMatrix::from_row_slice(2, 2, &[c(c0, 0.0), c(-s0, 0.0), c(s0, 0.0), c(c0, 0.0)])
}
pub fn rz(theta: f64) -> DMatrix<C64> {
    let e_m = C64::from_polar(1.0, -theta / 2.0);
    let e_p = C64::from_polar(1.0, theta / 2.0);
    DMatrix::from_row_slice(2, 2, &[e_m, c(0.0, 0.0), c(0.0, 0.0), e_p])
}
pub fn u1(lambda: f64) -> DMatrix<C64> {
    phase(lambda)
}
pub fn u2(phi: f64, lambda: f64) -> DMatrix<C64> {
    let s = c(FRAC_1_SQRT_2, 0.0);
    DMatrix::from_row_slice(
        2,
        2,
        &[
            s,
            -C64::from_polar(1.0, lambda) * s,
            C64::from_polar(1.0, phi) * s,
            C64::from_polar(1.0, lambda + phi) * s,
        ],
    )
}
pub fn u3(theta: f64, phi: f64, lambda: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    DMatrix::from_row_slice(
        2,
        2,
        &[
            c(c0, 0.0),
            -C64::from_polar(s0, lambda),
            C64::from_polar(s0, phi),
            C64::from_polar(c0, lambda + phi),
        ],
    )
}
pub fn u(theta: f64, phi: f64, lambda: f64, gamma: f64) -> DMatrix<C64> {
    u3(theta, phi, lambda) * C64::from_polar(1.0, gamma)
}

/// Closed set of gate families. Parameterized families carry their angles:
/// θ is an amplitude angle, φ and λ are phase angles, γ a global phase.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    I,
    H,
    X,
    Y,
    Z,
    S,
    T,
    Swap,
    P { phi: f64 },
    Rx { theta: f64 },
    Ry { theta: f64 },
    Rz { theta: f64 },
    U1 { lambda: f64 },
    U2 { phi: f64, lambda: f64 },
    U3 { theta: f64, phi: f64, lambda: f64 },
    U { theta: f64, phi: f64, lambda: f64, gamma: f64 },
}

/// (name, parameter count, description) for every family, in listing order.
pub const FAMILIES: &[(&str, usize, &str)] = &[
    ("i", 0, "Identity"),
    ("h", 0, "Hadamard"),
    ("x", 0, "Pauli-X"),
    ("y", 0, "Pauli-Y"),
    ("z", 0, "Pauli-Z"),
    ("s", 0, "S = diag(1, i)"),
    ("t", 0, "T = diag(1, e^{iπ/4})"),
    ("swap", 0, "Swap (two qubits)"),
    ("p", 1, "Phase(φ) = diag(1, e^{iφ})"),
    ("rx", 1, "Rotation about X by θ"),
    ("ry", 1, "Rotation about Y by θ"),
    ("rz", 1, "Rotation about Z by θ"),
    ("u1", 1, "U1(λ) = diag(1, e^{iλ})"),
    ("u2", 2, "U2(φ, λ)"),
    ("u3", 3, "U3(θ, φ, λ)"),
    ("u", 4, "U(θ, φ, λ, γ) = U3 · e^{iγ}"),
];

impl GateKind {
    /// Resolve a lowercase family name with its parameters.
    pub fn from_name(name: &str, params: &[f64]) -> QuantumResult<Self> {
        let arity = FAMILIES
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, arity, _)| *arity)
            .ok_or_else(|| QuantumError::unknown_gate(name))?;
        if params.len() != arity {
            return Err(QuantumError::invalid_parameters(format!(
                "{name} expects {arity} parameter(s), got {}",
                params.len()
            )));
        }
        let p = params;
        Ok(match name {
            "i" => GateKind::I,
            "h" => GateKind::H,
            "x" => GateKind::X,
            "y" => GateKind::Y,
            "z" => GateKind::Z,
            "s" => GateKind::S,
            "t" => GateKind::T,
            "swap" => GateKind::Swap,
            "p" => GateKind::P { phi: p[0] },
            "rx" => GateKind::Rx { theta: p[0] },
            "ry" => GateKind::Ry { theta: p[0] },
            "rz" => GateKind::Rz { theta: p[0] },
            "u1" => GateKind::U1 { lambda: p[0] },
            "u2" => GateKind::U2 { phi: p[0], lambda: p[1] },
            "u3" => GateKind::U3 { theta: p[0], phi: p[1], lambda: p[2] },
            "u" => GateKind::U { theta: p[0], phi: p[1], lambda: p[2], gamma: p[3] },
            _ => return Err(QuantumError::unknown_gate(name)),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            GateKind::I => "i",
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::S => "s",
            GateKind::T => "t",
            GateKind::Swap => "swap",
            GateKind::P { .. } => "p",
            GateKind::Rx { .. } => "rx",
            GateKind::Ry { .. } => "ry",
            GateKind::Rz { .. } => "rz",
            GateKind::U1 { .. } => "u1",
            GateKind::U2 { .. } => "u2",
            GateKind::U3 { .. } => "u3",
            GateKind::U { .. } => "u",
        }
    }

    /// Base (uncontrolled, non-inverted) matrix of this family.
    pub fn matrix(&self) -> GateMatrix {
        match *self {
            GateKind::I => i2(),
            GateKind::H => h(),
            GateKind::X => x(),
            GateKind::Y => y(),
            GateKind::Z => z(),
            GateKind::S => s(),
            GateKind::T => t(),
            GateKind::Swap => swap(),
            GateKind::P { phi } => phase(phi),
            GateKind::Rx { theta } => rx(theta),
            GateKind::Ry { theta } => ry(theta),
            GateKind::Rz { theta } => rz(theta),
            GateKind::U1 { lambda } => u1(lambda),
            GateKind::U2 { phi, lambda } => u2(phi, lambda),
            GateKind::U3 { theta, phi, lambda } => u3(theta, phi, lambda),
            GateKind::U { theta, phi, lambda, gamma } => u(theta, phi, lambda, gamma),
        }
    }
}

/// Build the base matrix of a family.
pub fn build_base(kind: GateKind) -> GateMatrix {
    kind.matrix()
}

/// A gate family together with its control count and dagger flag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub kind: GateKind,
    pub num_ctrl: usize,
    pub inverse: bool,
}

impl Gate {
    pub fn new(kind: GateKind) -> Self {
        Self { kind, num_ctrl: 0, inverse: false }
    }

    pub fn controlled(mut self, num_ctrl: usize) -> Self {
        self.num_ctrl = num_ctrl;
        self
    }

    pub fn dagger(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    /// Base matrix, then control embedding, then adjoint.
    pub fn matrix(&self) -> QuantumResult<GateMatrix> {
        let mut m = self.kind.matrix();
        if self.num_ctrl != 0 {
            m = ops::add_control(&m, self.num_ctrl)?;
        }
        if self.inverse {
            m = ops::invert(&m);
        }
        Ok(m)
    }

    /// Number of qubits the full matrix acts on.
    pub fn arity(&self) -> usize {
        let base: usize = if self.kind == GateKind::Swap { 2 } else { 1 };
        base.saturating_add(self.num_ctrl)
    }

    /// Parse a circuit-level gate name such as `cx`, `ccrz`, `cswap` or `tdg`.
    ///
    /// Each leading `c` beyond a known family name adds one control; a
    /// trailing `dg` marks the adjoint. `dagger` is or-ed with that suffix.
    pub fn parse(name: &str, params: &[f64], dagger: bool) -> QuantumResult<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let (mut rest, inverse) = match lowered.strip_suffix("dg") {
            Some(stem) if !stem.is_empty() => (stem, true),
            _ => (lowered.as_str(), false),
        };
        let mut num_ctrl = 0;
        loop {
            match GateKind::from_name(rest, params) {
                Ok(kind) => {
                    return Ok(Gate { kind, num_ctrl, inverse: inverse || dagger });
                }
                Err(QuantumError::UnknownGate(_)) if rest.len() > 1 && rest.starts_with('c') => {
                    rest = &rest[1..];
                    num_ctrl += 1;
                }
                Err(QuantumError::UnknownGate(_)) => return Err(QuantumError::unknown_gate(name)),
                Err(e) => return Err(e),
            }
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", "c".repeat(self.num_ctrl), self.kind.name())?;
        if self.inverse {
            write!(f, "dg")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quantum::types::is_unitary;
    use std::f64::consts::PI;

    fn close(a: &GateMatrix, b: &GateMatrix) -> bool {
        a.shape() == b.shape() && (a - b).iter().all(|z| z.norm() < 1e-12)
    }

    fn all_kinds() -> Vec<GateKind> {
        vec![
            GateKind::I,
            GateKind::H,
            GateKind::X,
            GateKind::Y,
            GateKind::Z,
            GateKind::S,
            GateKind::T,
            GateKind::Swap,
            GateKind::P { phi: 0.3 },
            GateKind::Rx { theta: 1.1 },
            GateKind::Ry { theta: -0.7 },
            GateKind::Rz { theta: 2.5 },
            GateKind::U1 { lambda: 0.9 },
            GateKind::U2 { phi: 0.2, lambda: -1.3 },
            GateKind::U3 { theta: 1.0, phi: 0.5, lambda: 0.25 },
            GateKind::U { theta: 1.0, phi: 0.5, lambda: 0.25, gamma: 0.125 },
        ]
    }

    #[test]
    fn every_family_is_unitary() {
        for kind in all_kinds() {
            assert!(is_unitary(&kind.matrix(), 1e-9), "{} not unitary", kind.name());
        }
    }

    #[test]
    fn t_squared_is_s() {
        assert!(close(&(t() * t()), &s()));
    }

    #[test]
    fn u3_specialises_to_u2_and_u1() {
        assert!(close(&u3(PI / 2.0, 0.4, -0.8), &u2(0.4, -0.8)));
        assert!(close(&u3(0.0, 0.0, 0.6), &u1(0.6)));
    }

    #[test]
    fn u_adds_global_phase() {
        let g = 0.7;
        let expected = u3(1.2, 0.3, 0.4) * C64::from_polar(1.0, g);
        assert!(close(&u(1.2, 0.3, 0.4, g), &expected));
    }

    #[test]
    fn dagger_of_t_conjugates_phase() {
        let tdg = Gate::new(GateKind::T).dagger(true).matrix().unwrap();
        assert!((tdg[(1, 1)] - c(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)).norm() < 1e-12);
    }

    #[test]
    fn parse_resolves_controls_and_dagger() {
        let g = Gate::parse("ccrz", &[0.5], false).unwrap();
        assert_eq!(g.kind, GateKind::Rz { theta: 0.5 });
        assert_eq!(g.num_ctrl, 2);
        assert!(!g.inverse);

        let g = Gate::parse("cswap", &[], false).unwrap();
        assert_eq!((g.kind, g.num_ctrl, g.arity()), (GateKind::Swap, 1, 3));

        let g = Gate::parse("Sdg", &[], false).unwrap();
        assert_eq!((g.kind, g.inverse), (GateKind::S, true));
        assert_eq!(g.to_string(), "sdg");
    }

    #[test]
    fn parse_reports_unknown_and_bad_params() {
        assert_eq!(
            Gate::parse("cq", &[], false),
            Err(QuantumError::unknown_gate("cq"))
        );
        assert!(matches!(
            Gate::parse("crx", &[], false),
            Err(QuantumError::InvalidParameters(_))
        ));
    }
}
