//! TOML circuit scripts.
//!
//! ```toml
//! qubits = 2
//! shots = 1000
//! [[ops]]
//! gate = "h"
//! qubits = [0]
//! [[ops]]
//! gate = "cx"
//! qubits = [0, 1]
//! ```
use std::path::Path;

use anyhow::{Context, Result};
use num_complex::Complex64 as C64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::circuit::Circuit;
use super::gates::Gate;
use crate::core::error::QuantumResult;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub qubits: usize,
    #[serde(default)]
    pub shots: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Initial amplitudes as `[re, im]` pairs; normalized on load.
    #[serde(default)]
    pub initial: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    pub ops: Vec<Op>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Op {
    pub gate: String,
    pub qubits: Vec<usize>,
    #[serde(default)]
    pub params: Vec<f64>,
    #[serde(default)]
    pub dagger: bool,
}

impl Op {
    pub fn resolve(&self) -> QuantumResult<Gate> {
        Gate::parse(&self.gate, &self.params, self.dagger)
    }
}

impl Script {
    pub fn parse(src: &str) -> Result<Self> {
        toml::from_str(src).context("invalid circuit script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("Read circuit script {}", path.display()))?;
        Self::parse(&src).with_context(|| format!("Parse circuit script {}", path.display()))
    }

    /// Build a fresh circuit and replay every op on it.
    pub fn run(&self) -> Result<Circuit> {
        let mut qc = Circuit::try_new(self.qubits)
            .with_context(|| format!("register of {} qubits", self.qubits))?;
        if let Some(initial) = &self.initial {
            let values: Vec<C64> = initial.iter().map(|[re, im]| C64::new(*re, *im)).collect();
            qc.initialize(&values).context("initial state")?;
        }
        for (n, op) in self.ops.iter().enumerate() {
            let gate = op.resolve().with_context(|| format!("op #{n} ({})", op.gate))?;
            debug!(op = n, %gate, qubits = ?op.qubits, "replay");
            qc.apply(&gate, &op.qubits)
                .with_context(|| format!("op #{n} ({gate} on {:?})", op.qubits))?;
        }
        Ok(qc)
    }
}
