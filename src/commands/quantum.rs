//! CLI entry for circuit runs.
//!
//! Examples:
//!   cargo run -- run bell.toml
//!   cargo run -- run bell.toml --shots 2000 --seed 7 --json

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::json;

use crate::config::Config;
use crate::core::quantum::{basis_label, gates, Counts, Script, StateVector};

pub struct RunOptions {
    pub input: PathBuf,
    pub shots: Option<usize>,
    pub seed: Option<u64>,
    pub json: bool,
    pub no_state: bool,
}

/// Load a script, replay it and print the state and shot histogram.
pub fn quantum_run(opts: RunOptions, cfg: &Config) -> Result<()> {
    let script = Script::load(&opts.input)?;
    let qc = script
        .run()
        .with_context(|| format!("failed to run {}", opts.input.display()))?;

    // command line > script > config
    let shots = opts.shots.or(script.shots).unwrap_or(cfg.shots);
    if shots == 0 {
        bail!("shots must be positive");
    }
    let seed = opts.seed.or(script.seed).or(cfg.seed);
    let counts = match seed {
        Some(seed) => qc.measure_seeded(shots, seed),
        None => qc.measure(shots),
    }
    .context("sampling failed")?;

    if opts.json {
        let doc = json_report(qc.state(), &counts, shots, !opts.no_state);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    if !opts.no_state {
        print!("{}", render_state(qc.state(), cfg.precision));
    }
    print!("{}", render_counts(&counts, shots, cfg.color));
    Ok(())
}

/// One line per basis state with non-negligible amplitude.
pub fn render_state(state: &StateVector, precision: usize) -> String {
    let cutoff = 0.5 * 10f64.powi(-(precision as i32));
    let mut out = String::from("state:\n");
    for (i, a) in state.as_slice().iter().enumerate() {
        if a.re.abs() < cutoff && a.im.abs() < cutoff {
            continue;
        }
        let label = basis_label(i, state.num_qubits());
        let _ = writeln!(out, "  |{label}> {:+.p$} {:+.p$}i", a.re, a.im, p = precision);
    }
    out
}

/// Histogram with a proportional bar per outcome.
pub fn render_counts(counts: &Counts, shots: usize, color: bool) -> String {
    const WIDTH: usize = 40;
    let mut out = format!("counts ({shots} shots):\n");
    for (label, &n) in counts {
        let len = (n * WIDTH).div_ceil(shots.max(1));
        let bar = "#".repeat(len);
        let bar = if color { bar.cyan().to_string() } else { bar };
        let _ = writeln!(out, "  {label} {n:>6} {bar}");
    }
    out
}

pub fn json_report(state: &StateVector, counts: &Counts, shots: usize, with_state: bool) -> serde_json::Value {
    let mut doc = json!({
        "qubits": state.num_qubits(),
        "shots": shots,
        "counts": counts,
    });
    if with_state {
        let amps: Vec<[f64; 2]> = state.as_slice().iter().map(|a| [a.re, a.im]).collect();
        doc["state"] = json!(amps);
    }
    doc
}

/// Print the gate families and their parameter counts.
pub fn list_gates() -> Result<()> {
    print!("{}", render_gate_table());
    Ok(())
}

pub fn render_gate_table() -> String {
    let mut out = String::new();
    for (name, arity, about) in gates::FAMILIES {
        let _ = writeln!(out, "{name:<5} {arity} param(s)  {about}");
    }
    out.push_str("prefix with c/cc for controls (cx, ccx, cswap); suffix dg for the adjoint (sdg)\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quantum::Circuit;

    #[test]
    fn state_rendering_skips_zero_amplitudes() {
        let mut qc = Circuit::new(2);
        qc.h(&[0]).unwrap();
        qc.cx(0, 1).unwrap();
        insta::assert_snapshot!(render_state(qc.state(), 4).trim_end(), @r"
        state:
          |00> +0.7071 +0.0000i
          |11> +0.7071 +0.0000i
        ");
    }

    #[test]
    fn counts_rendering_without_color() {
        let mut counts = Counts::new();
        counts.insert("0".to_string(), 3);
        counts.insert("1".to_string(), 1);
        insta::assert_snapshot!(render_counts(&counts, 4, false).trim_end(), @r"
        counts (4 shots):
          0      3 ##############################
          1      1 ##########
        ");
    }

    #[test]
    fn json_report_carries_counts_and_state() {
        let qc = Circuit::new(1);
        let counts = qc.measure(8).unwrap();
        let doc = json_report(qc.state(), &counts, 8, true);
        assert_eq!(doc["counts"]["0"], 8);
        assert_eq!(doc["state"][0][0], 1.0);
        assert!(json_report(qc.state(), &counts, 8, false).get("state").is_none());
    }
}
