//! qton main: parse flags, set up tracing, load config, dispatch.
use clap::Parser; // trait import enables QtonCli::parse()

use qton::cli::{Command, QtonCli};
use qton::commands::quantum::{self, RunOptions};
use qton::config::{load_config, resolve_config_path};
use qton::core::debug;

fn main() -> anyhow::Result<()> {
    let args = QtonCli::parse();
    debug::init(args.debug);

    let cfg_path = resolve_config_path(&args.config);
    let cfg = load_config(cfg_path.as_deref())?;
    tracing::debug!(config = ?cfg_path, "loaded config");

    match args.cmd {
        Command::Run { input, shots, seed, json, no_state } => {
            quantum::quantum_run(RunOptions { input, shots, seed, json, no_state }, &cfg)
        }
        Command::Gates => quantum::list_gates(),
    }
}
