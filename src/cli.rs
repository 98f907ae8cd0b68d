use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "qton",
    about = "qton: state-vector quantum circuit simulator",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct QtonCli {
    /// Global: engine debug output on stderr (same as QTON_DEBUG=1)
    #[arg(long = "debug", action = ArgAction::SetTrue, global = true)]
    pub debug: bool,

    /// Global: path to config (TOML); default: ~/.qton/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a circuit script and sample it
    ///
    /// Examples:
    ///   qton run bell.toml
    ///   qton run ghz.toml --shots 2000 --seed 7 --json
    Run {
        /// Circuit script (.toml)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Number of shots (overrides script and config)
        #[arg(long = "shots", value_name = "N")]
        shots: Option<usize>,

        /// RNG seed (overrides script and config)
        #[arg(long = "seed", value_name = "SEED")]
        seed: Option<u64>,

        /// Print a JSON document instead of text
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,

        /// Skip printing the final state vector
        #[arg(long = "no-state", action = ArgAction::SetTrue)]
        no_state: bool,
    },

    /// List the gate families a script may use
    Gates,
}
