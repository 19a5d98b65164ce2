use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "knotdrift")]
#[command(about = "Net drift sweeps of a braided phase rotor")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Also append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Where a run configuration comes from
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigSource {
    /// YAML run configuration
    #[arg(short, long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Built-in preset (grid, logspace, minimal, trajectory)
    #[arg(short, long)]
    pub preset: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every configured sweep plan and write a JSON report
    Sweep {
        #[command(flatten)]
        source: ConfigSource,

        /// Report destination (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Integrate the fixed parameter set once and summarize its phase
    Point {
        #[command(flatten)]
        source: ConfigSource,

        /// Include every (t, θ) sample in the output
        #[arg(long)]
        samples: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Trefoil strand coordinates
    Trefoil {
        #[arg(long, default_value_t = 1200)]
        points: usize,

        #[arg(long, default_value_t = 3)]
        strands: usize,

        #[arg(long, default_value_t = 3.0)]
        scale: f64,
    },

    /// Phase residues for trefoil linking numbers
    Linking {
        /// Largest linking number (multiples of three up to it)
        #[arg(long, default_value_t = 18)]
        max_lk: u32,
    },

    /// Print a preset as YAML to start a configuration from
    InitConfig {
        #[arg(short, long, default_value = "grid")]
        preset: String,
    },
}
