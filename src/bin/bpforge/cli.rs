use std::path::PathBuf;

use basepair_forge::ValidationParameters;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bpforge",
    about = "Base-pair identification for 3-D nucleic-acid structures",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Find base pairs and reference frames in a PDB structure
    #[command(visible_alias = "f")]
    Find(FindArgs),
}

#[derive(Args)]
pub struct FindArgs {
    /// Input PDB file (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write a JSON report to this path
    #[arg(short, long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Also list mutual-best selections that failed final validation
    #[arg(long)]
    pub selections: bool,

    /// Suppress the human-readable report (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    pub thresholds: ThresholdOptions,
}

/// Validation threshold overrides.
#[derive(Args)]
#[command(next_help_heading = "Validation Thresholds")]
pub struct ThresholdOptions {
    /// Maximum frame-origin distance (Å)
    #[arg(long, value_name = "DIST", default_value = "15.0")]
    pub max_dorg: f64,

    /// Maximum out-of-plane separation (Å)
    #[arg(long, value_name = "DIST", default_value = "2.5")]
    pub max_dv: f64,

    /// Maximum inter-plane angle (degrees)
    #[arg(long, value_name = "DEG", default_value = "65.0")]
    pub max_plane_angle: f64,

    /// Hydrogen-bond donor-acceptor distance minimum (Å)
    #[arg(long, value_name = "DIST", default_value = "2.5")]
    pub hbond_min: f64,

    /// Hydrogen-bond donor-acceptor distance maximum (Å)
    #[arg(long, value_name = "DIST", default_value = "3.5")]
    pub hbond_max: f64,

    /// Frame-fit RMS acceptance threshold (Å)
    #[arg(long, value_name = "RMS", default_value = "0.2618")]
    pub max_fit_rms: f64,
}

impl ThresholdOptions {
    pub fn to_parameters(&self) -> ValidationParameters {
        ValidationParameters {
            max_dorg: self.max_dorg,
            max_dv: self.max_dv,
            max_plane_angle: self.max_plane_angle,
            min_hbond_dist: self.hbond_min,
            max_hbond_dist: self.hbond_max,
            max_fit_rms: self.max_fit_rms,
            ..Default::default()
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
