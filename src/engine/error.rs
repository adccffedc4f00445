//! Error type for the pairing engine.
//!
//! Per-residue and per-pair failures (poor fits, degenerate geometry,
//! unpaired residues) are recovered locally and never reach this type; only
//! configuration-level problems do.

use thiserror::Error;

/// Errors that abort a pairing run.
#[derive(Debug, Error)]
pub enum Error {
    /// A `[min, max]` threshold window has min above max.
    #[error("inconsistent validation parameters: {parameter} window inverted ({min} > {max})")]
    InvertedWindow {
        /// The offending window.
        parameter: &'static str,
        min: f64,
        max: f64,
    },

    /// A threshold that must be a finite non-negative number is not.
    #[error("inconsistent validation parameters: {parameter} must be finite and non-negative, got {value}")]
    InvalidThreshold {
        /// The offending threshold.
        parameter: &'static str,
        value: f64,
    },
}

impl Error {
    pub(crate) fn inverted_window(parameter: &'static str, min: f64, max: f64) -> Self {
        Self::InvertedWindow {
            parameter,
            min,
            max,
        }
    }

    pub(crate) fn non_positive(parameter: &'static str, value: f64) -> Self {
        Self::InvalidThreshold { parameter, value }
    }
}
