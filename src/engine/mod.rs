//! The pairing engine: per-residue reference frames, candidate validation,
//! hydrogen-bond detection and mutual-best-match pair selection.

mod error;
mod finder;
mod fit;
mod frame_calc;
mod geom;
mod hbond;
mod params;
mod score;
mod spatial;
mod templates;
mod validate;

pub use error::Error;
pub use frame_calc::{calculate_frame, FrameResult};
pub use hbond::find_hbonds;
pub use params::ValidationParameters;
pub use score::score_pair;
pub use templates::{
    template_for, BaseTemplate, TemplateAtom, PURINE_RING_ATOMS, PYRIMIDINE_RING_ATOMS,
};
pub use validate::{validate_pair, PairGeometry};

use crate::model::pair::{BasePair, Selection};
use crate::model::residue::Structure;

/// Everything one pairing run produces.
#[derive(Debug, Clone)]
pub struct PairingResult {
    /// Per-residue frame results, index-aligned with the structure.
    pub frames: Vec<FrameResult>,
    /// Mutual-best selections, before final validation. A superset of the
    /// accepted pairs by construction.
    pub selections: Vec<Selection>,
    /// Accepted pairs in acceptance order.
    pub pairs: Vec<BasePair>,
}

impl PairingResult {
    /// A run that pairs nothing is a normal outcome, not an error.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Runs the full pairing pipeline on one structure.
///
/// Residues without a fittable base simply never enter scoring; residues
/// with no valid candidate stay unpaired. Only an inconsistent parameter
/// set aborts the run.
///
/// # Errors
///
/// Returns [`Error::InvertedWindow`] or [`Error::InvalidThreshold`] when
/// `params` fails its consistency check.
pub fn find_pairs(
    structure: &Structure,
    params: &ValidationParameters,
) -> Result<PairingResult, Error> {
    params.validate()?;

    let frames: Vec<FrameResult> = structure
        .residues
        .iter()
        .map(|residue| frame_calc::calculate_frame(residue, params))
        .collect();

    let (selections, pairs) = finder::select_pairs(structure, &frames, params);

    Ok(PairingResult {
        frames,
        selections,
        pairs,
    })
}
