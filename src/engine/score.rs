//! Composite pair quality score.
//!
//! Lower is better, like a distance. The combination is dominated by the
//! origin separation and plane angle, with hydrogen-bond evidence pulling
//! the score down and its absence pushing it up hard.

use crate::model::pair::HydrogenBond;

use super::validate::PairGeometry;

/// Added when no standard hydrogen bond supports the pair.
const NO_STANDARD_HBOND_PENALTY: f64 = 4.0;
/// Credit per standard hydrogen bond, up to three.
const STANDARD_HBOND_CREDIT: f64 = 0.5;

/// Scores one candidate pair.
///
/// Deterministic and total over finite descriptor values; candidates within
/// the selection epsilon of each other are resolved by the finder's index
/// tie-break, never here.
pub fn score_pair(geometry: &PairGeometry, hbonds: &[HydrogenBond]) -> f64 {
    let mut score = geometry.quality_contribution();

    let standard = hbonds.iter().filter(|hb| hb.is_standard()).count();
    if standard == 0 {
        score += NO_STANDARD_HBOND_PENALTY;
    }
    score -= STANDARD_HBOND_CREDIT * standard.min(3) as f64;

    score
}
