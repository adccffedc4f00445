//! Mutual-best-match pair selection.
//!
//! Two phases. First, every candidate pair within the coarse cutoff is
//! evaluated (geometry, hydrogen bonds, score) into an immutable score
//! table; each cell is an independent pure computation. Second, a single
//! sequential pass over residues in canonical ascending-index order picks
//! each residue's best partner and accepts mutual choices. The second phase
//! must stay sequential: the tie-break and mutual-match rules depend on a
//! fixed evaluation order to be reproducible run-over-run.

use std::collections::HashMap;

use crate::model::pair::{BasePair, HydrogenBond, PairType, Selection};
use crate::model::residue::Structure;
use crate::model::types::BaseCode;

use super::frame_calc::FrameResult;
use super::hbond;
use super::params::ValidationParameters;
use super::score;
use super::spatial::SpatialGrid;
use super::validate::{self, PairGeometry};

/// One fully evaluated candidate pair.
#[derive(Debug, Clone)]
pub(crate) struct Evaluation {
    pub geometry: PairGeometry,
    pub hbonds: Vec<HydrogenBond>,
    pub score: f64,
}

impl Evaluation {
    /// Candidate-stage validity: the geometry windows passed and at least
    /// one hydrogen bond of any kind supports the pair.
    fn is_usable(&self) -> bool {
        self.geometry.is_valid && !self.hbonds.is_empty()
    }

    fn standard_hbond_count(&self) -> usize {
        self.hbonds.iter().filter(|hb| hb.is_standard()).count()
    }
}

/// Runs both phases and returns the selection stream plus the accepted
/// pairs.
pub(crate) fn select_pairs(
    structure: &Structure,
    frames: &[FrameResult],
    params: &ValidationParameters,
) -> (Vec<Selection>, Vec<BasePair>) {
    let origins: Vec<Option<[f64; 3]>> = frames
        .iter()
        .map(|f| f.frame.as_ref().map(|frame| frame.origin))
        .collect();

    let grid = SpatialGrid::from_origins(&origins, params.candidate_cutoff);
    let table = build_score_table(structure, frames, &origins, &grid, params);
    let best = best_partners(structure.residue_count(), &origins, &grid, &table, params);

    let mut selections = Vec::new();
    let mut pairs = Vec::new();
    let mut hbond_counter = 0usize;

    for i in 0..structure.residue_count() {
        let Some(j) = best[i] else { continue };
        // mutual best match; the i < j arm sees each pair exactly once
        if j < i || best[j] != Some(i) {
            continue;
        }
        let Some(eval) = table.get(&(i, j)) else {
            continue;
        };

        selections.push(Selection {
            residue_i: i,
            residue_j: j,
            score: eval.score,
        });

        // final validation: selections carried only by weak contacts stay
        // visible above but never become accepted pairs
        let standard_count = eval.standard_hbond_count();
        if standard_count == 0 {
            continue;
        }

        let (Some(frame_i), Some(frame_j)) = (frames[i].frame, frames[j].frame) else {
            continue;
        };
        let (Some(code_i), Some(code_j)) = (
            structure.residues[i].base_code(),
            structure.residues[j].base_code(),
        ) else {
            continue;
        };

        let mut hbonds = eval.hbonds.clone();
        for bond in hbonds.iter_mut() {
            bond.index = hbond_counter;
            hbond_counter += 1;
        }

        pairs.push(BasePair {
            residue_i: i,
            residue_j: j,
            code_i,
            code_j,
            frame_i,
            frame_j,
            pair_type: classify(code_i, code_j, &eval.geometry, standard_count),
            score: eval.score,
            hbonds,
            index: pairs.len(),
        });
    }

    (selections, pairs)
}

/// Evaluates every candidate pair within the coarse cutoff, keyed by
/// `(i, j)` with `i < j`. Each cell depends only on the two residues, their
/// frames and the parameters.
fn build_score_table(
    structure: &Structure,
    frames: &[FrameResult],
    origins: &[Option<[f64; 3]>],
    grid: &SpatialGrid,
    params: &ValidationParameters,
) -> HashMap<(usize, usize), Evaluation> {
    let mut table = HashMap::new();

    for i in 0..structure.residue_count() {
        let Some(origin) = origins[i] else { continue };
        let Some(frame_i) = frames[i].frame.as_ref() else {
            continue;
        };
        for j in grid.query_radius(origin, origins, params.candidate_cutoff) {
            if j <= i {
                continue;
            }
            let Some(frame_j) = frames[j].frame.as_ref() else {
                continue;
            };
            let res_i = &structure.residues[i];
            let res_j = &structure.residues[j];

            let geometry = validate::validate_pair(res_i, frame_i, res_j, frame_j, params);
            let hbonds = if geometry.is_valid {
                hbond::find_hbonds(res_i, res_j, params)
            } else {
                Vec::new()
            };
            let pair_score = score::score_pair(&geometry, &hbonds);
            table.insert(
                (i, j),
                Evaluation {
                    geometry,
                    hbonds,
                    score: pair_score,
                },
            );
        }
    }

    table
}

/// Best-partner pass: for each residue, the usable candidate with the
/// lowest score.
///
/// Candidates are visited in ascending index order and a challenger must
/// beat the incumbent by more than `tie_epsilon` to replace it, so a
/// score tie always resolves to the lower residue index regardless of
/// floating-point evaluation order.
fn best_partners(
    residue_count: usize,
    origins: &[Option<[f64; 3]>],
    grid: &SpatialGrid,
    table: &HashMap<(usize, usize), Evaluation>,
    params: &ValidationParameters,
) -> Vec<Option<usize>> {
    let mut best: Vec<Option<usize>> = vec![None; residue_count];

    for i in 0..residue_count {
        let Some(origin) = origins[i] else { continue };
        let mut best_score = f64::INFINITY;
        for j in grid.query_radius(origin, origins, params.candidate_cutoff) {
            if j == i {
                continue;
            }
            let key = if i < j { (i, j) } else { (j, i) };
            let Some(eval) = table.get(&key) else { continue };
            if !eval.is_usable() {
                continue;
            }
            if eval.score < best_score - params.tie_epsilon {
                best_score = eval.score;
                best[i] = Some(j);
            }
        }
    }

    best
}

fn classify(
    code_i: BaseCode,
    code_j: BaseCode,
    geometry: &PairGeometry,
    standard_count: usize,
) -> PairType {
    if !geometry.axis_pattern_ok || standard_count < 2 {
        return PairType::Other;
    }
    use BaseCode::*;
    let key = if (code_i as u8) <= (code_j as u8) {
        (code_i, code_j)
    } else {
        (code_j, code_i)
    };
    match key {
        (A, T) | (A, U) | (C, G) | (C, I) => PairType::WatsonCrick,
        (G, T) | (G, U) | (T, I) | (U, I) => PairType::Wobble,
        _ => PairType::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pair::HBondKind;

    fn geometry(pattern_ok: bool) -> PairGeometry {
        PairGeometry {
            dorg: 0.5,
            dv: 0.1,
            plane_angle: 5.0,
            dnn: Some(8.9),
            overlap_area: 0.0,
            axis_pattern_ok: pattern_ok,
            is_valid: true,
        }
    }

    #[test]
    fn classify_canonical_pairs() {
        use BaseCode::*;
        let geo = geometry(true);
        assert_eq!(classify(G, C, &geo, 3), PairType::WatsonCrick);
        assert_eq!(classify(C, G, &geo, 3), PairType::WatsonCrick);
        assert_eq!(classify(A, U, &geo, 2), PairType::WatsonCrick);
        assert_eq!(classify(T, A, &geo, 2), PairType::WatsonCrick);
        assert_eq!(classify(I, C, &geo, 2), PairType::WatsonCrick);
        assert_eq!(classify(G, U, &geo, 2), PairType::Wobble);
        assert_eq!(classify(U, G, &geo, 2), PairType::Wobble);
        assert_eq!(classify(G, G, &geo, 2), PairType::Other);
    }

    #[test]
    fn classify_requires_axis_pattern_and_two_bonds() {
        use BaseCode::*;
        assert_eq!(classify(G, C, &geometry(false), 3), PairType::Other);
        assert_eq!(classify(G, C, &geometry(true), 1), PairType::Other);
    }

    fn evaluation(score: f64) -> Evaluation {
        Evaluation {
            geometry: geometry(true),
            hbonds: vec![HydrogenBond {
                donor_residue: 0,
                donor_atom: "N1".into(),
                acceptor_atom: "N3".into(),
                distance: 2.9,
                kind: HBondKind::Standard,
                index: 0,
            }],
            score,
        }
    }

    fn close_origins(n: usize) -> Vec<Option<[f64; 3]>> {
        (0..n).map(|i| Some([i as f64, 0.0, 0.0])).collect()
    }

    #[test]
    fn tie_within_epsilon_prefers_lower_index() {
        let params = ValidationParameters::default();
        let origins = close_origins(3);
        let grid = SpatialGrid::from_origins(&origins, params.candidate_cutoff);
        let mut table = HashMap::new();
        table.insert((0, 1), evaluation(1.0));
        table.insert((0, 2), evaluation(1.0 + 1e-12));
        table.insert((1, 2), evaluation(50.0));

        let best = best_partners(3, &origins, &grid, &table, &params);
        assert_eq!(best[0], Some(1));
    }

    #[test]
    fn clear_winner_beats_the_incumbent() {
        let params = ValidationParameters::default();
        let origins = close_origins(3);
        let grid = SpatialGrid::from_origins(&origins, params.candidate_cutoff);
        let mut table = HashMap::new();
        table.insert((0, 1), evaluation(1.0));
        table.insert((0, 2), evaluation(0.25));
        table.insert((1, 2), evaluation(50.0));

        let best = best_partners(3, &origins, &grid, &table, &params);
        assert_eq!(best[0], Some(2));
    }

    #[test]
    fn residue_with_no_usable_candidate_has_no_best() {
        let params = ValidationParameters::default();
        let origins = close_origins(2);
        let grid = SpatialGrid::from_origins(&origins, params.candidate_cutoff);
        let mut unusable = evaluation(1.0);
        unusable.hbonds.clear();
        let mut table = HashMap::new();
        table.insert((0, 1), unusable);

        let best = best_partners(2, &origins, &grid, &table, &params);
        assert_eq!(best, vec![None, None]);
    }
}
