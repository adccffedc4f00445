//! Hydrogen-bond detection between two candidate residues.
//!
//! Donors and acceptors are classified by base code and atom name; the
//! detector works on heavy atoms only, taking the donor-to-acceptor
//! direction as a stand-in for the donor hydrogen direction. Contacts are
//! assigned greedily in ascending distance order against per-atom slot
//! budgets, with bifurcated (shared-acceptor) geometry allowed only past an
//! angular separation threshold.

use crate::model::atom::Atom;
use crate::model::pair::{HBondKind, HydrogenBond};
use crate::model::residue::Residue;
use crate::model::types::BaseCode;

use std::collections::HashMap;

use super::geom;
use super::params::ValidationParameters;

/// Slot budget of a donor atom: how many hydrogens it can offer.
fn donor_slots(code: BaseCode, atom: &str) -> Option<(u8, HBondKind)> {
    use BaseCode::*;
    let entry = match (code, atom) {
        // amino groups offer two hydrogens
        (A, "N6") | (C, "N4") | (G, "N2") => (2, HBondKind::Standard),
        // imino ring nitrogens offer one
        (G, "N1") | (I, "N1") | (T, "N3") | (U, "N3") => (1, HBondKind::Standard),
        // aromatic C-H donors make weak, non-standard contacts
        (A, "C2") | (A, "C8") | (G, "C8") | (I, "C2") | (I, "C8") => (1, HBondKind::NonStandard),
        (C, "C5") | (C, "C6") | (T, "C6") | (U, "C5") | (U, "C6") => (1, HBondKind::NonStandard),
        _ => return None,
    };
    Some(entry)
}

/// Lone-pair budget of an acceptor atom.
fn acceptor_slots(code: BaseCode, atom: &str) -> Option<u8> {
    use BaseCode::*;
    let known = matches!(
        (code, atom),
        (A, "N1") | (A, "N3") | (A, "N7")
            | (G, "O6") | (G, "N3") | (G, "N7")
            | (I, "O6") | (I, "N3") | (I, "N7")
            | (C, "O2") | (C, "N3")
            | (T, "O2") | (T, "O4")
            | (U, "O2") | (U, "O4")
    );
    known.then_some(2)
}

#[derive(Debug, Clone)]
struct Candidate<'a> {
    donor_residue: usize,
    donor: &'a Atom,
    acceptor: &'a Atom,
    distance: f64,
    donor_capacity: u8,
    kind: HBondKind,
}

/// Finds the hydrogen bonds between two residues.
///
/// The returned bonds carry list-local sequential indices; the finder
/// rewrites them with run-scoped values when it accepts the owning pair.
/// No state outside the return value.
pub fn find_hbonds(
    res_i: &Residue,
    res_j: &Residue,
    params: &ValidationParameters,
) -> Vec<HydrogenBond> {
    let (Some(code_i), Some(code_j)) = (res_i.base_code(), res_j.base_code()) else {
        return Vec::new();
    };

    let mut candidates: Vec<Candidate> = Vec::new();
    collect_candidates(res_i, code_i, res_j, code_j, params, &mut candidates);
    collect_candidates(res_j, code_j, res_i, code_i, params, &mut candidates);

    // shortest contact first; atom ordinals break exact distance ties so
    // the assignment order never depends on enumeration order
    candidates.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.donor.index.cmp(&b.donor.index))
            .then(a.acceptor.index.cmp(&b.acceptor.index))
    });

    let mut donor_used: HashMap<usize, u8> = HashMap::new();
    let mut acceptor_bonds: HashMap<usize, Vec<(f64, [f64; 3])>> = HashMap::new();
    let mut bonds = Vec::new();

    for cand in &candidates {
        let used = donor_used.get(&cand.donor.index).copied().unwrap_or(0);
        if used >= cand.donor_capacity {
            continue;
        }

        let direction = geom::sub(cand.acceptor.position, cand.donor.position);
        let existing = acceptor_bonds.entry(cand.acceptor.index).or_default();
        match existing.len() {
            0 => {}
            1 => {
                // bifurcation: a second donor into the same acceptor must
                // approach from a clearly different direction and must not
                // be much longer than the established contact
                let (first_dist, first_dir) = existing[0];
                let separation = geom::angle_deg(first_dir, direction);
                if separation < params.min_bifurcation_angle {
                    continue;
                }
                if cand.distance > first_dist + params.max_bifurcation_slack {
                    continue;
                }
            }
            // oversaturated acceptor
            _ => continue,
        }

        existing.push((cand.distance, direction));
        *donor_used.entry(cand.donor.index).or_insert(0) += 1;
        bonds.push(HydrogenBond {
            donor_residue: cand.donor_residue,
            donor_atom: cand.donor.name.clone(),
            acceptor_atom: cand.acceptor.name.clone(),
            distance: cand.distance,
            kind: cand.kind,
            index: bonds.len(),
        });
    }

    bonds
}

fn collect_candidates<'a>(
    donor_res: &'a Residue,
    donor_code: BaseCode,
    acceptor_res: &'a Residue,
    acceptor_code: BaseCode,
    params: &ValidationParameters,
    out: &mut Vec<Candidate<'a>>,
) {
    for donor in &donor_res.atoms {
        let Some((capacity, kind)) = donor_slots(donor_code, &donor.name) else {
            continue;
        };
        for acceptor in &acceptor_res.atoms {
            if acceptor_slots(acceptor_code, &acceptor.name).is_none() {
                continue;
            }
            let distance = geom::distance(donor.position, acceptor.position);
            if distance < params.min_hbond_dist || distance > params.max_hbond_dist {
                continue;
            }
            out.push(Candidate {
                donor_residue: donor_res.index,
                donor,
                acceptor,
                distance,
                donor_capacity: capacity,
                kind,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::templates::template_for;
    use crate::model::residue::ResidueId;
    use crate::model::types::Element;

    fn template_residue(
        code: BaseCode,
        name: &str,
        index: usize,
        f: impl Fn([f64; 3]) -> [f64; 3],
    ) -> Residue {
        let atoms = template_for(code)
            .atoms
            .iter()
            .enumerate()
            .map(|(i, (n, p))| {
                let element = match n.chars().next().unwrap() {
                    'N' => Element::N,
                    'O' => Element::O,
                    _ => Element::C,
                };
                Atom::new(*n, element, f(*p), index * 100 + i)
            })
            .collect();
        Residue::new(name, ResidueId::new('A', index as i32 + 1, None), atoms, index)
    }

    fn synthetic_residue(
        name: &str,
        atoms: &[(&str, Element, [f64; 3])],
        index: usize,
    ) -> Residue {
        let atoms = atoms
            .iter()
            .enumerate()
            .map(|(i, (n, e, p))| Atom::new(*n, *e, *p, index * 100 + i))
            .collect();
        Residue::new(name, ResidueId::new('A', index as i32 + 1, None), atoms, index)
    }

    #[test]
    fn gc_pair_has_three_standard_bonds() {
        let params = ValidationParameters::default();
        let g = template_residue(BaseCode::G, "G", 0, |p| p);
        let c = template_residue(BaseCode::C, "C", 1, |p| [p[0], -p[1], -p[2]]);

        let bonds = find_hbonds(&g, &c, &params);
        assert_eq!(bonds.len(), 3);
        assert!(bonds.iter().all(|b| b.is_standard()));

        let described: Vec<(usize, &str, &str)> = bonds
            .iter()
            .map(|b| (b.donor_residue, b.donor_atom.as_str(), b.acceptor_atom.as_str()))
            .collect();
        assert!(described.contains(&(0, "N1", "N3")));
        assert!(described.contains(&(0, "N2", "O2")));
        assert!(described.contains(&(1, "N4", "O6")));

        // ascending distance and sequential local indices
        for (i, bond) in bonds.iter().enumerate() {
            assert_eq!(bond.index, i);
            if i > 0 {
                assert!(bond.distance >= bonds[i - 1].distance);
            }
            assert!((params.min_hbond_dist..=params.max_hbond_dist).contains(&bond.distance));
        }
    }

    #[test]
    fn at_pair_has_two_standard_and_one_weak_bond() {
        let params = ValidationParameters::default();
        let a = template_residue(BaseCode::A, "A", 0, |p| p);
        let t = template_residue(BaseCode::T, "T", 1, |p| [p[0], -p[1], -p[2]]);

        let bonds = find_hbonds(&a, &t, &params);
        let standard: Vec<_> = bonds.iter().filter(|b| b.is_standard()).collect();
        let weak: Vec<_> = bonds.iter().filter(|b| !b.is_standard()).collect();
        assert_eq!(standard.len(), 2);
        assert_eq!(weak.len(), 1);
        assert_eq!(weak[0].donor_atom, "C2");
        assert_eq!(weak[0].acceptor_atom, "O2");
    }

    #[test]
    fn bifurcation_accepted_at_wide_angle() {
        // two imino donors approaching one carbonyl acceptor 90 degrees apart
        let acceptor = synthetic_residue(
            "U",
            &[
                ("N1", Element::N, [50.0, 0.0, 0.0]),
                ("C2", Element::C, [51.0, 0.0, 0.0]),
                ("N3", Element::N, [52.0, 0.0, 0.0]),
                ("O2", Element::O, [0.0, 0.0, 0.0]),
            ],
            0,
        );
        let donors = synthetic_residue(
            "G",
            &[
                ("N1", Element::N, [2.9, 0.0, 0.0]),
                ("N2", Element::N, [0.0, 3.1, 0.0]),
            ],
            1,
        );

        let bonds = find_hbonds(&acceptor, &donors, &ValidationParameters::default());
        assert_eq!(bonds.len(), 2);
        assert!(bonds.iter().all(|b| b.acceptor_atom == "O2"));
    }

    #[test]
    fn bifurcation_rejected_at_narrow_angle() {
        // same two donors nearly collinear with the acceptor: only the
        // shorter contact survives
        let acceptor = synthetic_residue(
            "U",
            &[("O2", Element::O, [0.0, 0.0, 0.0])],
            0,
        );
        let donors = synthetic_residue(
            "G",
            &[
                ("N1", Element::N, [2.9, 0.0, 0.0]),
                ("N2", Element::N, [3.3, 0.35, 0.0]),
            ],
            1,
        );

        let bonds = find_hbonds(&acceptor, &donors, &ValidationParameters::default());
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].donor_atom, "N1");
        assert!((bonds[0].distance - 2.9).abs() < 1e-9);
    }

    #[test]
    fn oversaturated_acceptor_capped_at_two() {
        let acceptor = synthetic_residue(
            "U",
            &[("O2", Element::O, [0.0, 0.0, 0.0])],
            0,
        );
        // three donors from orthogonal directions, all in window
        let donors = synthetic_residue(
            "G",
            &[
                ("N2", Element::N, [2.8, 0.0, 0.0]),
                ("N1", Element::N, [0.0, 2.9, 0.0]),
                ("C8", Element::C, [0.0, 0.0, 3.0]),
            ],
            1,
        );
        let bonds = find_hbonds(&acceptor, &donors, &ValidationParameters::default());
        assert_eq!(bonds.len(), 2);
        assert_eq!(bonds[0].donor_atom, "N2");
        assert_eq!(bonds[1].donor_atom, "N1");
    }

    #[test]
    fn amino_donor_offers_two_slots_imino_one() {
        // one G N2 amino donor reaching two acceptors: both bonds allowed
        let donors = synthetic_residue(
            "G",
            &[("N2", Element::N, [0.0, 0.0, 0.0])],
            0,
        );
        let acceptors = synthetic_residue(
            "U",
            &[
                ("O2", Element::O, [2.8, 0.0, 0.0]),
                ("O4", Element::O, [0.0, 2.8, 0.0]),
            ],
            1,
        );
        let bonds = find_hbonds(&donors, &acceptors, &ValidationParameters::default());
        assert_eq!(bonds.len(), 2);

        // a U N3 imino donor in the same spot saturates after one bond
        let imino = synthetic_residue(
            "U",
            &[("N3", Element::N, [0.0, 0.0, 0.0])],
            0,
        );
        let acceptors = synthetic_residue(
            "A",
            &[
                ("N1", Element::N, [2.8, 0.0, 0.0]),
                ("N7", Element::N, [0.0, 2.8, 0.0]),
            ],
            1,
        );
        let bonds = find_hbonds(&imino, &acceptors, &ValidationParameters::default());
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].acceptor_atom, "N1");
    }

    #[test]
    fn out_of_window_contacts_are_ignored() {
        let donors = synthetic_residue(
            "G",
            &[
                ("N1", Element::N, [2.0, 0.0, 0.0]),
                ("N2", Element::N, [4.0, 0.0, 0.0]),
            ],
            0,
        );
        let acceptors = synthetic_residue(
            "U",
            &[("O2", Element::O, [0.0, 0.0, 0.0])],
            1,
        );
        assert!(find_hbonds(&donors, &acceptors, &ValidationParameters::default()).is_empty());
    }

    #[test]
    fn unknown_residue_yields_no_bonds() {
        let lig = synthetic_residue("LIG", &[("O1", Element::O, [0.0, 0.0, 0.0])], 0);
        let u = template_residue(BaseCode::U, "U", 1, |p| p);
        assert!(find_hbonds(&lig, &u, &ValidationParameters::default()).is_empty());
    }
}
