use serde::Serialize;
use serde::Serializer;

use super::frame::ReferenceFrame;
use super::types::BaseCode;

/// Residue indices are 0-based inside the engine but 1-based in every
/// externally serialized record, the numbering convention of the structure
/// analysis tools this output gets compared against.
fn one_based<S: Serializer>(idx: &usize, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_u64(*idx as u64 + 1)
}

/// Kind of a detected hydrogen bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HBondKind {
    /// Canonical N/O donor to N/O acceptor.
    Standard,
    /// Weak contact, e.g. a ring C-H donor.
    NonStandard,
}

/// A donor-acceptor contact accepted by the hydrogen-bond detector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydrogenBond {
    /// Residue owning the donor atom.
    #[serde(serialize_with = "one_based")]
    pub donor_residue: usize,
    pub donor_atom: String,
    pub acceptor_atom: String,
    /// Donor-acceptor heavy-atom distance in Ångströms.
    pub distance: f64,
    pub kind: HBondKind,
    /// Sequential index. Local to the detector's returned list until the
    /// finder accepts the owning pair, run-scoped afterwards.
    pub index: usize,
}

impl HydrogenBond {
    pub fn is_standard(&self) -> bool {
        self.kind == HBondKind::Standard
    }
}

/// Coarse pair classification, just enough to validate and score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PairType {
    WatsonCrick,
    Wobble,
    Other,
}

/// A mutual-best selection, recorded before final validation.
///
/// Selections and accepted pairs are deliberately two distinct record types:
/// downstream consumers and regression tests compare the less-filtered
/// selection stream independently of the accepted list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selection {
    #[serde(serialize_with = "one_based")]
    pub residue_i: usize,
    #[serde(serialize_with = "one_based")]
    pub residue_j: usize,
    pub score: f64,
}

/// An accepted base pair.
///
/// `residue_i < residue_j` always, giving each pair a canonical identity.
/// The frames are copied at acceptance time so the record stays valid
/// whatever happens to the per-residue frame table afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasePair {
    #[serde(serialize_with = "one_based")]
    pub residue_i: usize,
    #[serde(serialize_with = "one_based")]
    pub residue_j: usize,
    pub code_i: BaseCode,
    pub code_j: BaseCode,
    pub frame_i: ReferenceFrame,
    pub frame_j: ReferenceFrame,
    pub pair_type: PairType,
    /// Composite quality score; lower is better.
    pub score: f64,
    pub hbonds: Vec<HydrogenBond>,
    /// Sequential acceptance index.
    pub index: usize,
}

impl BasePair {
    pub fn standard_hbond_count(&self) -> usize {
        self.hbonds.iter().filter(|hb| hb.is_standard()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame() -> ReferenceFrame {
        ReferenceFrame::new(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            [0.0, 0.0, 0.0],
        )
    }

    #[test]
    fn serialized_indices_are_one_based() {
        let sel = Selection {
            residue_i: 0,
            residue_j: 3,
            score: -1.5,
        };
        let json = serde_json::to_value(&sel).unwrap();
        assert_eq!(json["residue_i"], 1);
        assert_eq!(json["residue_j"], 4);
    }

    #[test]
    fn standard_hbond_count_filters_weak_bonds() {
        let pair = BasePair {
            residue_i: 0,
            residue_j: 1,
            code_i: BaseCode::A,
            code_j: BaseCode::T,
            frame_i: make_frame(),
            frame_j: make_frame(),
            pair_type: PairType::WatsonCrick,
            score: 0.0,
            hbonds: vec![
                HydrogenBond {
                    donor_residue: 0,
                    donor_atom: "N6".into(),
                    acceptor_atom: "O4".into(),
                    distance: 2.95,
                    kind: HBondKind::Standard,
                    index: 0,
                },
                HydrogenBond {
                    donor_residue: 0,
                    donor_atom: "C2".into(),
                    acceptor_atom: "O2".into(),
                    distance: 3.4,
                    kind: HBondKind::NonStandard,
                    index: 1,
                },
            ],
            index: 0,
        };
        assert_eq!(pair.standard_hbond_count(), 1);
    }
}
