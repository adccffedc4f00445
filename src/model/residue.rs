use std::fmt;

use super::atom::Atom;
use super::types::{BaseClass, BaseCode};

/// Chain/sequence/insertion identity of a residue, as read from the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ResidueId {
    pub chain_id: char,
    pub seq_num: i32,
    pub insertion_code: char,
}

impl ResidueId {
    pub fn new(chain_id: char, seq_num: i32, insertion_code: Option<char>) -> Self {
        Self {
            chain_id,
            seq_num,
            insertion_code: insertion_code.unwrap_or(' '),
        }
    }
}

impl fmt::Display for ResidueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.seq_num)?;
        if self.insertion_code != ' ' {
            write!(f, "{}", self.insertion_code)?;
        }
        Ok(())
    }
}

/// A residue with its ordered atom list and canonical index.
///
/// Residues are immutable once constructed; the engine keeps all derived
/// per-residue state (frames, scores) in its own index-aligned tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub name: String,
    pub id: ResidueId,
    pub atoms: Vec<Atom>,
    /// Canonical index: position in file order, the iteration order of every
    /// deterministic pass in the engine.
    pub index: usize,
}

impl Residue {
    pub fn new(name: impl Into<String>, id: ResidueId, atoms: Vec<Atom>, index: usize) -> Self {
        Self {
            name: name.into(),
            id,
            atoms,
            index,
        }
    }

    /// First atom with the given name, if present.
    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name == name)
    }

    pub fn has_atom(&self, name: &str) -> bool {
        self.atom(name).is_some()
    }

    /// One-letter base code, from the residue-name table or, for unlisted
    /// names, from the ring-atom inventory.
    ///
    /// The inventory rule requires C8 *and* N9 for a purine (not C8+N7), so
    /// modified purines missing one ring heteroatom still route correctly.
    /// Unlisted purines fall back to adenine chemistry and unlisted
    /// pyrimidines to uracil chemistry.
    pub fn base_code(&self) -> Option<BaseCode> {
        if let Some(code) = lookup_base_name(&self.name) {
            return Some(code);
        }
        if self.has_atom("C8") && self.has_atom("N9") {
            return Some(BaseCode::A);
        }
        if self.has_atom("N1") && self.has_atom("C2") && self.has_atom("N3") {
            return Some(BaseCode::U);
        }
        None
    }

    pub fn base_class(&self) -> BaseClass {
        self.base_code()
            .map(|c| c.class())
            .unwrap_or(BaseClass::Unknown)
    }
}

/// Residue names that use a relaxed frame-fit threshold.
///
/// Thio substitution swaps a ring-adjacent carbonyl oxygen for the much
/// larger sulfur, which distorts the ring enough to push an otherwise
/// legitimate fit past the uniform cutoff.
pub const THIO_VARIANTS: &[&str] = &["4SU", "S2M", "2SU"];

pub(crate) fn lookup_base_name(name: &str) -> Option<BaseCode> {
    let code = match name.trim() {
        // standard RNA / DNA
        "A" | "DA" | "ADE" => BaseCode::A,
        "C" | "DC" | "CYT" => BaseCode::C,
        "G" | "DG" | "GUA" => BaseCode::G,
        "T" | "DT" | "THY" => BaseCode::T,
        "U" | "DU" | "URA" => BaseCode::U,
        "I" | "DI" | "INO" => BaseCode::I,
        // common modified purines
        "1MA" | "2MA" | "MA6" => BaseCode::A,
        "1MG" | "2MG" | "7MG" | "M2G" | "OMG" => BaseCode::G,
        // common modified pyrimidines
        "5MC" | "OMC" => BaseCode::C,
        "5MU" => BaseCode::T,
        "PSU" | "H2U" | "OMU" | "5BU" | "4SU" | "S2M" | "2SU" => BaseCode::U,
        _ => return None,
    };
    Some(code)
}

/// An ordered collection of residues in file order.
///
/// File order defines the canonical residue indices used by the pairing
/// engine; the structure itself carries no model/assembly state beyond that.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub residues: Vec<Residue>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(|r| r.atoms.len()).sum()
    }
}
