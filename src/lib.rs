//! A pure Rust library for identifying base pairs in 3-D nucleic-acid
//! structures. It fits each residue's ring atoms onto idealized base
//! templates to produce per-residue reference frames, validates candidate
//! pairs geometrically and by hydrogen bonding, and selects the final pair
//! set with a deterministic mutual-best-match rule.
//!
//! # Features
//!
//! - **Reference frames** — Least-squares superposition of idealized base
//!   templates onto experimental ring atoms, with uniform fit-quality
//!   acceptance and degenerate-geometry handling
//! - **Pair validation** — Origin distance, out-of-plane separation,
//!   inter-plane angle, glycosidic distance and projected ring-overlap
//!   checks against a configurable threshold set
//! - **Hydrogen bonds** — Slot-based donor/acceptor assignment with
//!   bifurcated (shared-acceptor) geometry support
//! - **Deterministic selection** — Mutual-best-match pairing with an
//!   index-based tie-break, reproducible run-over-run
//!
//! # Quick Start
//!
//! The main entry point is the [`find_pairs`] function, which takes a
//! [`Structure`] and [`ValidationParameters`] and produces a
//! [`PairingResult`]:
//!
//! ```
//! use basepair_forge::{find_pairs, Structure, ValidationParameters};
//! use basepair_forge::io::read_pdb;
//! use std::io::Cursor;
//!
//! let pdb = "\
//! ATOM      1  N9    G A   1      -1.290   4.446   0.000  1.00  0.00           N
//! ATOM      2  C8    G A   1      -0.099   5.143   0.000  1.00  0.00           C
//! ATOM      3  N7    G A   1       0.932   4.225   0.000  1.00  0.00           N
//! ATOM      4  C5    G A   1       0.377   2.961   0.000  1.00  0.00           C
//! ATOM      5  C6    G A   1       0.945   1.703   0.000  1.00  0.00           C
//! ATOM      6  N1    G A   1       0.140   0.583   0.000  1.00  0.00           N
//! ATOM      7  C2    G A   1      -1.233   0.720   0.000  1.00  0.00           C
//! ATOM      8  N3    G A   1      -1.801   1.977   0.000  1.00  0.00           N
//! ATOM      9  C4    G A   1      -0.996   3.098   0.000  1.00  0.00           C
//! END
//! ";
//!
//! let structure: Structure = read_pdb(Cursor::new(pdb))?;
//! assert_eq!(structure.residue_count(), 1);
//!
//! let result = find_pairs(&structure, &ValidationParameters::default())?;
//! // a single strand pairs nothing, and that is a normal outcome
//! assert!(result.is_empty());
//! assert!(result.frames[0].is_valid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — PDB structure input
//! - [`find_pairs`] — Full pairing pipeline
//! - [`engine`] — Frame calculation, validation, hydrogen bonds, selection
//!
//! # Data Types
//!
//! ## Input Structures
//!
//! - [`Structure`] — Ordered residue collection, file order = canonical order
//! - [`Residue`] — Residue identity, atoms and base classification
//! - [`Atom`] — Atom name, element, position and stable ordinal index
//!
//! ## Output Structures
//!
//! - [`PairingResult`] — Frames, selections and accepted pairs of one run
//! - [`ReferenceFrame`] — Orthonormal rotation + origin of one base
//! - [`BasePair`] — Accepted pair with frames, score and hydrogen bonds
//! - [`Selection`] — Mutual-best selection before final validation
//! - [`HydrogenBond`] — One donor-acceptor contact
//!
//! ## Configuration
//!
//! - [`ValidationParameters`] — All numeric thresholds of a run

pub mod engine;
pub mod io;
mod model;

pub use model::atom::Atom;
pub use model::frame::ReferenceFrame;
pub use model::pair::{BasePair, HBondKind, HydrogenBond, PairType, Selection};
pub use model::residue::{Residue, ResidueId, Structure, THIO_VARIANTS};
pub use model::types::{BaseClass, BaseCode, Element, ParseElementError};

pub use engine::{
    calculate_frame, find_pairs, Error as EngineError, FrameResult, PairGeometry, PairingResult,
    ValidationParameters,
};
