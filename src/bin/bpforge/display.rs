use std::io::{self, Write};

use anyhow::Error;

use basepair_forge::{BasePair, PairingResult, Structure};

/// Prints the human-readable pairing report to stdout.
pub fn print_report(structure: &Structure, result: &PairingResult, show_selections: bool) {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let fitted = crate::commands::count_fitted(&result.frames);
    let _ = writeln!(
        out,
        "{} residues, {} reference frames, {} base pairs",
        structure.residue_count(),
        fitted,
        result.pairs.len()
    );

    if result.pairs.is_empty() {
        let _ = writeln!(out, "no pairs found");
    } else {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:>4}  {:<12} {:<12} {:<12} {:>7}  {}",
            "idx", "residue i", "residue j", "type", "score", "h-bonds"
        );
        for pair in &result.pairs {
            let _ = writeln!(out, "{}", pair_row(structure, pair));
        }
    }

    if show_selections && result.selections.len() > result.pairs.len() {
        let _ = writeln!(out);
        let _ = writeln!(out, "selections dropped by final validation:");
        for sel in &result.selections {
            let accepted = result
                .pairs
                .iter()
                .any(|p| (p.residue_i, p.residue_j) == (sel.residue_i, sel.residue_j));
            if !accepted {
                let _ = writeln!(
                    out,
                    "      {} - {}  score {:.2}",
                    structure.residues[sel.residue_i].id,
                    structure.residues[sel.residue_j].id,
                    sel.score
                );
            }
        }
    }
}

fn pair_row(structure: &Structure, pair: &BasePair) -> String {
    let res_i = &structure.residues[pair.residue_i];
    let res_j = &structure.residues[pair.residue_j];
    let bonds: Vec<String> = pair
        .hbonds
        .iter()
        .map(|hb| format!("{}-{} {:.2}", hb.donor_atom, hb.acceptor_atom, hb.distance))
        .collect();
    format!(
        "{:>4}  {:<12} {:<12} {:<12} {:>7.2}  {}",
        pair.index + 1,
        format!("{} {}", res_i.id, pair.code_i),
        format!("{} {}", res_j.id, pair.code_j),
        format!("{:?}", pair.pair_type),
        pair.score,
        bonds.join(", ")
    )
}

pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr, "error: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  caused by: {}", cause);
        source = cause.source();
    }
}
