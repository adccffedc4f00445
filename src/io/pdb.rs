//! Minimal PDB reader for the pairing engine.
//!
//! Reads ATOM/HETATM records into the ordered residue collection the engine
//! consumes. Only the first model of a multi-model file is read. Column
//! positions follow the PDB v3 fixed-width format.

use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

use crate::model::atom::Atom;
use crate::model::residue::{Residue, ResidueId, Structure};
use crate::model::types::Element;

use super::error::Error;

/// Reads a structure from PDB data.
///
/// Atoms are numbered in file order and residues are grouped from
/// consecutive records sharing chain, sequence number, insertion code and
/// residue name; that file order becomes the engine's canonical index
/// order. Alternate locations other than blank or 'A' are dropped.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed records, [`Error::EmptyFile`]
/// when no atom records survive, and [`Error::Io`] for read failures.
pub fn read_pdb<R: Read>(reader: R) -> Result<Structure, Error> {
    let reader = BufReader::new(reader);
    let mut structure = Structure::new();
    let mut current: Option<(ResidueId, String, Vec<Atom>)> = None;
    let mut atom_index = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let record = line.get(0..6).unwrap_or("").trim_end();

        match record {
            "ATOM" | "HETATM" => {}
            // first model only
            "ENDMDL" => break,
            _ => continue,
        }

        if line.len() < 54 {
            return Err(Error::parse(line_no, "atom record shorter than 54 columns"));
        }

        let alt_loc = line.as_bytes()[16] as char;
        if alt_loc != ' ' && alt_loc != 'A' {
            continue;
        }

        let name = field(&line, 12, 16).trim().to_string();
        if name.is_empty() {
            return Err(Error::parse(line_no, "blank atom name"));
        }
        let res_name = field(&line, 17, 20).trim().to_string();
        let chain_id = line.as_bytes()[21] as char;
        let seq_num: i32 = field(&line, 22, 26)
            .trim()
            .parse()
            .map_err(|_| Error::parse(line_no, "invalid residue sequence number"))?;
        let insertion_code = line.as_bytes()[26] as char;

        let mut position = [0.0f64; 3];
        for (k, (start, end)) in [(30, 38), (38, 46), (46, 54)].into_iter().enumerate() {
            position[k] = field(&line, start, end)
                .trim()
                .parse()
                .map_err(|_| Error::parse(line_no, "invalid coordinate field"))?;
        }

        let element = parse_element(&line, &name)
            .ok_or_else(|| Error::parse(line_no, format!("cannot determine element of '{}'", name)))?;

        let id = ResidueId::new(chain_id, seq_num, Some(insertion_code));
        let atom = Atom::new(name, element, position, atom_index);
        atom_index += 1;

        match current.as_mut() {
            Some((cur_id, cur_name, atoms)) if *cur_id == id && *cur_name == res_name => {
                atoms.push(atom);
            }
            _ => {
                flush(&mut structure, current.take());
                current = Some((id, res_name, vec![atom]));
            }
        }
    }
    flush(&mut structure, current.take());

    if structure.atom_count() == 0 {
        return Err(Error::EmptyFile);
    }
    Ok(structure)
}

fn flush(structure: &mut Structure, pending: Option<(ResidueId, String, Vec<Atom>)>) {
    if let Some((id, name, atoms)) = pending {
        let index = structure.residues.len();
        structure.residues.push(Residue::new(name, id, atoms, index));
    }
}

fn field(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("")
}

/// Element from columns 77-78 when present, otherwise inferred from the
/// atom name.
fn parse_element(line: &str, atom_name: &str) -> Option<Element> {
    let column = field(line, 76, 78).trim();
    if !column.is_empty() {
        if let Ok(element) = Element::from_str(column) {
            return Some(element);
        }
    }

    // names starting in column 13 can carry a two-letter symbol; names
    // starting in column 14 are always one-letter elements
    let starts_in_column_13 = line.as_bytes().get(12).is_some_and(|b| *b != b' ');
    if starts_in_column_13 {
        let bare: String = atom_name
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        if bare.len() >= 2 {
            if let Ok(element) = Element::from_str(&bare[..2]) {
                return Some(element);
            }
        }
    }

    let first = atom_name.chars().find(|c| c.is_ascii_alphabetic())?;
    Element::from_str(&first.to_string()).ok()
}
