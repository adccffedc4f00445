use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(pub(crate) String);

/// Chemical elements encountered in nucleic-acid structure files.
///
/// Covers the organic elements of nucleotides plus the ions and halogens
/// commonly present as hetero groups. Anything else fails to parse and the
/// reader reports it with file context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Element {
    H,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    P,
    S,
    Cl,
    K,
    Ca,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Se,
    Br,
    I,
}

impl Element {
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Mn => "Mn",
            Element::Fe => "Fe",
            Element::Co => "Co",
            Element::Ni => "Ni",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
            Element::Se => "Se",
            Element::Br => "Br",
            Element::I => "I",
        }
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let normalized: String = match (chars.next(), chars.next()) {
            (Some(a), Some(b)) if chars.next().is_none() => {
                format!("{}{}", a.to_ascii_uppercase(), b.to_ascii_lowercase())
            }
            (Some(a), None) => a.to_ascii_uppercase().to_string(),
            _ => return Err(ParseElementError(s.to_string())),
        };

        let element = match normalized.as_str() {
            "H" | "D" => Element::H,
            "C" => Element::C,
            "N" => Element::N,
            "O" => Element::O,
            "F" => Element::F,
            "Na" => Element::Na,
            "Mg" => Element::Mg,
            "P" => Element::P,
            "S" => Element::S,
            "Cl" => Element::Cl,
            "K" => Element::K,
            "Ca" => Element::Ca,
            "Mn" => Element::Mn,
            "Fe" => Element::Fe,
            "Co" => Element::Co,
            "Ni" => Element::Ni,
            "Cu" => Element::Cu,
            "Zn" => Element::Zn,
            "Se" => Element::Se,
            "Br" => Element::Br,
            "I" => Element::I,
            _ => return Err(ParseElementError(s.to_string())),
        };
        Ok(element)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One-letter code of a nucleobase recognized by the template library.
///
/// `I` is inosine/hypoxanthine, the one non-standard code common enough in
/// tRNA structures to deserve its own pairing chemistry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum BaseCode {
    A,
    C,
    G,
    T,
    U,
    I,
}

impl BaseCode {
    pub fn class(&self) -> BaseClass {
        match self {
            BaseCode::A | BaseCode::G | BaseCode::I => BaseClass::Purine,
            BaseCode::C | BaseCode::T | BaseCode::U => BaseClass::Pyrimidine,
        }
    }

    /// Ring nitrogen bonded to the sugar, used as the glycosidic proxy atom.
    pub fn glycosidic_atom(&self) -> &'static str {
        match self.class() {
            BaseClass::Purine => "N9",
            _ => "N1",
        }
    }

    pub fn letter(&self) -> char {
        match self {
            BaseCode::A => 'A',
            BaseCode::C => 'C',
            BaseCode::G => 'G',
            BaseCode::T => 'T',
            BaseCode::U => 'U',
            BaseCode::I => 'I',
        }
    }
}

impl fmt::Display for BaseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Structural class of a nucleobase ring system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum BaseClass {
    Purine,
    Pyrimidine,
    Unknown,
}
