//! Idealized base templates in the standard base reference frame.
//!
//! Each template is planar (z = 0) with its origin at the center an
//! idealized Watson-Crick pair would share and its y-axis along the
//! glycosidic direction. The coordinate set is internally consistent: the
//! complementary strand-II geometry of a canonical pair is exactly the
//! 180-degree x-axis rotation of the partner's template.
//!
//! Frame fitting uses only the ring atoms (9 for purines, 6 for
//! pyrimidines); the exocyclic pairing-edge atoms are carried for reference
//! geometry and fixture construction.

use crate::model::types::{BaseClass, BaseCode};

pub type TemplateAtom = (&'static str, [f64; 3]);

/// Idealized coordinates for one base type.
#[derive(Debug, Clone, Copy)]
pub struct BaseTemplate {
    pub code: BaseCode,
    pub class: BaseClass,
    /// Ring atoms followed by exocyclic pairing-edge atoms.
    pub atoms: &'static [TemplateAtom],
}

pub const PURINE_RING_ATOMS: &[&str] = &["N1", "C2", "N3", "C4", "C5", "C6", "N7", "C8", "N9"];
pub const PYRIMIDINE_RING_ATOMS: &[&str] = &["N1", "C2", "N3", "C4", "C5", "C6"];

impl BaseTemplate {
    pub fn ring_atom_names(&self) -> &'static [&'static str] {
        match self.class {
            BaseClass::Purine => PURINE_RING_ATOMS,
            _ => PYRIMIDINE_RING_ATOMS,
        }
    }

    /// Ring atoms only, in template order.
    pub fn ring_atoms(&self) -> impl Iterator<Item = &'static TemplateAtom> + '_ {
        let names = self.ring_atom_names();
        self.atoms.iter().filter(move |(n, _)| names.contains(n))
    }

    pub fn atom(&self, name: &str) -> Option<[f64; 3]> {
        self.atoms
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, pos)| *pos)
    }
}

const ADENINE: &[TemplateAtom] = &[
    ("N9", [-1.290, 4.450, 0.000]),
    ("C8", [0.064, 4.716, 0.000]),
    ("N7", [0.735, 3.510, 0.000]),
    ("C5", [-0.204, 2.499, 0.000]),
    ("C6", [-0.081, 1.125, 0.000]),
    ("N1", [-1.210, 0.331, 0.000]),
    ("C2", [-2.462, 0.912, 0.000]),
    ("N3", [-2.584, 2.286, 0.000]),
    ("C4", [-1.456, 3.080, 0.000]),
    ("N6", [1.135, 0.561, 0.000]),
];

const GUANINE: &[TemplateAtom] = &[
    ("N9", [-1.290, 4.446, 0.000]),
    ("C8", [-0.099, 5.143, 0.000]),
    ("N7", [0.932, 4.225, 0.000]),
    ("C5", [0.377, 2.961, 0.000]),
    ("C6", [0.945, 1.703, 0.000]),
    ("N1", [0.140, 0.583, 0.000]),
    ("C2", [-1.233, 0.720, 0.000]),
    ("N3", [-1.801, 1.977, 0.000]),
    ("C4", [-0.996, 3.098, 0.000]),
    ("O6", [2.169, 1.581, 0.000]),
    ("N2", [-2.015, -0.369, 0.000]),
];

/// Hypoxanthine: the guanine scaffold without the 2-amino group.
const INOSINE: &[TemplateAtom] = &[
    ("N9", [-1.290, 4.446, 0.000]),
    ("C8", [-0.099, 5.143, 0.000]),
    ("N7", [0.932, 4.225, 0.000]),
    ("C5", [0.377, 2.961, 0.000]),
    ("C6", [0.945, 1.703, 0.000]),
    ("N1", [0.140, 0.583, 0.000]),
    ("C2", [-1.233, 0.720, 0.000]),
    ("N3", [-1.801, 1.977, 0.000]),
    ("C4", [-0.996, 3.098, 0.000]),
    ("O6", [2.169, 1.581, 0.000]),
];

const CYTOSINE: &[TemplateAtom] = &[
    ("N1", [-1.290, 4.446, 0.000]),
    ("C2", [-1.839, 3.180, 0.000]),
    ("N3", [-1.017, 2.072, 0.000]),
    ("C4", [0.354, 2.229, 0.000]),
    ("C5", [0.903, 3.495, 0.000]),
    ("C6", [0.081, 4.604, 0.000]),
    ("O2", [-3.061, 3.040, 0.000]),
    ("N4", [1.152, 1.153, 0.000]),
];

const THYMINE: &[TemplateAtom] = &[
    ("N1", [-1.290, 4.450, 0.000]),
    ("C2", [-1.374, 3.073, 0.000]),
    ("N3", [-0.223, 2.311, 0.000]),
    ("C4", [1.012, 2.927, 0.000]),
    ("C5", [1.096, 4.304, 0.000]),
    ("C6", [-0.055, 5.066, 0.000]),
    ("O2", [-2.475, 2.524, 0.000]),
    ("O4", [2.037, 2.248, 0.000]),
    ("C7", [2.438, 4.974, 0.000]),
];

const URACIL: &[TemplateAtom] = &[
    ("N1", [-1.290, 4.450, 0.000]),
    ("C2", [-1.374, 3.073, 0.000]),
    ("N3", [-0.223, 2.311, 0.000]),
    ("C4", [1.012, 2.927, 0.000]),
    ("C5", [1.096, 4.304, 0.000]),
    ("C6", [-0.055, 5.066, 0.000]),
    ("O2", [-2.475, 2.524, 0.000]),
    ("O4", [2.037, 2.248, 0.000]),
];

static TEMPLATE_A: BaseTemplate = BaseTemplate {
    code: BaseCode::A,
    class: BaseClass::Purine,
    atoms: ADENINE,
};
static TEMPLATE_G: BaseTemplate = BaseTemplate {
    code: BaseCode::G,
    class: BaseClass::Purine,
    atoms: GUANINE,
};
static TEMPLATE_I: BaseTemplate = BaseTemplate {
    code: BaseCode::I,
    class: BaseClass::Purine,
    atoms: INOSINE,
};
static TEMPLATE_C: BaseTemplate = BaseTemplate {
    code: BaseCode::C,
    class: BaseClass::Pyrimidine,
    atoms: CYTOSINE,
};
static TEMPLATE_T: BaseTemplate = BaseTemplate {
    code: BaseCode::T,
    class: BaseClass::Pyrimidine,
    atoms: THYMINE,
};
static TEMPLATE_U: BaseTemplate = BaseTemplate {
    code: BaseCode::U,
    class: BaseClass::Pyrimidine,
    atoms: URACIL,
};

/// Looks up the template for a base code.
pub fn template_for(code: BaseCode) -> &'static BaseTemplate {
    match code {
        BaseCode::A => &TEMPLATE_A,
        BaseCode::G => &TEMPLATE_G,
        BaseCode::I => &TEMPLATE_I,
        BaseCode::C => &TEMPLATE_C,
        BaseCode::T => &TEMPLATE_T,
        BaseCode::U => &TEMPLATE_U,
    }
}
