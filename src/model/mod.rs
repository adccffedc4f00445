pub mod atom;
pub mod frame;
pub mod pair;
pub mod residue;
pub mod types;
