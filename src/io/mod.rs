//! Structure input for the pairing engine.

pub mod error;
mod pdb;

pub use error::Error;
pub use pdb::read_pdb;
