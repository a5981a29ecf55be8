//! Parsers turning BILN and HELM strings into [`Molecule`](crate::Molecule)s

pub mod biln;
pub mod errors;
pub mod helm;
pub(crate) mod primitives;
