//! Rendering a [`Molecule`](crate::Molecule) as BILN or HELM text

pub mod biln;
pub mod helm;
