use std::fmt::{self, Display, Formatter};

use miette::Diagnostic;
use nom_miette::LabeledError;
use thiserror::Error;

use crate::parsers::errors::NotationErrorKind;

pub type Result<T, E = NotationError> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Clone, Eq, PartialEq, Error)]
pub enum NotationError {
    #[diagnostic(help("supply either a BILN string or a HELM string, but not both"))]
    #[error("exactly one of a BILN or HELM string must be supplied")]
    InvalidUsage,

    #[diagnostic(help(
        "HELM v2.0 strings are made of five '$'-separated sections: simple polymers, connections, polymer \
        groups, annotations, and the version"
    ))]
    #[error("expected 5 sections in the HELM string {helm:?}, but found {found}")]
    MalformedSections { helm: String, found: usize },

    #[diagnostic(help("every simple polymer needs a non-empty sequence of '.'-separated monomers inside braces"))]
    #[error("the simple polymer {entry:?} is missing its sequence")]
    MissingSequence { entry: String },

    #[diagnostic(help("this is usually caused by a missing or unrecognised monomer"))]
    #[error("the simple polymer {entry:?} is {kind}, but only PEPTIDE polymers are supported")]
    UnsupportedEntity { entry: String, kind: EntityKind },

    #[diagnostic(help("every bond label must be used by exactly two residues"))]
    #[error("the bond {label:?} has {endpoints} endpoint(s), but bonds must have exactly 2")]
    BondIntegrity { label: String, endpoints: usize },

    #[error("the bond {bond:?} refers to a chain or residue that doesn't exist")]
    DanglingBond { bond: String },

    #[diagnostic(transparent)]
    #[error(transparent)]
    Syntax(#[from] LabeledError<NotationErrorKind>),
}

/// The kind of simple polymer that was found in place of a `PEPTIDE`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum EntityKind {
    Chemical,
    Unrecognised,
}

impl NotationError {
    pub(crate) fn malformed_sections(helm: &str, found: usize) -> Self {
        let helm = helm.to_owned();

        Self::MalformedSections { helm, found }
    }

    pub(crate) fn missing_sequence(entry: &str) -> Self {
        let entry = entry.to_owned();

        Self::MissingSequence { entry }
    }

    pub(crate) fn unsupported_entity(entry: &str, kind: EntityKind) -> Self {
        let entry = entry.to_owned();

        Self::UnsupportedEntity { entry, kind }
    }

    pub(crate) fn bond_integrity(label: &str, endpoints: usize) -> Self {
        let label = label.to_owned();

        Self::BondIntegrity { label, endpoints }
    }

    pub(crate) fn dangling_bond(bond: impl ToString) -> Self {
        let bond = bond.to_string();

        Self::DanglingBond { bond }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chemical => write!(f, "an explicit chemical entity (CHEM)"),
            Self::Unrecognised => write!(f, "of an unrecognised polymer type"),
        }
    }
}
