//! Lossless conversion between BILN and HELM (v2.0) descriptions of cross-linked, multi-chain peptides
//!
//! Both notations are parsed into the same [`Molecule`] (ordered chains of monomers, plus explicit bonds between
//! R-groups), which can then be written back out in either notation:
//!
//! ```
//! use peptide_notation::Peptide;
//!
//! let peptide = Peptide::from_biln("A-C(1,1)-G.T-C(1,2)-K")?;
//! assert_eq!(
//!     peptide.to_helm().as_deref(),
//!     Some("PEPTIDE1{A.C.G}|PEPTIDE2{T.C.K}$PEPTIDE1,PEPTIDE2,2:R1-2:R2$$$V2.0")
//! );
//! # Ok::<(), peptide_notation::NotationError>(())
//! ```

pub mod errors;
mod model;
pub mod parsers;
#[cfg(test)]
mod testing_tools;
pub mod tokenizer;
mod writers;

use std::fmt::{self, Display, Formatter};

pub use errors::{EntityKind, NotationError, Result};

/// The two notations that can be read and written
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Notation {
    /// The compact line notation: `A-C(1,1)-G.T-C(1,2)-K`
    Biln,
    /// The five-section HELM v2.0 notation: `PEPTIDE1{A.C.G}|PEPTIDE2{T.C.K}$...$$$V2.0`
    Helm,
}

/// A parsed peptide that can be rendered in either [`Notation`]
///
/// Every `Peptide` owns a fully-populated [`Molecule`]: a failed parse never produces one.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Peptide {
    molecule: Molecule,
}

/// The notation-independent description of a peptide: chains of monomers, plus the extra (non-backbone) bonds
/// between them
///
/// Chain indices are the order in which chains were first seen, and residue indices are positions within a chain, so
/// neither depends on any identifiers used in the source notation.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Molecule {
    chains: Vec<Chain>,
    bonds: Vec<Bond>,
}

pub type Chain = Vec<Monomer>;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Monomer(String);

/// A bond between the R-groups of two residues, kept in the order its endpoints were discovered
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Bond {
    pub left: Endpoint,
    pub right: Endpoint,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Endpoint {
    pub chain: usize,
    pub residue: usize,
    pub rgroup: RGroup,
}

/// The numbered attachment point on a monomer (normally 1-3)
pub type RGroup = u32;

impl Peptide {
    /// Parses exactly one of `biln` or `helm`
    ///
    /// # Errors
    ///
    /// Returns [`NotationError::InvalidUsage`] (before attempting any parsing) if both or neither strings are given,
    /// otherwise any error from [`Peptide::from_biln`] or [`Peptide::from_helm`].
    pub fn new(biln: Option<&str>, helm: Option<&str>) -> Result<Self> {
        match (biln, helm) {
            (Some(biln), None) => Self::from_biln(biln),
            (None, Some(helm)) => Self::from_helm(helm),
            (Some(_), Some(_)) | (None, None) => Err(NotationError::InvalidUsage),
        }
    }

    /// # Errors
    ///
    /// Returns an error if `input` isn't valid in the given `notation`.
    pub fn parse(notation: Notation, input: impl AsRef<str>) -> Result<Self> {
        let input = input.as_ref();
        let molecule = match notation {
            Notation::Biln => parsers::biln::parse(input)?,
            Notation::Helm => parsers::helm::parse(input)?,
        };
        Ok(Self { molecule })
    }

    /// # Errors
    ///
    /// Returns [`NotationError::BondIntegrity`] if a bond label doesn't appear exactly twice, or
    /// [`NotationError::Syntax`] if `biln` doesn't follow the BILN grammar.
    pub fn from_biln(biln: impl AsRef<str>) -> Result<Self> {
        Self::parse(Notation::Biln, biln)
    }

    /// # Errors
    ///
    /// Returns an error if `helm` doesn't split into five sections, contains a simple polymer that is missing its
    /// sequence or isn't a `PEPTIDE`, or contains a connection that is malformed or points to nothing.
    pub fn from_helm(helm: impl AsRef<str>) -> Result<Self> {
        Self::parse(Notation::Helm, helm)
    }

    #[must_use]
    pub const fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    /// Renders the peptide as `notation`, returning `None` if there is no molecule to render
    #[must_use]
    pub fn render(&self, notation: Notation) -> Option<String> {
        match notation {
            Notation::Biln => writers::biln::write(&self.molecule),
            Notation::Helm => writers::helm::write(&self.molecule),
        }
    }

    #[must_use]
    pub fn to_biln(&self) -> Option<String> {
        self.render(Notation::Biln)
    }

    #[must_use]
    pub fn to_helm(&self) -> Option<String> {
        self.render(Notation::Helm)
    }
}

impl From<Molecule> for Peptide {
    fn from(molecule: Molecule) -> Self {
        Self { molecule }
    }
}

impl Display for Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Biln => write!(f, "BILN"),
            Self::Helm => write!(f, "HELM"),
        }
    }
}
