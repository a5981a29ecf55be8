use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::{Bond, Chain, Endpoint, Molecule, Monomer, NotationError, RGroup, Result};

impl Molecule {
    /// # Errors
    ///
    /// Returns [`NotationError::DanglingBond`] if any bond points to a chain or residue that isn't in `chains`.
    pub fn new(chains: Vec<Chain>, bonds: Vec<Bond>) -> Result<Self> {
        let molecule = Self { chains, bonds };
        if let Some(bond) = molecule.bonds.iter().find(|b| !molecule.connects(b)) {
            return Err(NotationError::dangling_bond(bond));
        }
        Ok(molecule)
    }

    #[must_use]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Returns `true` if `endpoint` names a residue that exists in this molecule
    #[must_use]
    pub fn contains(&self, endpoint: &Endpoint) -> bool {
        self.chains
            .get(endpoint.chain)
            .is_some_and(|chain| endpoint.residue < chain.len())
    }

    /// Compares chains and residues in order, but treats bonds as an unordered collection of unordered endpoint
    /// pairs. The numbering of bonds and the left / right placement of their endpoints don't matter.
    #[must_use]
    pub fn same_topology(&self, other: &Self) -> bool {
        let bond_set = |molecule: &Self| {
            molecule
                .bonds
                .iter()
                .map(Bond::normalized)
                .sorted_unstable()
                .collect_vec()
        };
        self.chains == other.chains && bond_set(self) == bond_set(other)
    }

    fn connects(&self, bond: &Bond) -> bool {
        self.contains(&bond.left) && self.contains(&bond.right)
    }
}

impl Monomer {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Bond {
    #[must_use]
    pub const fn new(left: Endpoint, right: Endpoint) -> Self {
        Self { left, right }
    }

    /// The same bond, with its endpoints in ascending order
    #[must_use]
    pub fn normalized(&self) -> Self {
        let (left, right) = if self.left <= self.right {
            (self.left, self.right)
        } else {
            (self.right, self.left)
        };
        Self { left, right }
    }
}

impl Endpoint {
    #[must_use]
    pub const fn new(chain: usize, residue: usize, rgroup: RGroup) -> Self {
        Self {
            chain,
            residue,
            rgroup,
        }
    }
}

impl Display for Monomer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            chain,
            residue,
            rgroup,
        } = self;
        write!(f, "chain {chain}, residue {residue}, R{rgroup}")
    }
}

impl Display for Bond {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}) ~ ({})", self.left, self.right)
    }
}
