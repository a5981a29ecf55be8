use itertools::Itertools;

use crate::{Bond, Molecule, Monomer};

/// Writes `molecule` as HELM v2.0, renumbering its polymers as `PEPTIDE1` to `PEPTIDEn` in chain order
///
/// Returns `None` if the molecule has no chains.
pub fn write(molecule: &Molecule) -> Option<String> {
    if molecule.is_empty() {
        return None;
    }

    let polymers = molecule
        .chains()
        .iter()
        .enumerate()
        .map(|(i, chain)| {
            let sequence = chain.iter().map(bracketed).join(".");
            format!("PEPTIDE{}{{{sequence}}}", i + 1)
        })
        .join("|");
    let connections = molecule.bonds().iter().map(connection).join("|");

    Some(format!("{polymers}${connections}$$$V2.0"))
}

// Only single-character monomers can be written without brackets
fn bracketed(monomer: &Monomer) -> String {
    let name = monomer.name();
    if name.chars().count() > 1 {
        format!("[{name}]")
    } else {
        name.to_owned()
    }
}

fn connection(bond: &Bond) -> String {
    let Bond { left, right } = bond;
    format!(
        "PEPTIDE{},PEPTIDE{},{}:R{}-{}:R{}",
        left.chain + 1,
        right.chain + 1,
        left.residue + 1,
        left.rgroup,
        right.residue + 1,
        right.rgroup
    )
}
