use itertools::Itertools;

use crate::Molecule;

/// Writes `molecule` as BILN, numbering bonds from 1 in the order they are stored
///
/// Returns `None` if that leaves nothing to write.
pub fn write(molecule: &Molecule) -> Option<String> {
    let mut chains: Vec<Vec<String>> = molecule
        .chains()
        .iter()
        .map(|chain| chain.iter().map(ToString::to_string).collect())
        .collect();

    for (label, bond) in (1..).zip(molecule.bonds()) {
        for endpoint in [bond.left, bond.right] {
            if let Some(residue) = chains
                .get_mut(endpoint.chain)
                .and_then(|chain| chain.get_mut(endpoint.residue))
            {
                residue.push_str(&format!("({label},{})", endpoint.rgroup));
            }
        }
    }

    let biln = chains.iter().map(|chain| chain.join("-")).join(".");
    (!biln.is_empty()).then_some(biln)
}
