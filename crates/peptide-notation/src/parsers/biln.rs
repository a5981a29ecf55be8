//! BILN strings, like `A-C(1,1)-G.T-C(1,2)-K`
//!
//! Chains are separated by `.` and residues by `-`. Bonds are written as inline markers on the residues they join:
//! `(1,2)` means "this residue takes part in bond 1 through its R2 group", and every bond label must appear on
//! exactly two residues. Monomer names are never bracketed, so they can't contain any of `.`, `-`, `(`, or `)`. Nor
//! can they contain the `$` or `|` separators of HELM, since they'd have nowhere to go when written as HELM.

use ahash::{HashMap, HashMapExt};
use nom::{
    bytes::complete::take_till1,
    character::complete::char,
    combinator::map,
    multi::{many0, separated_list1},
    sequence::{pair, preceded, separated_pair, terminated},
};
use nom_miette::{expect, fatal, final_parser, wrap_err};
use tracing::debug;

use crate::{Bond, Endpoint, Molecule, Monomer, NotationError, RGroup, Result};

use super::{
    errors::{NotationErrorKind, ParseResult},
    primitives::{digits, number},
};

#[derive(Clone, Eq, PartialEq, Debug)]
struct Residue<'s> {
    name: &'s str,
    markers: Vec<BondMarker<'s>>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct BondMarker<'s> {
    label: &'s str,
    rgroup: RGroup,
}

/// # Errors
///
/// Returns [`NotationError::Syntax`] if `biln` can't be parsed, or [`NotationError::BondIntegrity`] if any bond
/// label is used by anything other than exactly two residues.
pub fn parse(biln: &str) -> Result<Molecule> {
    let parsed = final_parser(molecule)(biln)?;

    // NOTE: Labels are compared as text, and bonds are ordered by when their label gets its second endpoint
    let mut bond_ids: HashMap<&str, usize> = HashMap::new();
    let mut partial_bonds: Vec<(&str, Vec<Endpoint>)> = Vec::new();
    let mut bonds = Vec::new();
    let mut chains = Vec::with_capacity(parsed.len());
    for (c, residues) in parsed.into_iter().enumerate() {
        let mut chain = Vec::with_capacity(residues.len());
        for (r, Residue { name, markers }) in residues.into_iter().enumerate() {
            for BondMarker { label, rgroup } in markers {
                let id = *bond_ids.entry(label).or_insert_with(|| {
                    partial_bonds.push((label, Vec::new()));
                    partial_bonds.len() - 1
                });
                let endpoints = &mut partial_bonds[id].1;
                endpoints.push(Endpoint::new(c, r, rgroup));
                if let &[left, right] = endpoints.as_slice() {
                    debug!(label, %left, %right, "resolved BILN bond");
                    bonds.push(Bond::new(left, right));
                }
            }
            chain.push(Monomer::new(name));
        }
        chains.push(chain);
    }

    // Broken labels are reported in order of first appearance
    if let Some((label, endpoints)) = partial_bonds.iter().find(|(_, e)| e.len() != 2) {
        return Err(NotationError::bond_integrity(label, endpoints.len()));
    }

    Molecule::new(chains, bonds)
}

/// Molecule = Chain , { "." , Chain } ;
fn molecule(i: &str) -> ParseResult<Vec<Vec<Residue>>> {
    separated_list1(char('.'), chain)(i)
}

/// Chain = Residue , { "-" , Residue } ;
fn chain(i: &str) -> ParseResult<Vec<Residue>> {
    separated_list1(char('-'), fatal(residue))(i)
}

/// Residue = Monomer Name , { Bond Marker } ;
fn residue(i: &str) -> ParseResult<Residue> {
    let parser = pair(monomer_name, many0(bond_marker));
    map(parser, |(name, markers)| Residue { name, markers })(i)
}

/// Monomer Name = { ? any character except ".", "-", "(", ")", "$", or "|" ? }- ;
fn monomer_name(i: &str) -> ParseResult<&str> {
    let parser = take_till1(|c: char| matches!(c, '.' | '-' | '(' | ')' | '$' | '|'));
    expect(parser, NotationErrorKind::ExpectedMonomer)(i)
}

/// Bond Marker = "(" , Bond Label , "," , R-Group , ")" ;
/// Bond Label = Digits ;
/// R-Group = Number ;
fn bond_marker(i: &str) -> ParseResult<BondMarker> {
    let label = expect(digits, NotationErrorKind::ExpectedBondLabel);
    let comma = expect(char(','), NotationErrorKind::ExpectedComma);
    let rgroup = expect(number, NotationErrorKind::ExpectedRGroup);
    let close = expect(char(')'), NotationErrorKind::ExpectedMarkerEnd);
    let contents = terminated(separated_pair(label, comma, rgroup), close);
    // NOTE: Once a `(` has been seen, this can only be a bond marker, so there is no point in backtracking
    let parser = preceded(
        char('('),
        fatal(wrap_err(contents, NotationErrorKind::ExpectedBondMarker)),
    );
    map(parser, |(label, rgroup)| BondMarker { label, rgroup })(i)
}

#[cfg(test)]
mod tests {
    use nom_miette::LabeledError;

    use crate::testing_tools::assert_miette_contains;

    use super::*;

    fn names(molecule: &Molecule) -> Vec<Vec<&str>> {
        molecule
            .chains()
            .iter()
            .map(|chain| chain.iter().map(Monomer::name).collect())
            .collect()
    }

    fn bond(left: (usize, usize, RGroup), right: (usize, usize, RGroup)) -> Bond {
        Bond::new(
            Endpoint::new(left.0, left.1, left.2),
            Endpoint::new(right.0, right.1, right.2),
        )
    }

    fn syntax_error(biln: &str) -> LabeledError<NotationErrorKind> {
        match parse(biln) {
            Err(NotationError::Syntax(error)) => error,
            other => panic!("expected a syntax error for {biln:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_monomer_name() {
        // Valid Monomer Names
        assert_eq!(monomer_name("A"), Ok(("", "A")));
        assert_eq!(monomer_name("Nle"), Ok(("", "Nle")));
        assert_eq!(monomer_name("D_Ala"), Ok(("", "D_Ala")));
        // Invalid Monomer Names
        assert!(monomer_name("").is_err());
        assert!(monomer_name("-A").is_err());
        assert!(monomer_name(".A").is_err());
        assert!(monomer_name("(1,3)").is_err());
        assert!(monomer_name("$A").is_err());
        assert!(monomer_name("|A").is_err());
        // Multiple Monomer Names
        assert_eq!(monomer_name("C(1,3)"), Ok(("(1,3)", "C")));
        assert_eq!(monomer_name("Ac-C"), Ok(("-C", "Ac")));
        assert_eq!(monomer_name("K.E"), Ok((".E", "K")));
        assert_eq!(monomer_name("A|B"), Ok(("|B", "A")));
        assert_eq!(monomer_name("A$B"), Ok(("$B", "A")));
    }

    #[test]
    fn test_bond_marker() {
        let marker = |label, rgroup| BondMarker { label, rgroup };
        // Valid Bond Markers
        assert_eq!(bond_marker("(1,3)"), Ok(("", marker("1", 3))));
        assert_eq!(bond_marker("(12,1)"), Ok(("", marker("12", 1))));
        assert_eq!(bond_marker("(01,2)"), Ok(("", marker("01", 2))));
        // Invalid Bond Markers
        assert!(bond_marker("").is_err());
        assert!(bond_marker("1,3").is_err());
        assert!(bond_marker("(1,3").is_err());
        assert!(bond_marker("(1;3)").is_err());
        assert!(bond_marker("(a,3)").is_err());
        assert!(bond_marker("(1,R3)").is_err());
        assert!(bond_marker("(1, 3)").is_err());
        // Multiple Bond Markers
        assert_eq!(bond_marker("(1,3)(2,3)"), Ok(("(2,3)", marker("1", 3))));
        assert_eq!(bond_marker("(1,3)-A"), Ok(("-A", marker("1", 3))));
    }

    #[test]
    fn test_residue() {
        let (rest, parsed) = residue("K(1,3)(2,1)-E").unwrap();
        assert_eq!(rest, "-E");
        assert_eq!(parsed.name, "K");
        assert_eq!(
            parsed.markers,
            [
                BondMarker {
                    label: "1",
                    rgroup: 3
                },
                BondMarker {
                    label: "2",
                    rgroup: 1
                }
            ]
        );

        let (rest, parsed) = residue("Nle.A").unwrap();
        assert_eq!((rest, parsed.name), (".A", "Nle"));
        assert!(parsed.markers.is_empty());
    }

    #[test]
    fn linear_chains() {
        let molecule = parse("A-C-G").unwrap();
        assert_eq!(names(&molecule), [["A", "C", "G"]]);
        assert!(molecule.bonds().is_empty());

        let molecule = parse("Ac-Nle-am.G").unwrap();
        assert_eq!(names(&molecule), [vec!["Ac", "Nle", "am"], vec!["G"]]);
    }

    #[test]
    fn cross_linked_chains() {
        let molecule = parse("A-C(1,1)-G.T-C(1,2)-K").unwrap();
        assert_eq!(names(&molecule), [["A", "C", "G"], ["T", "C", "K"]]);
        assert_eq!(molecule.bonds(), [bond((0, 1, 1), (1, 1, 2))]);

        let molecule = parse("C(1,3)-A-A-C(1,3)").unwrap();
        assert_eq!(molecule.bonds(), [bond((0, 0, 3), (0, 3, 3))]);
    }

    #[test]
    fn bonds_follow_completion_order() {
        // Label 1 is closed before label 2, even though label 2 opens first
        let molecule = parse("C(2,3)-C(1,3)-C(1,3)-C(2,3)").unwrap();
        assert_eq!(
            molecule.bonds(),
            [bond((0, 1, 3), (0, 2, 3)), bond((0, 0, 3), (0, 3, 3))]
        );

        let molecule = parse("K(1,3)(2,3)-E.E(1,3).D(2,3)-G").unwrap();
        assert_eq!(
            molecule.bonds(),
            [bond((0, 0, 3), (1, 0, 3)), bond((0, 0, 3), (2, 0, 3))]
        );
    }

    #[test]
    fn bond_to_the_same_residue() {
        let molecule = parse("A-C(1,1)(1,2)").unwrap();
        assert_eq!(molecule.bonds(), [bond((0, 1, 1), (0, 1, 2))]);
    }

    #[test]
    fn bond_integrity() {
        assert_eq!(
            parse("C(1,3)-C(1,3)-C(1,3)"),
            Err(NotationError::BondIntegrity {
                label: "1".to_owned(),
                endpoints: 3
            })
        );
        assert_eq!(
            parse("A-C(1,3)-G"),
            Err(NotationError::BondIntegrity {
                label: "1".to_owned(),
                endpoints: 1
            })
        );
        // Labels are compared as text
        assert_eq!(
            parse("C(01,3)-C(1,3)"),
            Err(NotationError::BondIntegrity {
                label: "01".to_owned(),
                endpoints: 1
            })
        );
        // The first broken label (by first appearance) is the one reported
        assert_eq!(
            parse("C(2,3)-C(1,3)-C(1,3)"),
            Err(NotationError::BondIntegrity {
                label: "2".to_owned(),
                endpoints: 1
            })
        );
    }

    #[test]
    fn syntax_errors() {
        let error = syntax_error("");
        assert_eq!(error.kind(), Some(&NotationErrorKind::ExpectedMonomer));

        let error = syntax_error("A--G");
        assert_eq!(error.kind(), Some(&NotationErrorKind::ExpectedMonomer));
        assert_eq!(error.input(), "A--G");

        let error = syntax_error("A.-G");
        assert_eq!(error.kind(), Some(&NotationErrorKind::ExpectedMonomer));

        let error = syntax_error("A-C(1,3");
        assert_eq!(error.kind(), Some(&NotationErrorKind::ExpectedBondMarker));
        assert_eq!(
            error.root_kind(),
            Some(&NotationErrorKind::ExpectedMarkerEnd)
        );

        let error = syntax_error("A-C(x,3)-C(x,3)");
        assert_eq!(
            error.root_kind(),
            Some(&NotationErrorKind::ExpectedBondLabel)
        );

        let error = syntax_error("A-C(1,3)x-C(1,3)");
        assert_eq!(error.kind(), Some(&NotationErrorKind::Incomplete));

        let error = syntax_error("A-G)");
        assert_eq!(error.kind(), Some(&NotationErrorKind::Incomplete));

        // HELM separators can't appear in monomer names
        let error = syntax_error("A|B-G");
        assert_eq!(error.kind(), Some(&NotationErrorKind::Incomplete));

        let error = syntax_error("A$B-G");
        assert_eq!(error.kind(), Some(&NotationErrorKind::Incomplete));

        let error = syntax_error("A-$");
        assert_eq!(error.kind(), Some(&NotationErrorKind::ExpectedMonomer));
    }

    #[test]
    fn syntax_error_reports() {
        assert_miette_contains!(parse("A--G"), "expected monomer");
        assert_miette_contains!(parse("A-C(1;3)-C(1,3)"), "expected ','");
        assert_miette_contains!(parse("A-C(1,3-C(1,3)"), "expected ')'");
    }
}
