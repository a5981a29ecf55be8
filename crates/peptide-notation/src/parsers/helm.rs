//! HELM (v2.0) strings, like `PEPTIDE1{A.C.G}|PEPTIDE2{T.C.K}$PEPTIDE1,PEPTIDE2,2:R1-2:R2$$$V2.0`
//!
//! Only the first two of the five `$`-separated sections carry any meaning here: the `|`-separated list of simple
//! polymers, and the `|`-separated list of connections between them. Polymer groups, annotations, and the version
//! are split out, but otherwise ignored.

use nom::{
    bytes::complete::tag,
    character::complete::char,
    combinator::map,
    sequence::{preceded, separated_pair},
};
use nom_miette::{expect, final_parser, wrap_err};
use tracing::{debug, trace};

use crate::{
    Bond, Chain, EntityKind, Endpoint, Molecule, Monomer, NotationError, RGroup, Result,
    tokenizer::{Brackets, split_outside},
};

use super::{
    errors::{NotationErrorKind, ParseResult},
    primitives::{comma, number},
};

/// One side of a connection, still using the (1-based) numbering of the HELM string
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct Terminus {
    polymer: u32,
    residue: u32,
    rgroup: RGroup,
}

/// # Errors
///
/// Returns an error if `helm` doesn't have five sections, if any simple polymer is missing its sequence or isn't a
/// `PEPTIDE`, or if any connection is malformed or refers to a polymer or residue that doesn't exist.
pub fn parse(helm: &str) -> Result<Molecule> {
    let [polymers, connections, _groups, _annotations, _version] = sections(helm)?;

    let mut ids = Vec::new();
    let mut chains = Vec::new();
    for entry in polymers.split('|') {
        let (id, chain) = simple_polymer(entry)?;
        debug!(id, residues = chain.len(), "parsed HELM simple polymer");
        ids.push(id);
        chains.push(chain);
    }

    let mut molecule = Molecule {
        chains,
        bonds: Vec::new(),
    };
    if !connections.is_empty() {
        for entry in connections.split('|') {
            let bond = resolve_connection(entry.trim(), &ids, &molecule)?;
            molecule.bonds.push(bond);
        }
    }

    Ok(molecule)
}

fn sections(helm: &str) -> Result<[&str; 5]> {
    let mut sections = Vec::with_capacity(5);
    let mut rest = helm;
    while !rest.is_empty() {
        let Some(boundary) = next_boundary(rest) else {
            sections.push(rest);
            break;
        };
        sections.push(&rest[..boundary]);
        rest = &rest[boundary + 1..];
    }

    // NOTE: The version is optional
    if sections.len() == 4 {
        sections.push("");
    }
    trace!(?sections, "split HELM sections");

    <[&str; 5]>::try_from(sections)
        .map_err(|sections| NotationError::malformed_sections(helm, sections.len()))
}

// A `$` directly followed by `,` or `;` belongs to an embedded CXSMILES annotation, so it's only used as a section
// boundary when there are no other `$`s left
fn next_boundary(helm: &str) -> Option<usize> {
    helm.match_indices('$')
        .map(|(i, _)| i)
        .find(|&i| {
            helm[i + 1..]
                .chars()
                .next()
                .is_some_and(|c| !matches!(c, ',' | ';'))
        })
        .or_else(|| helm.find('$'))
}

fn simple_polymer(entry: &str) -> Result<(u32, Chain)> {
    let entry = entry.trim();
    let missing_sequence = || NotationError::missing_sequence(entry);

    let (Some(open), Some(close)) = (entry.find('{'), entry.rfind('}')) else {
        return Err(missing_sequence());
    };
    if close < open {
        return Err(missing_sequence());
    }
    let (id, sequence) = (&entry[..open], &entry[open + 1..close]);

    if id.starts_with("CHEM") {
        return Err(NotationError::unsupported_entity(
            entry,
            EntityKind::Chemical,
        ));
    } else if !id.starts_with("PEPTIDE") {
        return Err(NotationError::unsupported_entity(
            entry,
            EntityKind::Unrecognised,
        ));
    }
    let id = final_parser(polymer_id)(id)?;

    if sequence.is_empty() {
        return Err(missing_sequence());
    }
    let chain = split_outside(sequence, &['.'], Brackets::SQUARE, true)
        .iter()
        .map(|token| {
            let name = strip_brackets(token);
            (!name.is_empty())
                .then(|| Monomer::new(name))
                .ok_or_else(missing_sequence)
        })
        .collect::<Result<_>>()?;

    Ok((id, chain))
}

// Removes the first `[` and the last `]`, so `[Nle]` becomes `Nle`
fn strip_brackets(token: &str) -> String {
    match (token.find('['), token.rfind(']')) {
        (Some(open), Some(close)) if open < close => {
            [&token[..open], &token[open + 1..close], &token[close + 1..]].concat()
        }
        _ => token.to_owned(),
    }
}

fn resolve_connection(entry: &str, ids: &[u32], molecule: &Molecule) -> Result<Bond> {
    let (left, right) = final_parser(connection)(entry)?;

    // NOTE: If a polymer id is repeated, connections always refer to the first polymer with that id
    let resolve = |terminus: Terminus| {
        let chain = ids.iter().position(|&id| id == terminus.polymer)?;
        let residue = usize::try_from(terminus.residue).ok()?.checked_sub(1)?;
        let endpoint = Endpoint::new(chain, residue, terminus.rgroup);
        molecule.contains(&endpoint).then_some(endpoint)
    };
    let (Some(left), Some(right)) = (resolve(left), resolve(right)) else {
        return Err(NotationError::dangling_bond(entry));
    };

    debug!(%left, %right, "resolved HELM connection");
    Ok(Bond::new(left, right))
}

/// Connection = Polymer Id , Comma , Polymer Id , Comma , Attachment , "-" , Attachment ;
fn connection(i: &str) -> ParseResult<(Terminus, Terminus)> {
    let polymers = separated_pair(polymer_id, comma, polymer_id);
    let hyphen = expect(char('-'), NotationErrorKind::ExpectedHyphen);
    let attachments = separated_pair(attachment, hyphen, attachment);
    let parser = map(
        separated_pair(polymers, comma, attachments),
        |((left, right), ((r1, g1), (r2, g2)))| {
            (
                Terminus {
                    polymer: left,
                    residue: r1,
                    rgroup: g1,
                },
                Terminus {
                    polymer: right,
                    residue: r2,
                    rgroup: g2,
                },
            )
        },
    );
    wrap_err(parser, NotationErrorKind::ExpectedConnection)(i)
}

/// Polymer Id = "PEPTIDE" , Number ;
fn polymer_id(i: &str) -> ParseResult<u32> {
    let peptide = expect(tag("PEPTIDE"), NotationErrorKind::ExpectedPeptide);
    let number = expect(number, NotationErrorKind::ExpectedPolymerNumber);
    wrap_err(
        preceded(peptide, number),
        NotationErrorKind::ExpectedPeptideId,
    )(i)
}

/// Attachment = Number , ":" , "R" , Number ;
fn attachment(i: &str) -> ParseResult<(u32, RGroup)> {
    let residue = expect(number, NotationErrorKind::ExpectedResidueNumber);
    let colon = expect(char(':'), NotationErrorKind::ExpectedColon);
    let r = expect(char('R'), NotationErrorKind::ExpectedRGroupTag);
    let rgroup = expect(number, NotationErrorKind::ExpectedRGroup);
    wrap_err(
        separated_pair(residue, colon, preceded(r, rgroup)),
        NotationErrorKind::ExpectedAttachment,
    )(i)
}
