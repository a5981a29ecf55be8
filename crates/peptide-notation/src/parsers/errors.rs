use miette::Diagnostic;
use nom::error::ErrorKind;
use nom_miette::LabeledErrorKind;
use thiserror::Error;

pub type ParseResult<'a, O> = nom_miette::ParseResult<'a, O, NotationErrorKind>;

#[derive(Clone, Eq, PartialEq, Debug, Diagnostic, Error)]
pub enum NotationErrorKind {
    #[error("expected a monomer name")]
    ExpectedMonomer,

    #[diagnostic(help("bond markers look like (1,3): a bond label, a comma, and an R-group number"))]
    #[error("expected a bond marker")]
    ExpectedBondMarker,

    #[error("expected a numeric bond label")]
    ExpectedBondLabel,

    #[error("expected an R-group number")]
    ExpectedRGroup,

    #[error("expected ','")]
    ExpectedComma,

    #[diagnostic(help("you've probably forgotten to close an earlier '(' bracket"))]
    #[error("expected ')' to close the bond marker")]
    ExpectedMarkerEnd,

    #[error("expected a peptide identifier like PEPTIDE1")]
    ExpectedPeptideId,

    #[error("expected 'PEPTIDE'")]
    ExpectedPeptide,

    #[error("expected a polymer number")]
    ExpectedPolymerNumber,

    #[diagnostic(help("HELM connections look like PEPTIDE1,PEPTIDE2,1:R3-4:R3"))]
    #[error("expected a HELM connection")]
    ExpectedConnection,

    #[error("expected an attachment point like 4:R3")]
    ExpectedAttachment,

    #[error("expected a residue number")]
    ExpectedResidueNumber,

    #[error("expected ':'")]
    ExpectedColon,

    #[error("expected 'R' followed by an R-group number")]
    ExpectedRGroupTag,

    #[error("expected '-'")]
    ExpectedHyphen,

    #[diagnostic(help(
        "this is an internal error that you shouldn't ever see! If you have gotten this error, \
        then please report it as a bug!"
    ))]
    #[error("internal `nom` error: {0:?}")]
    NomError(ErrorKind),

    #[diagnostic(help("check the unparsed region for errors, or remove it from the rest of the input"))]
    #[error("could not interpret the full input")]
    Incomplete,
}

impl LabeledErrorKind for NotationErrorKind {
    fn label(&self) -> Option<&'static str> {
        Some(match self {
            Self::ExpectedMonomer => "expected monomer",
            Self::ExpectedBondLabel => "expected bond label",
            Self::ExpectedRGroup => "expected R-group",
            Self::ExpectedComma => "expected ','",
            Self::ExpectedMarkerEnd => "expected ')'",
            Self::ExpectedPeptide => "expected 'PEPTIDE'",
            Self::ExpectedPolymerNumber => "expected polymer number",
            Self::ExpectedResidueNumber => "expected residue number",
            Self::ExpectedColon => "expected ':'",
            Self::ExpectedRGroupTag => "expected 'R'",
            Self::ExpectedHyphen => "expected '-'",
            Self::Incomplete => "input was valid up until this point",
            Self::NomError(_) => "the region that triggered this bug!",
            Self::ExpectedBondMarker
            | Self::ExpectedPeptideId
            | Self::ExpectedConnection
            | Self::ExpectedAttachment => return None,
        })
    }
}

impl From<ErrorKind> for NotationErrorKind {
    fn from(value: ErrorKind) -> Self {
        match value {
            ErrorKind::Eof => Self::Incomplete,
            kind => Self::NomError(kind),
        }
    }
}
