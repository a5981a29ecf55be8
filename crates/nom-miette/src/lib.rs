//! Glue between `nom` parsers and `miette` diagnostics
//!
//! Parsers return a [`LabeledParseError`], which borrows the input it failed on. Once parsing has finished,
//! [`final_parser`] converts that into an owned [`LabeledError`] whose labels point back into the full input.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, SourceSpan};
use nom::{
    Err, Finish, IResult, Parser,
    combinator::{all_consuming, complete},
    error::{ErrorKind, ParseError},
};
use thiserror::Error;

pub type ParseResult<'a, O, E> = IResult<&'a str, O, LabeledParseError<'a, E>>;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("{error}")]
pub struct LabeledError<E: LabeledErrorKind> {
    full_input: String,
    labels: Vec<LabeledSpan>,
    error: ErrorTree<E>,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ErrorTree<E: LabeledErrorKind> {
    #[error("{kind}")]
    Node {
        kind: E,
        #[source]
        source: Option<Box<LabeledError<E>>>,
    },
    #[error("attempted {} parse branches unsuccessfully", .0.len())]
    Branch(Vec<LabeledError<E>>),
}

pub trait LabeledErrorKind: Diagnostic + Clone + Eq + From<ErrorKind> {
    fn label(&self) -> Option<&'static str> {
        None
    }
}

impl<E: LabeledErrorKind> LabeledError<E> {
    /// The input that failed to parse
    #[must_use]
    pub fn input(&self) -> &str {
        // NOTE: A trailing space is appended so that labels can point past the end of the input
        self.full_input
            .strip_suffix(' ')
            .unwrap_or(self.full_input.as_str())
    }

    /// The outermost error kind, or `None` if every branch of an `alt` failed
    #[must_use]
    pub const fn kind(&self) -> Option<&E> {
        match &self.error {
            ErrorTree::Node { kind, .. } => Some(kind),
            ErrorTree::Branch(_) => None,
        }
    }

    /// The innermost error kind, following the chain of `source` errors
    #[must_use]
    pub fn root_kind(&self) -> Option<&E> {
        match &self.error {
            ErrorTree::Node {
                source: Some(child),
                ..
            } => child.root_kind(),
            ErrorTree::Node { kind, .. } => Some(kind),
            ErrorTree::Branch(_) => None,
        }
    }

    fn bubble_labels(&mut self) {
        if !self.labels.is_empty() {
            return;
        }
        match &mut self.error {
            ErrorTree::Node {
                source: Some(child),
                ..
            } => {
                child.bubble_labels();
                self.labels = std::mem::take(&mut child.labels);
            }
            ErrorTree::Branch(alternatives) => {
                let labels = alternatives.iter_mut().flat_map(|child| {
                    child.bubble_labels();
                    std::mem::take(&mut child.labels)
                });
                self.labels = merge_labels(labels);
            }
            ErrorTree::Node { .. } => (),
        }
    }
}

// Labels sharing a span are joined with "or", keeping the order in which spans were first seen
fn merge_labels(labels: impl IntoIterator<Item = LabeledSpan>) -> Vec<LabeledSpan> {
    let mut merged: Vec<(SourceSpan, Vec<String>)> = Vec::new();
    for labeled_span in labels {
        let span = *labeled_span.inner();
        let Some(label) = labeled_span.label() else {
            continue;
        };
        match merged.iter_mut().find(|(s, _)| *s == span) {
            Some((_, texts)) => texts.push(label.to_owned()),
            None => merged.push((span, vec![label.to_owned()])),
        }
    }
    merged
        .into_iter()
        .map(|(span, texts)| LabeledSpan::new_with_span(Some(texts.join(" or ")), span))
        .collect()
}

impl<E: LabeledErrorKind> Diagnostic for LabeledError<E> {
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.full_input)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.error {
            ErrorTree::Node { kind, .. } => kind.help(),
            ErrorTree::Branch(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(self.labels.iter().cloned()))
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        match &self.error {
            ErrorTree::Branch(related) => Some(Box::new(related.iter().map(|e| e as &dyn Diagnostic))),
            ErrorTree::Node { .. } => None,
        }
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        match &self.error {
            ErrorTree::Node {
                source: Some(source),
                ..
            } => Some(&**source as &dyn Diagnostic),
            ErrorTree::Node { .. } | ErrorTree::Branch(_) => None,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LabeledParseError<'a, E> {
    input: &'a str,
    kind: E,
    alternatives: Vec<LabeledParseError<'a, E>>,
    source: Option<Box<LabeledParseError<'a, E>>>,
}

impl<'a, E: LabeledErrorKind> LabeledParseError<'a, E> {
    pub fn new(input: &'a str, kind: E) -> Self {
        Self::new_with_source(input, kind, None)
    }

    pub fn new_with_source(input: &'a str, kind: E, source: Option<Self>) -> Self {
        Self {
            input,
            kind,
            alternatives: Vec::new(),
            source: source.map(Box::new),
        }
    }

    fn into_final_error(self, full_input: &str) -> LabeledError<E> {
        let padded_input = format!("{full_input} ");
        if self.alternatives.is_empty() {
            let span = span_within(full_input, self.input);
            let labels = self
                .kind
                .label()
                .map(|label| LabeledSpan::new_with_span(Some(label.to_owned()), span))
                .into_iter()
                .collect();
            let source = self
                .source
                .map(|source| Box::new(source.into_final_error(full_input)));
            LabeledError {
                full_input: padded_input,
                labels,
                error: ErrorTree::Node {
                    kind: self.kind,
                    source,
                },
            }
        } else {
            let Self {
                input,
                kind,
                alternatives,
                source,
            } = self;
            let first = Self {
                input,
                kind,
                alternatives: Vec::new(),
                source,
            };
            let branches = std::iter::once(first)
                .chain(alternatives)
                .map(|e| e.into_final_error(full_input))
                .collect();
            LabeledError {
                full_input: padded_input,
                labels: Vec::new(),
                error: ErrorTree::Branch(branches),
            }
        }
    }
}

// Parsers only ever hand back suffixes of the input they were given, so the offset of the remaining input is
// recovered from the difference in lengths
fn span_within(full_input: &str, rest: &str) -> SourceSpan {
    let start = full_input.len().saturating_sub(rest.len());
    SourceSpan::from(start..start)
}

impl<'a, E: LabeledErrorKind> ParseError<&'a str> for LabeledParseError<'a, E> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self::new(input, kind.into())
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(mut self, other: Self) -> Self {
        self.alternatives.push(other);
        self
    }
}

/// Runs `parser` to completion, converting any failure into an owned [`LabeledError`]
pub fn final_parser<'a, O, P, E>(parser: P) -> impl FnMut(&'a str) -> Result<O, LabeledError<E>>
where
    E: LabeledErrorKind,
    P: Parser<&'a str, O, LabeledParseError<'a, E>>,
{
    let mut parser = all_consuming(complete(parser));
    move |input| {
        parser.parse(input).finish().map(|(_, o)| o).map_err(|e| {
            let mut error = e.into_final_error(input);
            error.bubble_labels();
            error
        })
    }
}

/// Wraps any error from `parser` in a new error of `kind`, keeping the original as its source
pub fn wrap_err<'a, O, P, E>(
    mut parser: P,
    kind: E,
) -> impl FnMut(&'a str) -> ParseResult<'a, O, E>
where
    E: LabeledErrorKind,
    P: Parser<&'a str, O, LabeledParseError<'a, E>>,
{
    move |i| {
        parser
            .parse(i)
            .map_err(|e| e.map(|e| LabeledParseError::new_with_source(i, kind.clone(), Some(e))))
    }
}

/// Replaces any error from `parser` with a fresh error of `kind`, discarding the original
pub fn expect<'a, O, P, E>(mut parser: P, kind: E) -> impl FnMut(&'a str) -> ParseResult<'a, O, E>
where
    E: LabeledErrorKind,
    P: Parser<&'a str, O, LabeledParseError<'a, E>>,
{
    move |i| {
        parser
            .parse(i)
            .map_err(|e| e.map(|_| LabeledParseError::new(i, kind.clone())))
    }
}

/// Turns a recoverable error into a failure, so that `alt` and `many0` stop backtracking
pub fn fatal<'a, O, P, E>(mut parser: P) -> impl FnMut(&'a str) -> ParseResult<'a, O, E>
where
    E: LabeledErrorKind,
    P: Parser<&'a str, O, LabeledParseError<'a, E>>,
{
    move |i| match parser.parse(i) {
        Err(Err::Error(e)) => Err(Err::Failure(e)),
        result => result,
    }
}
