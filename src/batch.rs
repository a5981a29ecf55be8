use std::{
    fmt::{self, Display, Formatter},
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use peptide_notation::Notation;
use tracing::{info, warn};

use crate::{convert, target};

/// How many lines of a table were converted, and how many couldn't be
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Converts every line of the `table` file from the `from` notation, writing the results to `report`
pub fn convert_table(from: Notation, table: &Path, report: &Path) -> Result<BatchSummary> {
    let input = File::open(table)
        .with_context(|| format!("failed to open the table {}", table.display()))?;
    let output = File::create(report)
        .with_context(|| format!("failed to create the report {}", report.display()))?;

    let mut output = BufWriter::new(output);
    let summary = convert_lines(from, BufReader::new(input), &mut output)?;
    output.flush()?;

    Ok(summary)
}

/// Converts every non-blank line of `input` on its own, so one bad line never stops the rest from being converted
pub fn convert_lines(
    from: Notation,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match convert(from, line) {
            Ok(Some(converted)) => {
                info!("Reading {from} molecule: {line}");
                writeln!(output, "{converted}")?;
                summary.converted += 1;
            }
            Ok(None) => {
                warn!("Failed to process {line}: no {} molecule was produced", target(from));
                summary.failed += 1;
            }
            Err(error) => {
                warn!("Failed to process {line}: {error}");
                summary.failed += 1;
            }
        }
    }

    info!(
        converted = summary.converted,
        failed = summary.failed,
        "finished converting {from} table"
    );
    Ok(summary)
}

impl Display for BatchSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self { converted, failed } = self;
        write!(f, "{converted} converted, {failed} failed")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use indoc::indoc;
    use insta::assert_snapshot;

    use super::*;

    const BILN_TABLE: &str = indoc! {"
        A-C(1,1)-G.T-C(1,2)-K

          C(1,3)-A-A-C(1,3)
        C(1,3)-C(1,3)-C(1,3)
        A--G
        Ac-C(1,3)-Nle-D-C(1,3)-am
    "};

    #[test]
    fn failures_dont_stop_the_batch() {
        let mut output = Vec::new();
        let summary = convert_lines(Notation::Biln, BILN_TABLE.as_bytes(), &mut output).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                converted: 3,
                failed: 2
            }
        );
        assert_snapshot!(String::from_utf8(output).unwrap().trim_end(), @r"
        PEPTIDE1{A.C.G}|PEPTIDE2{T.C.K}$PEPTIDE1,PEPTIDE2,2:R1-2:R2$$$V2.0
        PEPTIDE1{C.A.A.C}$PEPTIDE1,PEPTIDE1,1:R3-4:R3$$$V2.0
        PEPTIDE1{[Ac].C.[Nle].D.C.[am]}$PEPTIDE1,PEPTIDE1,2:R3-5:R3$$$V2.0
        ");
    }

    #[test]
    fn helm_table() {
        let table = "PEPTIDE5{A.[Cys].G}$$$$V2.0\nCHEM1{[*]C}$$$$V2.0\nPEPTIDE1{C.A}|PEPTIDE2{C}$PEPTIDE1,PEPTIDE2,1:R3-1:R3$$$V2.0\n";
        let mut output = Vec::new();
        let summary = convert_lines(Notation::Helm, table.as_bytes(), &mut output).unwrap();
        assert_eq!(summary.to_string(), "2 converted, 1 failed");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "A-Cys-G\nC(1,3)-A.C(1,3)\n"
        );
    }

    #[test]
    fn table_files() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("table.txt");
        let report = dir.path().join("report_biln.txt");
        fs::write(&table, BILN_TABLE).unwrap();

        let summary = convert_table(Notation::Biln, &table, &report).unwrap();
        assert_eq!(summary.converted, 3);
        assert_eq!(fs::read_to_string(&report).unwrap().lines().count(), 3);

        let missing = dir.path().join("missing.txt");
        let error = convert_table(Notation::Biln, &missing, &report).unwrap_err();
        assert!(error.to_string().starts_with("failed to open the table"));
    }
}
