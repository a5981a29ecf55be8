use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};
use peptide_notation::Notation;

/// Convert peptides between BILN and HELM (v2.0)
#[derive(Parser, Debug)]
#[command(version, about)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["biln", "helm", "table_biln", "table_helm", "interactive"])
))]
pub struct Args {
    /// A BILN string to convert into HELM
    #[arg(long, value_name = "TEXT")]
    pub biln: Option<String>,
    /// A HELM string to convert into BILN
    #[arg(long, value_name = "TEXT")]
    pub helm: Option<String>,
    /// A file of newline-separated BILN strings to convert into HELM
    #[arg(long, value_name = "FILE")]
    pub table_biln: Option<PathBuf>,
    /// A file of newline-separated HELM strings to convert into BILN
    #[arg(long, value_name = "FILE")]
    pub table_helm: Option<PathBuf>,
    /// Read and convert strings of the given notation interactively
    #[arg(long, value_enum, value_name = "NOTATION")]
    pub interactive: Option<InputNotation>,
    /// Where table conversions are written (defaults to `report_biln.txt` or `report_helm.txt`)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Also write log messages to this file
    #[arg(long, value_name = "FILE")]
    pub logfile: Option<PathBuf>,
    /// Log debugging information
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum InputNotation {
    Biln,
    Helm,
}

/// What the command-line arguments are asking for
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    Convert {
        from: Notation,
        input: String,
    },
    Table {
        from: Notation,
        table: PathBuf,
        report: PathBuf,
    },
    Interactive(Notation),
}

impl Args {
    /// Returns `None` only if none of the (required) input arguments were given
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        let report = |default: &str| self.output.clone().unwrap_or_else(|| default.into());

        let mode = if let Some(input) = &self.biln {
            Mode::Convert {
                from: Notation::Biln,
                input: input.clone(),
            }
        } else if let Some(input) = &self.helm {
            Mode::Convert {
                from: Notation::Helm,
                input: input.clone(),
            }
        } else if let Some(table) = &self.table_biln {
            Mode::Table {
                from: Notation::Biln,
                table: table.clone(),
                report: report("report_biln.txt"),
            }
        } else if let Some(table) = &self.table_helm {
            Mode::Table {
                from: Notation::Helm,
                table: table.clone(),
                report: report("report_helm.txt"),
            }
        } else {
            Mode::Interactive(self.interactive?.into())
        };
        Some(mode)
    }
}

impl From<InputNotation> for Notation {
    fn from(value: InputNotation) -> Self {
        match value {
            InputNotation::Biln => Self::Biln,
            InputNotation::Helm => Self::Helm,
        }
    }
}
