mod batch;
mod cli;
mod logging;
mod repl;

use anyhow::{Result, bail};
use clap::Parser;
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use peptide_notation::{Notation, NotationError, Peptide};
use tracing::{debug, info};

use cli::{Args, Mode};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(args.verbose, args.logfile.as_deref())?;
    debug!(?args, "invocation arguments");

    let Some(mode) = args.mode() else {
        bail!("one of --biln, --helm, --table-biln, --table-helm, or --interactive is required");
    };
    match mode {
        Mode::Convert { from, input } => {
            info!("Reading {from} molecule: {input}");
            match convert(from, &input) {
                Ok(output) => {
                    println!("{}", describe(target(from), output.as_deref()));
                    info!(
                        "The {} molecule is: {}",
                        target(from),
                        output.as_deref().unwrap_or(NONE)
                    );
                }
                Err(error) => {
                    eprintln!("{}", render_error(&error));
                    bail!("failed to convert the {from} molecule {input:?}");
                }
            }
        }
        Mode::Table {
            from,
            table,
            report,
        } => {
            let summary = batch::convert_table(from, &table, &report)?;
            println!(
                "The {} formats were generated and saved in {} ({summary})",
                target(from),
                report.display()
            );
        }
        Mode::Interactive(from) => repl::run(from)?,
    }

    info!("Successful completion");
    Ok(())
}

const NONE: &str = "<none>";

/// The notation that `from` is converted into
const fn target(from: Notation) -> Notation {
    match from {
        Notation::Biln => Notation::Helm,
        Notation::Helm => Notation::Biln,
    }
}

/// Parses `input` as `from` and renders it as the other notation
fn convert(from: Notation, input: &str) -> Result<Option<String>, NotationError> {
    Peptide::parse(from, input).map(|peptide| peptide.render(target(from)))
}

fn describe(to: Notation, output: Option<&str>) -> String {
    format!("The {to} format is: {}", output.unwrap_or(NONE))
}

fn render_error(diagnostic: &dyn Diagnostic) -> String {
    let mut buf = String::new();
    match GraphicalReportHandler::new_themed(GraphicalTheme::unicode())
        .render_report(&mut buf, diagnostic)
    {
        Ok(()) => buf,
        Err(_) => diagnostic.to_string(),
    }
}
