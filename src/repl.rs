use anyhow::Result;
use peptide_notation::Notation;
use rustyline::DefaultEditor;

use crate::{convert, describe, render_error, target};

/// Converts lines read from the terminal until the user quits (with Ctrl-C or Ctrl-D)
pub fn run(from: Notation) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let prompt = format!("{from}: ");
    while let Ok(line) = rl.readline(&prompt) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        rl.add_history_entry(line)?;
        println!("{}", respond(from, line));
    }
    Ok(())
}

fn respond(from: Notation, line: &str) -> String {
    match convert(from, line) {
        Ok(output) => describe(target(from), output.as_deref()),
        Err(error) => render_error(&error),
    }
}
