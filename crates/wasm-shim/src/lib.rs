use peptide_notation::{Notation, Peptide};
use wasm_bindgen::prelude::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[wasm_bindgen]
#[must_use]
pub fn version() -> String {
    VERSION.to_owned()
}

/// # Errors
///
/// Returns the error message if `biln` isn't valid BILN.
#[wasm_bindgen]
pub fn biln_to_helm(biln: &str) -> Result<String, String> {
    convert(Notation::Biln, biln, Notation::Helm)
}

/// # Errors
///
/// Returns the error message if `helm` isn't valid HELM.
#[wasm_bindgen]
pub fn helm_to_biln(helm: &str) -> Result<String, String> {
    convert(Notation::Helm, helm, Notation::Biln)
}

fn convert(from: Notation, input: &str, to: Notation) -> Result<String, String> {
    // NOTE: This ensures the panic hook is set before any other shim code can be run!
    console_error_panic_hook::set_once();
    let peptide = Peptide::parse(from, input).map_err(|e| e.to_string())?;
    peptide
        .render(to)
        .ok_or_else(|| format!("the {from} input {input:?} doesn't contain a molecule"))
}
