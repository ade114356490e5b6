pub mod equation;

pub use equation::{
    builder::SystemBuilder,
    error::{Error, Position, Result},
    parser::{parse, parse_molecule, parse_with_options, MergePolicy, ParseOptions, Parsed},
    Element, Molecule, Reaction, Side, System,
};

/// Parses `source` and renders it back in canonical form.
pub fn canonicalize(source: &str, options: ParseOptions) -> Parsed<String> {
    let parsed = parse_with_options(source, options);
    Parsed {
        value: parsed.value.to_string(),
        diagnostics: parsed.diagnostics,
    }
}
