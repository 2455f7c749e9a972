//! Export pipeline errors.

use thiserror::Error;

use motif_ast::ParseError;

/// A hard failure of one export run.
///
/// The export entry point is the one place where "not found" is fatal: an
/// export with no target macro cannot proceed, so the resolution misses that
/// the rest of the core treats as data surface here as descriptive errors.
/// Pipeline-stage failures identify the stage and the query that caused
/// them; the exporter never retries and never catches these.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no macro `{name}` found for site query `{site}`")]
    MacroNotFound { site: String, name: String },

    #[error("no entity provides macro `{name}` for site query `{site}`")]
    EntityNotFound { site: String, name: String },

    #[error("could not assemble an export configuration for macro `{name}`")]
    Configuration { name: String },

    #[error("parsing macro `{name}` failed: {source}")]
    Parse {
        name: String,
        #[source]
        source: ParseError,
    },
}
