// Typed data model for the streaming pipeline. External JSON documents are
// converted into these structures at the boundary; everything downstream
// works with validated, strongly-typed data.

pub mod player;
pub mod roster;
pub mod schedule;

use thiserror::Error;

/// Errors for structurally invalid external data. Missing or incomplete data
/// (unknown team, no games) is NOT an error — those cases fail soft with
/// empty results; these errors are reserved for malformed input shapes.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {what}: {message}")]
    Invalid { what: &'static str, message: String },
}
