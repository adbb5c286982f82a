//! Error taxonomy for the editing core.
//!
//! The core deliberately has no fatal failure modes: no-op commands and
//! unresolvable references degrade to "document unchanged". The only
//! fallible surface is parsing externally supplied schema fragments.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// Externally supplied fragment could not be understood (missing the
    /// required `tables` list, unparseable JSON, wrong shapes). Rejected
    /// before any mutation reaches the document.
    #[error("malformed schema fragment: {reason}")]
    MalformedFragment { reason: String },

    /// Serialization failure when producing the persistence payload.
    #[error("schema serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
