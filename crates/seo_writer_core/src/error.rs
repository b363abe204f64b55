//! crates/seo_writer_core/src/error.rs
//!
//! The error taxonomy surfaced by the core to its callers. Every variant is
//! recoverable; none of them leaves core state half-updated.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// An empty or invalid request field. Nothing changed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A submit arrived while another generation is still in flight.
    #[error("A generation is already in progress")]
    SessionBusy,

    /// The generation provider failed; no partial article exists.
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A settings payload that does not match the settings record.
    #[error("Import format error: {0}")]
    ImportFormat(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
