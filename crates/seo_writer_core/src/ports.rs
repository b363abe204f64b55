//! crates/seo_writer_core/src/ports.rs
//!
//! Service contracts for the collaborators the core relies on but does not
//! implement. Adapters in the service crate provide the concrete versions.

use async_trait::async_trait;

use crate::domain::{GenerationRequest, SynthesizedDocument};
use crate::export::{ExportPayload, ExportReceipt};
use crate::settings::Settings;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (filesystem, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Produces the article body for a request. This is the slow step of a
/// generation attempt.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<SynthesizedDocument>;
}

#[async_trait]
pub trait DocumentExporter: Send + Sync {
    async fn export(&self, payload: &ExportPayload) -> PortResult<ExportReceipt>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> PortResult<Option<Settings>>;
    async fn save(&self, settings: &Settings) -> PortResult<()>;
}
