//! services/api/src/web/generation_task.rs
//!
//! The asynchronous "worker" that runs one generation attempt.

use crate::web::state::AppState;
use seo_writer_core::{
    domain::{AttemptId, GenerationRequest},
    session::Transition,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub const CANCELLED_REASON: &str = "generation cancelled";

/// Awaits the generation provider for `attempt` and reports the outcome to
/// the session machine. Cancelling `cancellation_token` fails the attempt.
///
/// The outcome is applied only if `attempt` is still the one in flight.
pub async fn generation_process(
    app_state: Arc<AppState>,
    attempt: AttemptId,
    request: GenerationRequest,
    cancellation_token: CancellationToken,
) {
    info!(%attempt, topic = %request.topic, "Generation started.");

    let outcome = tokio::select! {
        _ = cancellation_token.cancelled() => Err(CANCELLED_REASON.to_string()),
        result = app_state.generator.generate(&request) => result.map_err(|e| e.to_string()),
    };

    let mut control = app_state.generation.lock().await;
    let transition = match outcome {
        Ok(document) => control.machine.complete(attempt, document),
        Err(reason) => {
            if reason != CANCELLED_REASON {
                error!(%attempt, "Generation failed: {}", reason);
            }
            control.machine.fail(attempt, reason)
        }
    };

    match transition {
        Transition::Applied => {
            control.in_flight = None;
            app_state.publish(control.machine.session());
            info!(%attempt, phase = ?control.machine.phase(), "Generation finished.");
        }
        Transition::Discarded => {
            warn!(%attempt, "Generation result discarded; attempt is no longer current.");
        }
    }
}
