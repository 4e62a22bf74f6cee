//! Bounded-time execution for LLM calls.

use std::future::Future;
use std::time::Duration;

use crate::error::PlannerError;
use crate::llm::LlmError;

/// Run `work` on a background task, waiting at most `limit`.
///
/// If the deadline elapses first the caller is unblocked with
/// [`PlannerError::Timeout`]. The spawned task is not cancelled; it keeps
/// running detached and its eventual result is discarded. Cooperative
/// cancellation is deliberately not implemented.
pub async fn run_with_timeout<T, F>(limit: Duration, work: F) -> Result<T, PlannerError>
where
    F: Future<Output = Result<T, LlmError>> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(work);
    match tokio::time::timeout(limit, handle).await {
        // Dropping the JoinHandle detaches the worker rather than aborting it.
        Err(_elapsed) => Err(PlannerError::Timeout(limit)),
        Ok(Err(join_err)) => Err(PlannerError::Worker(join_err.to_string())),
        Ok(Ok(result)) => result.map_err(PlannerError::from),
    }
}
