//! LLM collaborator boundary.
//!
//! The planner never talks to a model provider directly. Everything goes
//! through the [`LlmClient`] trait: a rendered prompt goes in, raw text comes
//! back, and any transport or provider problem is reported as an [`LlmError`].
//! Callers supply the implementation; this crate only ships test doubles.

pub mod prompt;
pub mod timeout;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::PlannerError;

pub use prompt::PromptTemplate;
pub use timeout::run_with_timeout;

/// An error reported by an LLM collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    /// The request never produced a usable response (network failure,
    /// invalid request, provider outage).
    #[error("request error: {0}")]
    Request(String),

    /// The provider answered, but the answer itself was an error.
    #[error("response error: {0}")]
    Response(String),

    /// The response arrived but did not match the requested output shape.
    #[error("schema error: {0}")]
    Schema(String),

    /// The provider refused the request due to rate limiting or quota.
    #[error("rate limited{}", message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
    RateLimited {
        /// Optional detail from the provider.
        message: Option<String>,
    },
}

/// A hosted LLM backend, reduced to a prompt-in/text-out function.
///
/// Implementations must be `Send + Sync`; the bounded-time wrapper may run
/// the call on a background worker.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a rendered prompt and return the raw response text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Run a completion, optionally bounded by a deadline.
///
/// With no deadline the call runs inline on the caller's task. With a
/// deadline it is handed to [`run_with_timeout`], so a slow provider
/// unblocks the caller with [`PlannerError::Timeout`] instead of hanging an
/// interactive session.
pub async fn complete_with_deadline(
    client: &Arc<dyn LlmClient>,
    deadline: Option<Duration>,
    prompt: String,
) -> Result<String, PlannerError> {
    match deadline {
        None => Ok(client.complete(&prompt).await?),
        Some(limit) => {
            let client = Arc::clone(client);
            run_with_timeout(limit, async move { client.complete(&prompt).await }).await
        }
    }
}
