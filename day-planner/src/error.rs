//! Error types shared across the planner.

use std::time::Duration;

use thiserror::Error;

use crate::llm::LlmError;

/// Failures surfaced by tree operations, generators, and the bounded-time
/// execution wrapper.
///
/// Structural errors (`EmptyName`, `IndexOutOfBounds`, `BrokenChain`) indicate
/// caller bugs and fail fast. External errors (`Timeout`, `Llm`) describe a
/// misbehaving collaborator and leave the tree untouched.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// A required name was empty or all-whitespace.
    #[error("name must not be empty or blank")]
    EmptyName,

    /// An indexed accessor or mutator was called with an index outside
    /// `[0, len)`.
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Ascending parent references never reached a task root. The tree was
    /// not wired with `propagate_supertasks` (or a parent was dropped).
    #[error("broken parent chain: no task root reachable from this subtask")]
    BrokenChain,

    /// The bounded-execution deadline elapsed before the work finished. The
    /// underlying work is not cancelled and may still complete on its own.
    #[error("deadline of {0:?} elapsed before the work completed")]
    Timeout(Duration),

    /// The background worker panicked or was lost before producing a result.
    #[error("background worker failed: {0}")]
    Worker(String),

    /// The LLM collaborator reported a failure.
    #[error(transparent)]
    Llm(#[from] LlmError),
}
