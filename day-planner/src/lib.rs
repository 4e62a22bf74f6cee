//! day-planner: an LLM-backed personal productivity assistant.
//!
//! The library does three things through a caller-supplied LLM collaborator:
//! tags a user's daily scenes with time/location/context metadata, generates
//! a hierarchical task/subtask breakdown for a stated goal, and generates
//! free-text advice comments for a task.
//!
//! The core is the task/subtask tree in [`tasks`]: a recursive hierarchy
//! with weak parent back-references, 1-based sibling indices, and bottom-up
//! duration roll-up, reconstructed defensively from semi-structured LLM
//! output. The LLM itself sits behind the [`llm::LlmClient`] trait; this
//! crate never owns transport, API keys, or persistence.

pub mod error;
pub mod llm;
pub mod tasks;
pub mod userdata;
pub mod utils;

pub use error::PlannerError;
