//! Reconstruction of subtask trees from raw LLM output.
//!
//! Generative text is untrusted: the expected JSON may be wrapped in markdown
//! fences, fields may be missing, and the whole thing may be garbage. This
//! module degrades instead of failing: a malformed response yields an empty
//! subtask list and a stderr note, never an error to the caller.
//!
//! The reconstructor only builds nodes and their owning child edges (via
//! [`add_child`]). Wiring the result into a tree (attach, propagate,
//! reindex, roll up) is the caller's job.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::Value;

use crate::tasks::tree::{add_child, NodeHandle};
use crate::tasks::types::{NodeId, Subtask, SubtaskHandle};

/// Name given to a reconstructed node whose mapping carried no usable name.
pub const PLACEHOLDER_NAME: &str = "(unnamed subtask)";

/// Extract the JSON candidate from raw response text.
///
/// Prefers a ```json fenced block, then a generic ``` block, otherwise the
/// whole text. Only the block interior is returned, trimmed.
pub fn extract_json(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let body = &text[start + 7..];
        let end = body.rfind("```").unwrap_or(body.len());
        return body[..end].trim();
    }
    if let Some(start) = text.find("```") {
        let body = &text[start + 3..];
        let end = body.rfind("```").unwrap_or(body.len());
        return body[..end].trim();
    }
    text.trim()
}

/// Permissive mirror of [`Subtask`] for deserializing LLM output.
///
/// Every field defaults, so absent keys degrade to placeholders instead of
/// failing the batch.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct SubtaskDraft {
    name: String,
    id: NodeId,
    context: String,
    location_tags: Vec<String>,
    time_tags: Vec<String>,
    other_tags: Vec<String>,
    estimated_minutes: u32,
    comments: Vec<String>,
    // Option so an explicit `null` (which `default` alone does not cover)
    // reads as no children instead of failing the entry.
    subtasks: Option<Vec<SubtaskDraft>>,
}

impl Default for SubtaskDraft {
    fn default() -> Self {
        SubtaskDraft {
            name: PLACEHOLDER_NAME.to_string(),
            id: NodeId::default(),
            context: String::new(),
            location_tags: Vec::new(),
            time_tags: Vec::new(),
            other_tags: Vec::new(),
            estimated_minutes: 0,
            comments: Vec::new(),
            subtasks: None,
        }
    }
}

/// Reconstruct subtask nodes from raw LLM response text.
///
/// Shape dispatch on the parsed value:
/// - a mapping with a `subtasks` array → one node per entry;
/// - a bare array → one node per entry;
/// - any other mapping → exactly one node.
///
/// Unparsable text yields an empty list; an individual entry that cannot be
/// interpreted is skipped. Neither case is an error.
pub fn parse_subtasks(text: &str) -> Vec<SubtaskHandle> {
    let candidate = extract_json(text);
    let value: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("subtask reconstruction failed ({err}); continuing with no subtasks");
            return Vec::new();
        }
    };

    let entries: Vec<Value> = match value {
        Value::Object(map) => match map.get("subtasks") {
            Some(Value::Array(items)) => items.clone(),
            _ => vec![Value::Object(map)],
        },
        Value::Array(items) => items,
        other => vec![other],
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<SubtaskDraft>(entry) {
            Ok(draft) => Some(build_subtask(draft)),
            Err(err) => {
                eprintln!("skipping malformed subtask entry ({err})");
                None
            }
        })
        .collect()
}

/// Turn a draft into a real node, attaching nested children via [`add_child`]
/// so `has_subtasks` and the immediate parent links come out right.
fn build_subtask(draft: SubtaskDraft) -> SubtaskHandle {
    let SubtaskDraft {
        name,
        id,
        context,
        location_tags,
        time_tags,
        other_tags,
        estimated_minutes,
        comments,
        subtasks,
    } = draft;

    let name = if name.trim().is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        name
    };

    let node = Rc::new(RefCell::new(Subtask {
        name,
        id,
        context,
        location_tags,
        time_tags,
        other_tags,
        estimated_minutes,
        comments,
        ..Subtask::default()
    }));

    let handle = NodeHandle::subtask(&node);
    for child in subtasks.unwrap_or_default() {
        add_child(&handle, build_subtask(child));
    }
    node
}
