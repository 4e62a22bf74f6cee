//! Task breakdown trees and the LLM workflows that build them.
//!
//! ## Module structure
//!
//! - `types` - node types (`Task`, `Subtask`) and the shared attribute trait
//! - `tree` - maintenance algorithms (parent links, indices, roll-up)
//! - `parse` - defensive reconstruction of subtask trees from LLM output
//! - `render` - human-readable tree snapshots
//! - `generator` - breakdown generation through an LLM collaborator
//! - `commenter` - free-text advice comments

pub mod commenter;
pub mod generator;
pub mod parse;
pub mod render;
pub mod tree;
pub mod types;

pub use commenter::TaskCommenter;
pub use generator::TaskGenerator;
pub use parse::{extract_json, parse_subtasks, PLACEHOLDER_NAME};
pub use render::{render_node, render_subtask, render_task};
pub use tree::{
    add_child, flatten, get_root, propagate_supertasks, reindex, remove_child, set_supertask,
    update_estimated_minutes, NodeHandle,
};
pub use types::{
    NodeId, Subtask, SubtaskHandle, Supertask, SupertaskKind, TaggedEntity, Task, TaskHandle,
};
