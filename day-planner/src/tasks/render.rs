//! Human-readable snapshots of a breakdown tree.
//!
//! Display only; this format is never parsed back.

use crate::tasks::tree::NodeHandle;
use crate::tasks::types::{SubtaskHandle, TaskHandle};

/// Render a task root and its whole subtree as an indented text block.
pub fn render_task(task: &TaskHandle) -> String {
    let mut out = String::new();
    {
        let node = task.borrow();
        out.push_str(&format!("Task: {}\n", node.name));
        out.push_str(&format!("- Context: {}\n", node.context));
        out.push_str(&format!("- Location Tags: [{}]\n", node.location_tags.join(", ")));
        out.push_str(&format!("- Time Tags: [{}]\n", node.time_tags.join(", ")));
        out.push_str(&format!("- Other Tags: [{}]\n", node.other_tags.join(", ")));
        out.push_str(&format!("- Estimated Minutes: {}\n", node.estimated_minutes));
        if !node.subtasks.is_empty() {
            out.push_str("Subtasks:\n");
        }
    }
    for child in task.borrow().subtasks.iter() {
        render_subtask_into(&mut out, child, 1);
    }
    out
}

/// Render a single subtask (and its subtree) as an indented text block.
pub fn render_subtask(subtask: &SubtaskHandle) -> String {
    let mut out = String::new();
    render_subtask_into(&mut out, subtask, 0);
    out
}

/// Render either node kind.
pub fn render_node(node: &NodeHandle) -> String {
    match node {
        NodeHandle::Task(task) => render_task(task),
        NodeHandle::Subtask(subtask) => render_subtask(subtask),
    }
}

fn render_subtask_into(out: &mut String, subtask: &SubtaskHandle, depth: usize) {
    let indent = "  ".repeat(depth);
    let node = subtask.borrow();
    out.push_str(&format!("{}Subtask {}: {}\n", indent, node.index, node.name));
    out.push_str(&format!("{}- Context: {}\n", indent, node.context));
    out.push_str(&format!(
        "{}- Location Tags: [{}]\n",
        indent,
        node.location_tags.join(", ")
    ));
    out.push_str(&format!("{}- Time Tags: [{}]\n", indent, node.time_tags.join(", ")));
    out.push_str(&format!("{}- Other Tags: [{}]\n", indent, node.other_tags.join(", ")));
    out.push_str(&format!(
        "{}- Estimated Minutes: {}\n",
        indent, node.estimated_minutes
    ));
    match (&node.supertask_id, &node.supertask_kind) {
        (Some(id), Some(kind)) => {
            out.push_str(&format!("{}- Supertask: {} ({})\n", indent, id, kind));
        }
        _ => out.push_str(&format!("{}- Supertask: (unset)\n", indent)),
    }
    if !node.subtasks.is_empty() {
        out.push_str(&format!("{}Subtasks:\n", indent));
        for child in node.subtasks.iter() {
            render_subtask_into(out, child, depth + 1);
        }
    }
}
