//! Tree maintenance algorithms.
//!
//! All structure-changing operations on a breakdown tree live here as free
//! functions over [`NodeHandle`], so the same code serves a task root and any
//! subtask. The protocol after reshaping a tree (for example after attaching
//! freshly reconstructed subtasks) is: attach, [`propagate_supertasks`],
//! [`reindex`], [`update_estimated_minutes`].

use std::rc::Rc;

use crate::error::PlannerError;
use crate::tasks::types::{NodeId, SubtaskHandle, Supertask, SupertaskKind, TaskHandle};

/// Either node kind, as a parent or traversal root.
#[derive(Debug, Clone)]
pub enum NodeHandle {
    Task(TaskHandle),
    Subtask(SubtaskHandle),
}

impl NodeHandle {
    /// The node kind, as recorded in children's denormalized parent fields.
    pub fn kind(&self) -> SupertaskKind {
        match self {
            NodeHandle::Task(_) => SupertaskKind::Task,
            NodeHandle::Subtask(_) => SupertaskKind::Subtask,
        }
    }

    /// The node's caller-assigned id.
    pub fn id(&self) -> NodeId {
        match self {
            NodeHandle::Task(t) => t.borrow().id.clone(),
            NodeHandle::Subtask(s) => s.borrow().id.clone(),
        }
    }

    /// The node's name.
    pub fn name(&self) -> String {
        match self {
            NodeHandle::Task(t) => t.borrow().name.clone(),
            NodeHandle::Subtask(s) => s.borrow().name.clone(),
        }
    }

    /// The node's free-text context.
    pub fn context(&self) -> String {
        match self {
            NodeHandle::Task(t) => t.borrow().context.clone(),
            NodeHandle::Subtask(s) => s.borrow().context.clone(),
        }
    }

    /// Snapshot of the direct children (handle clones, not copies).
    pub fn children(&self) -> Vec<SubtaskHandle> {
        match self {
            NodeHandle::Task(t) => t.borrow().subtasks.clone(),
            NodeHandle::Subtask(s) => s.borrow().subtasks.clone(),
        }
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        match self {
            NodeHandle::Task(t) => t.borrow().subtasks.len(),
            NodeHandle::Subtask(s) => s.borrow().subtasks.len(),
        }
    }

    /// The direct child at `index`, bounds-checked.
    pub fn subtask_at(&self, index: usize) -> Result<SubtaskHandle, PlannerError> {
        let len = self.child_count();
        if index >= len {
            return Err(PlannerError::IndexOutOfBounds { index, len });
        }
        Ok(self.children()[index].clone())
    }

    /// Replace the child at `index`, wiring the newcomer's parent link.
    pub fn replace_subtask(
        &self,
        index: usize,
        replacement: SubtaskHandle,
    ) -> Result<(), PlannerError> {
        let len = self.child_count();
        if index >= len {
            return Err(PlannerError::IndexOutOfBounds { index, len });
        }
        match self {
            NodeHandle::Task(t) => t.borrow_mut().subtasks[index] = replacement.clone(),
            NodeHandle::Subtask(s) => s.borrow_mut().subtasks[index] = replacement.clone(),
        }
        set_supertask(&replacement, self);
        Ok(())
    }

    /// Drop all children and restore the leaf state.
    pub fn clear_subtasks(&self) {
        match self {
            NodeHandle::Task(t) => t.borrow_mut().subtasks.clear(),
            NodeHandle::Subtask(s) => {
                let mut node = s.borrow_mut();
                node.subtasks.clear();
                node.has_subtasks = false;
            }
        }
    }

    fn downgrade(&self) -> Supertask {
        match self {
            NodeHandle::Task(t) => Supertask::Task(Rc::downgrade(t)),
            NodeHandle::Subtask(s) => Supertask::Subtask(Rc::downgrade(s)),
        }
    }
}

impl From<TaskHandle> for NodeHandle {
    fn from(task: TaskHandle) -> Self {
        NodeHandle::Task(task)
    }
}

impl From<SubtaskHandle> for NodeHandle {
    fn from(subtask: SubtaskHandle) -> Self {
        NodeHandle::Subtask(subtask)
    }
}

/// Wire `child`'s non-owning parent reference to `parent`, copying the
/// parent's id and kind into the denormalized fields. Idempotent.
pub fn set_supertask(child: &SubtaskHandle, parent: &NodeHandle) {
    let id = parent.id();
    let kind = parent.kind();
    let link = parent.downgrade();

    let mut node = child.borrow_mut();
    node.supertask = Some(link);
    node.supertask_id = Some(id);
    node.supertask_kind = Some(kind);
}

/// Wire parent references for the whole subtree under `root`.
///
/// Construction alone does not establish back-references, so this must run
/// after bulk-replacing a `subtasks` list (for example after parsing LLM
/// output).
pub fn propagate_supertasks(root: &NodeHandle) {
    for child in root.children() {
        set_supertask(&child, root);
        let has_children = !child.borrow().subtasks.is_empty();
        if has_children {
            propagate_supertasks(&NodeHandle::Subtask(child));
        }
    }
}

/// Renumber sibling indices to `1..=len` in list order, recursing into
/// children that have children of their own.
pub fn reindex(root: &NodeHandle) {
    for (position, child) in root.children().into_iter().enumerate() {
        child.borrow_mut().index = position + 1;
        let has_children = !child.borrow().subtasks.is_empty();
        if has_children {
            reindex(&NodeHandle::Subtask(child));
        }
    }
}

/// Append `child` to `parent` and wire its parent link.
///
/// Deliberately does not reindex: bulk attachment renumbers once via
/// [`reindex`] afterwards instead of paying per insert.
pub fn add_child(parent: &NodeHandle, child: SubtaskHandle) {
    match parent {
        NodeHandle::Task(t) => t.borrow_mut().subtasks.push(child.clone()),
        NodeHandle::Subtask(s) => {
            let mut node = s.borrow_mut();
            node.subtasks.push(child.clone());
            node.has_subtasks = true;
        }
    }
    set_supertask(&child, parent);
}

/// Remove and return the child at `index`, then immediately reindex the
/// remaining siblings.
pub fn remove_child(parent: &NodeHandle, index: usize) -> Result<SubtaskHandle, PlannerError> {
    let removed = match parent {
        NodeHandle::Task(t) => {
            let mut node = t.borrow_mut();
            if index >= node.subtasks.len() {
                return Err(PlannerError::IndexOutOfBounds {
                    index,
                    len: node.subtasks.len(),
                });
            }
            node.subtasks.remove(index)
        }
        NodeHandle::Subtask(s) => {
            let mut node = s.borrow_mut();
            if index >= node.subtasks.len() {
                return Err(PlannerError::IndexOutOfBounds {
                    index,
                    len: node.subtasks.len(),
                });
            }
            let removed = node.subtasks.remove(index);
            node.has_subtasks = !node.subtasks.is_empty();
            removed
        }
    };
    reindex(parent);
    Ok(removed)
}

/// All strict descendants of `root` in pre-order: each child, then that
/// child's descendants, before the next sibling. No mutation.
pub fn flatten(root: &NodeHandle) -> Vec<SubtaskHandle> {
    let mut out = Vec::new();
    for child in root.children() {
        out.push(child.clone());
        out.extend(flatten(&NodeHandle::Subtask(child)));
    }
    out
}

/// Bottom-up duration roll-up.
///
/// Leaf values are authoritative and left untouched; every internal node's
/// `estimated_minutes` is overwritten with the sum of its direct children's,
/// children first (post-order). Returns the root's resulting value. This is
/// the only place the aggregate invariant is restored, so call it after any
/// edit that changes a leaf duration or the tree shape.
///
/// Sums saturate at `u32::MAX`. Leaf durations come from untrusted LLM
/// output, so an absurd total must not panic.
pub fn update_estimated_minutes(root: &NodeHandle) -> u32 {
    let children = root.children();
    if children.is_empty() {
        return match root {
            NodeHandle::Task(t) => t.borrow().estimated_minutes,
            NodeHandle::Subtask(s) => s.borrow().estimated_minutes,
        };
    }
    let total = children
        .into_iter()
        .map(|child| update_estimated_minutes(&NodeHandle::Subtask(child)))
        .fold(0u32, u32::saturating_add);
    match root {
        NodeHandle::Task(t) => t.borrow_mut().estimated_minutes = total,
        NodeHandle::Subtask(s) => s.borrow_mut().estimated_minutes = total,
    }
    total
}

/// Ascend parent references from `node` until the task root.
///
/// Fails with [`PlannerError::BrokenChain`] if a reference is unset or
/// dangling before a task is reached; an improperly wired tree is a caller
/// bug, not a data error.
pub fn get_root(node: &SubtaskHandle) -> Result<TaskHandle, PlannerError> {
    let mut current = node.clone();
    loop {
        let parent = current.borrow().supertask.clone();
        match parent {
            None => return Err(PlannerError::BrokenChain),
            Some(Supertask::Task(weak)) => {
                return weak.upgrade().ok_or(PlannerError::BrokenChain)
            }
            Some(Supertask::Subtask(weak)) => {
                current = weak.upgrade().ok_or(PlannerError::BrokenChain)?;
            }
        }
    }
}

/// Convenience constructors used by generators and tests.
impl NodeHandle {
    /// Wrap a freshly built task root.
    pub fn task(task: &TaskHandle) -> Self {
        NodeHandle::Task(Rc::clone(task))
    }

    /// Wrap a subtask node.
    pub fn subtask(subtask: &SubtaskHandle) -> Self {
        NodeHandle::Subtask(Rc::clone(subtask))
    }
}
