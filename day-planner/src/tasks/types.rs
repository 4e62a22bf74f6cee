//! Node types for the task breakdown tree.
//!
//! A [`Task`] is the root of a breakdown; [`Subtask`]s form the rest of the
//! tree. Both carry the same tagged-entity attribute set, exposed uniformly
//! through the [`TaggedEntity`] trait. Children are owned (`Rc` handles in a
//! `Vec`); the parent link on a subtask is a weak back-reference that is never
//! serialized, so the ownership graph stays acyclic.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Shared handle to a task root.
pub type TaskHandle = Rc<RefCell<Task>>;

/// Shared handle to a subtask node.
pub type SubtaskHandle = Rc<RefCell<Subtask>>;

/// Caller-assigned node identifier: an integer or a string.
///
/// The planner never generates ids; `0` is the unassigned default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::Int(0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Int(n)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Str(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Str(s)
    }
}

/// What kind of node a subtask hangs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupertaskKind {
    Task,
    Subtask,
}

impl fmt::Display for SupertaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupertaskKind::Task => write!(f, "task"),
            SupertaskKind::Subtask => write!(f, "subtask"),
        }
    }
}

/// Non-owning back-reference to a parent node.
///
/// Weak on purpose: children never keep their parent alive, and the link is
/// skipped during (de)serialization.
#[derive(Debug, Clone)]
pub enum Supertask {
    Task(Weak<RefCell<Task>>),
    Subtask(Weak<RefCell<Subtask>>),
}

/// The attribute set shared by task and subtask nodes.
///
/// Comment mutation lives here so annotation code does not care which node
/// kind it is handed.
pub trait TaggedEntity {
    fn name(&self) -> &str;
    fn id(&self) -> &NodeId;
    fn context(&self) -> &str;
    fn location_tags(&self) -> &[String];
    fn time_tags(&self) -> &[String];
    fn other_tags(&self) -> &[String];
    fn estimated_minutes(&self) -> u32;
    fn comments(&self) -> &[String];
    fn comments_mut(&mut self) -> &mut Vec<String>;

    /// Append a free-text annotation.
    fn add_comment(&mut self, text: String) {
        self.comments_mut().push(text);
    }

    /// Replace the comment at `index`.
    fn set_comment(&mut self, index: usize, text: String) -> Result<(), PlannerError> {
        let comments = self.comments_mut();
        if index >= comments.len() {
            return Err(PlannerError::IndexOutOfBounds {
                index,
                len: comments.len(),
            });
        }
        comments[index] = text;
        Ok(())
    }

    /// Remove and return the comment at `index`.
    fn remove_comment(&mut self, index: usize) -> Result<String, PlannerError> {
        let comments = self.comments_mut();
        if index >= comments.len() {
            return Err(PlannerError::IndexOutOfBounds {
                index,
                len: comments.len(),
            });
        }
        Ok(comments.remove(index))
    }
}

/// Root of a task breakdown tree. Has no parent and is never a child.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub name: String,
    pub id: NodeId,
    pub context: String,

    pub location_tags: Vec<String>,
    pub time_tags: Vec<String>,
    pub other_tags: Vec<String>,
    /// Derived from children once the tree has any; see
    /// [`update_estimated_minutes`](crate::tasks::tree::update_estimated_minutes).
    pub estimated_minutes: u32,
    pub comments: Vec<String>,

    pub subtasks: Vec<SubtaskHandle>,
}

impl Task {
    /// Create a task root with the given name; all other fields default.
    pub fn new(name: impl Into<String>) -> Result<TaskHandle, PlannerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlannerError::EmptyName);
        }
        Ok(Rc::new(RefCell::new(Task {
            name,
            ..Task::default()
        })))
    }
}

impl TaggedEntity for Task {
    fn name(&self) -> &str {
        &self.name
    }
    fn id(&self) -> &NodeId {
        &self.id
    }
    fn context(&self) -> &str {
        &self.context
    }
    fn location_tags(&self) -> &[String] {
        &self.location_tags
    }
    fn time_tags(&self) -> &[String] {
        &self.time_tags
    }
    fn other_tags(&self) -> &[String] {
        &self.other_tags
    }
    fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }
    fn comments(&self) -> &[String] {
        &self.comments
    }
    fn comments_mut(&mut self) -> &mut Vec<String> {
        &mut self.comments
    }
}

/// A node below the root: tagged entity plus sibling index, children, and
/// parent identity.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subtask {
    pub name: String,
    pub id: NodeId,
    /// 1-based position among siblings; maintained by
    /// [`reindex`](crate::tasks::tree::reindex), never hand-edited.
    pub index: usize,
    pub context: String,

    pub location_tags: Vec<String>,
    pub time_tags: Vec<String>,
    pub other_tags: Vec<String>,
    pub estimated_minutes: u32,
    pub comments: Vec<String>,

    pub has_subtasks: bool,
    pub subtasks: Vec<SubtaskHandle>,

    /// Denormalized parent identity, kept in sync by
    /// [`set_supertask`](crate::tasks::tree::set_supertask).
    pub supertask_id: Option<NodeId>,
    pub supertask_kind: Option<SupertaskKind>,

    #[serde(skip)]
    pub(crate) supertask: Option<Supertask>,
}

impl Subtask {
    /// Create a leaf subtask with the given name; all other fields default.
    pub fn new(name: impl Into<String>) -> Result<SubtaskHandle, PlannerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlannerError::EmptyName);
        }
        Ok(Rc::new(RefCell::new(Subtask {
            name,
            ..Subtask::default()
        })))
    }

    /// The live parent reference, if one was ever wired.
    pub fn supertask(&self) -> Option<&Supertask> {
        self.supertask.as_ref()
    }
}

impl TaggedEntity for Subtask {
    fn name(&self) -> &str {
        &self.name
    }
    fn id(&self) -> &NodeId {
        &self.id
    }
    fn context(&self) -> &str {
        &self.context
    }
    fn location_tags(&self) -> &[String] {
        &self.location_tags
    }
    fn time_tags(&self) -> &[String] {
        &self.time_tags
    }
    fn other_tags(&self) -> &[String] {
        &self.other_tags
    }
    fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }
    fn comments(&self) -> &[String] {
        &self.comments
    }
    fn comments_mut(&mut self) -> &mut Vec<String> {
        &mut self.comments
    }
}
