//! LLM-backed task breakdown generation.

use std::sync::Arc;
use std::time::Duration;

use crate::error::PlannerError;
use crate::llm::{complete_with_deadline, LlmClient, LlmError, PromptTemplate};
use crate::tasks::parse::parse_subtasks;
use crate::tasks::tree::{
    add_child, propagate_supertasks, reindex, set_supertask, update_estimated_minutes, NodeHandle,
};
use crate::tasks::types::{SubtaskHandle, Task, TaskHandle};
use crate::userdata::User;

const DEFAULT_MAIN_PROMPT: &str = "\
The user has stated something they need to get done. Break it down into \
concrete subtasks, each phrased as a specific action, sized by the time and \
effort it realistically takes. Smaller steps are easier to finish.

Each subtask is stored alongside tags describing the scenes of the user's \
day, and is later recommended when the user's current context matches those \
tags. Tag every subtask with the locations, times of day, and situations it \
fits, based on the user's profile and daily routine.

In the context field, explain when in the user's day the work is best done.";

const DEFAULT_CONTEXT_PROMPT: &str = "\
User profile: {bio}
User's daily routine: {prompt}
Stated goal: {task}
Output instructions: {format_instructions}";

/// Output-shape instructions appended to every breakdown prompt.
const SUBTASK_FORMAT_INSTRUCTIONS: &str = "\
Respond with a single JSON object inside a ```json fence. The object has one \
key, \"subtasks\": an array where each entry has \"name\" (string), \
\"context\" (string), \"location_tags\", \"time_tags\", \"other_tags\" \
(arrays of strings), \"estimated_minutes\" (non-negative integer), and \
optionally its own nested \"subtasks\" array of the same shape.";

/// Generates task breakdown trees through an [`LlmClient`].
///
/// Prompt halves are replaceable; an optional deadline bounds each LLM call.
pub struct TaskGenerator {
    client: Arc<dyn LlmClient>,
    prompt: PromptTemplate,
    deadline: Option<Duration>,
}

impl TaskGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            prompt: PromptTemplate::new(DEFAULT_MAIN_PROMPT, DEFAULT_CONTEXT_PROMPT),
            deadline: None,
        }
    }

    /// Bound every LLM call by `limit`.
    pub fn with_deadline(mut self, limit: Duration) -> Self {
        self.deadline = Some(limit);
        self
    }

    /// Replace the instruction half of the prompt.
    pub fn set_main_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt.set_main(prompt);
    }

    /// Replace the context half of the prompt.
    pub fn set_context_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt.set_context(prompt);
    }

    /// The raw prompt template currently in effect.
    pub fn prompt_template(&self) -> String {
        self.prompt.template()
    }

    /// Generate a full breakdown tree for `goal`.
    ///
    /// Validates the goal name before any LLM work, asks the collaborator for
    /// a breakdown, reconstructs the subtasks, and wires the tree: attach,
    /// propagate, reindex, roll up. A malformed response produces a task with
    /// zero subtasks, not an error.
    pub async fn generate_task(&self, user: &User, goal: &str) -> Result<TaskHandle, PlannerError> {
        if goal.trim().is_empty() {
            return Err(PlannerError::EmptyName);
        }
        let rendered = self.prompt.render(&[
            ("bio", user.bio()),
            ("prompt", user.prompt.clone()),
            ("task", goal.to_string()),
            ("format_instructions", SUBTASK_FORMAT_INSTRUCTIONS.to_string()),
        ]);
        let response = complete_with_deadline(&self.client, self.deadline, rendered).await?;

        let task = Task::new(goal)?;
        let root = NodeHandle::task(&task);
        for node in parse_subtasks(&response) {
            add_child(&root, node);
        }
        propagate_supertasks(&root);
        reindex(&root);
        update_estimated_minutes(&root);
        Ok(task)
    }

    /// Generate a single subtask named `name` and wire it under `supertask`.
    ///
    /// The caller merges the node into the tree (typically via `add_child`
    /// followed by the maintenance pipeline).
    pub async fn generate_subtask(
        &self,
        user: &User,
        name: &str,
        supertask: &NodeHandle,
    ) -> Result<SubtaskHandle, PlannerError> {
        if name.trim().is_empty() {
            return Err(PlannerError::EmptyName);
        }
        let rendered = self.prompt.render(&[
            ("bio", user.bio()),
            ("prompt", user.prompt.clone()),
            ("task", name.to_string()),
            ("format_instructions", SUBTASK_FORMAT_INSTRUCTIONS.to_string()),
        ]);
        let response = complete_with_deadline(&self.client, self.deadline, rendered).await?;

        let node = parse_subtasks(&response).into_iter().next().ok_or_else(|| {
            LlmError::Schema("response contained no reconstructable subtask".to_string())
        })?;
        set_supertask(&node, supertask);
        Ok(node)
    }

    /// Break `node` down further, replacing its children with freshly
    /// generated ones.
    ///
    /// Runs the full maintenance pipeline on `node` and returns its rolled-up
    /// minutes. Ancestors are not touched; after expanding a subtask, roll up
    /// from the tree root to restore the aggregate invariant there too.
    pub async fn expand(&self, user: &User, node: &NodeHandle) -> Result<u32, PlannerError> {
        let name = node.name();
        if name.trim().is_empty() {
            return Err(PlannerError::EmptyName);
        }
        let goal = match node.context().as_str() {
            "" => name,
            context => format!("{} ({})", name, context),
        };
        let rendered = self.prompt.render(&[
            ("bio", user.bio()),
            ("prompt", user.prompt.clone()),
            ("task", goal),
            ("format_instructions", SUBTASK_FORMAT_INSTRUCTIONS.to_string()),
        ]);
        let response = complete_with_deadline(&self.client, self.deadline, rendered).await?;

        node.clear_subtasks();
        for child in parse_subtasks(&response) {
            add_child(node, child);
        }
        propagate_supertasks(node);
        reindex(node);
        Ok(update_estimated_minutes(node))
    }
}
