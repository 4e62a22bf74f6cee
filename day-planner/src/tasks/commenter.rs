//! LLM-backed advice comments for tasks and subtasks.

use std::sync::Arc;
use std::time::Duration;

use crate::error::PlannerError;
use crate::llm::{complete_with_deadline, LlmClient, PromptTemplate};
use crate::tasks::render::render_node;
use crate::tasks::tree::NodeHandle;
use crate::tasks::types::TaggedEntity;
use crate::userdata::User;

const DEFAULT_MAIN_PROMPT: &str = "\
The user wants practical advice for getting one of their to-dos done. \
Considering their profile and daily routine, write a short piece of advice \
that will actually help them do it.";

const DEFAULT_CONTEXT_PROMPT: &str = "\
User profile: {bio}
User's daily routine: {prompt}
The to-do: {task}";

/// Generates free-text advice comments and appends them to the target node.
pub struct TaskCommenter {
    client: Arc<dyn LlmClient>,
    prompt: PromptTemplate,
    deadline: Option<Duration>,
}

impl TaskCommenter {
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

    /// Generate one advice comment for `target`, append it to the node's
    /// comment list, and return it.
    ///
    /// Rejects a blank target name before any LLM work. The response is free
    /// text; surrounding whitespace is trimmed, nothing else is interpreted.
    pub async fn generate_comment(
        &self,
        user: &User,
        target: &NodeHandle,
    ) -> Result<String, PlannerError> {
        if target.name().trim().is_empty() {
            return Err(PlannerError::EmptyName);
        }
        let rendered = self.prompt.render(&[
            ("bio", user.bio()),
            ("prompt", user.prompt.clone()),
            ("task", render_node(target)),
        ]);
        let response = complete_with_deadline(&self.client, self.deadline, rendered).await?;
        let comment = response.trim().to_string();

        match target {
            NodeHandle::Task(task) => task.borrow_mut().add_comment(comment.clone()),
            NodeHandle::Subtask(subtask) => subtask.borrow_mut().add_comment(comment.clone()),
        }
        Ok(comment)
    }
}
