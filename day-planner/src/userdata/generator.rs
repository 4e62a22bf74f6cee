//! LLM-backed scene tagging.

use std::sync::Arc;
use std::time::Duration;

use crate::error::PlannerError;
use crate::llm::{complete_with_deadline, LlmClient, LlmError, PromptTemplate};
use crate::tasks::parse::extract_json;
use crate::userdata::scene::{Scene, SceneSet};
use crate::userdata::user::User;

const DEFAULT_MAIN_PROMPT: &str = "\
Below are the scenes that make up the user's day. Based on the profile and \
the scenes, write 3 to 5 time, location, and other tags for each scene as \
needed, and return them as JSON per the output instructions.

The tags feed a to-do database: each to-do is stored with tags describing \
the scenes of the user's day, and to-dos are recommended when the user's \
current context matches. Time tags cover things like weekday or holiday and \
the time of day. Location tags cover where the user is and where they are \
active. Other tags cover anything else that makes the to-do's context easy \
to search.";

const DEFAULT_CONTEXT_PROMPT: &str = "\
User profile: {bio}
Scenes: {scenes}
Output instructions: {format_instructions}";

/// Output-shape instructions appended to every scene-tagging prompt.
const SCENE_FORMAT_INSTRUCTIONS: &str = "\
Respond with a single JSON object inside a ```json fence: {\"scenes\": \
[{\"name\": string, \"location_tags\": [string], \"time_tags\": [string], \
\"other_tags\": [string]}]}.";

/// Tags a user's daily scenes through an [`LlmClient`].
///
/// Unlike subtask reconstruction, scenes are a typed contract: a response
/// that does not parse is a [`LlmError::Schema`] failure, not an empty
/// result.
pub struct SceneGenerator {
    client: Arc<dyn LlmClient>,
    prompt: PromptTemplate,
    deadline: Option<Duration>,
}

impl SceneGenerator {
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

    /// Tag the named scenes for `user` and return them.
    ///
    /// Accepts either the `{"scenes": [...]}` wrapper or a bare array.
    pub async fn generate_scenes(
        &self,
        user: &User,
        scene_names: &[String],
    ) -> Result<Vec<Scene>, PlannerError> {
        let rendered = self.prompt.render(&[
            ("bio", user.bio()),
            ("scenes", scene_names.join(", ")),
            ("format_instructions", SCENE_FORMAT_INSTRUCTIONS.to_string()),
        ]);
        let response = complete_with_deadline(&self.client, self.deadline, rendered).await?;

        let candidate = extract_json(&response);
        let scenes = serde_json::from_str::<SceneSet>(candidate)
            .map(|set| set.scenes)
            .or_else(|_| serde_json::from_str::<Vec<Scene>>(candidate))
            .map_err(|err| LlmError::Schema(format!("scene response did not parse: {err}")))?;
        Ok(scenes)
    }
}
