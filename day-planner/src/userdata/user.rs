//! User profile data and day-summary drafting.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::llm::{LlmClient, PromptTemplate};
use crate::userdata::scene::Scene;

fn default_status() -> String {
    "active".to_string()
}

/// A user's profile: identity, traits, daily scenes, and the day-summary
/// prompt that grounds every generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    /// 0 means not registered.
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub email: String,

    pub residence: String,
    pub birth_date: NaiveDate,
    pub occupation: String,
    #[serde(default)]
    pub personality: Vec<String>,
    #[serde(default)]
    pub scenes: Vec<Scene>,

    #[serde(default)]
    pub positives: Vec<String>,
    #[serde(default)]
    pub negatives: Vec<String>,
    /// One-paragraph day summary used as generation context.
    #[serde(default)]
    pub prompt: String,

    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    /// JSON dump of the whole profile, embedded into prompts as-is.
    pub fn bio(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Append freshly tagged scenes to the profile.
    pub fn append_scenes(&mut self, scenes: Vec<Scene>) {
        self.scenes.extend(scenes);
    }

    /// Adopt one of several drafted day summaries, bounds-checked.
    pub fn choose_prompt(
        &mut self,
        candidates: &[String],
        index: usize,
    ) -> Result<(), PlannerError> {
        if index >= candidates.len() {
            return Err(PlannerError::IndexOutOfBounds {
                index,
                len: candidates.len(),
            });
        }
        self.prompt = candidates[index].clone();
        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User: {}", self.name)?;
        writeln!(f, "- Location: {}", self.residence)?;
        writeln!(f, "- Birthdate: {}", self.birth_date)?;
        writeln!(f, "- Occupation: {}", self.occupation)?;
        writeln!(f, "- Personality: [{}]", self.personality.join(", "))?;
        writeln!(f, "- Positives: [{}]", self.positives.join(", "))?;
        writeln!(f, "- Negatives: [{}]", self.negatives.join(", "))?;
        writeln!(f, "- Prompt: {}", self.prompt)?;
        write!(f, "Daily Scenes:")?;
        for scene in &self.scenes {
            let block = scene.to_string().replace('\n', "\n  ");
            write!(f, "\n  {}", block)?;
        }
        Ok(())
    }
}

const DRAFT_MAIN_PROMPT: &str = "\
Below is a user profile. Imagine the user's character, daily routine, and \
main interests, and write them up as one paragraph. The paragraph is used to \
ground to-do recommendations in the user's actual living pattern, so the \
better the understanding it captures, the more useful the recommendations. \
Cover both the user's positive and negative sides.

Produce 3 to 5 clearly different answers so the user can pick the one that \
fits. Each answer should focus on a different part of the profile; drop any \
answer that comes out similar to another.";

const DRAFT_CONTEXT_PROMPT: &str = "\
Output instructions: {format_instructions}
User profile: {bio}";

const DRAFT_FORMAT_INSTRUCTIONS: &str = "Separate the answers with a line containing only \"---\".";

/// Split an LLM response into `---`-separated candidate paragraphs.
///
/// Empty segments are dropped; surrounding whitespace is trimmed.
pub fn split_candidates(text: &str) -> Vec<String> {
    text.split("---")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ask the LLM for several candidate day-summary paragraphs for `user`.
///
/// The caller picks one via [`User::choose_prompt`].
pub async fn draft_day_prompts(
    client: &Arc<dyn LlmClient>,
    user: &User,
) -> Result<Vec<String>, PlannerError> {
    let template = PromptTemplate::new(DRAFT_MAIN_PROMPT, DRAFT_CONTEXT_PROMPT);
    let rendered = template.render(&[
        ("format_instructions", DRAFT_FORMAT_INSTRUCTIONS.to_string()),
        ("bio", user.bio()),
    ]);
    let response = client.complete(&rendered).await?;
    Ok(split_candidates(&response))
}
