//! Scenes: tagged slices of a user's day.
//!
//! A scene is a flat tagged record used only as generation context for task
//! recommendations. It is not part of the breakdown tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One slice of the user's day with its qualifier tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub name: String,
    pub location_tags: Vec<String>,
    pub time_tags: Vec<String>,
    pub other_tags: Vec<String>,
}

/// The wrapper shape the LLM is asked to return scenes in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSet {
    pub scenes: Vec<Scene>,
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scene: {}", self.name)?;
        writeln!(f, "- Location Tags: [{}]", self.location_tags.join(", "))?;
        writeln!(f, "- Time Tags: [{}]", self.time_tags.join(", "))?;
        write!(f, "- Other Tags: [{}]", self.other_tags.join(", "))
    }
}
