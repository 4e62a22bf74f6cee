//! User profiles and daily scenes.
//!
//! - `scene` - tagged slices of a user's day
//! - `user` - profile data and day-summary drafting
//! - `generator` - LLM-backed scene tagging

pub mod generator;
pub mod scene;
pub mod user;

pub use generator::SceneGenerator;
pub use scene::{Scene, SceneSet};
pub use user::{draft_day_prompts, split_candidates, User};
