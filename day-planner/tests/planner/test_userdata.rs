//! Tests for user profiles and scene tagging

use std::sync::Arc;

use super::common::*;
use day_planner::error::PlannerError;
use day_planner::llm::LlmClient;
use day_planner::userdata::{draft_day_prompts, Scene, SceneGenerator, User};

const SCENE_RESPONSE: &str = r#"```json
{"scenes":[
  {"name":"commute","location_tags":["train"],"time_tags":["weekday","morning"],"other_tags":["reading"]},
  {"name":"lunch break","location_tags":["office"],"time_tags":["noon"],"other_tags":[]}
]}
```"#;

#[tokio::test]
async fn scene_generator_parses_fenced_wrapper() {
    let client = Arc::new(ScriptedLlm::new(vec![SCENE_RESPONSE]));
    let generator = SceneGenerator::new(client as Arc<dyn LlmClient>);
    let scenes = generator
        .generate_scenes(
            &sample_user(),
            &["commute".to_string(), "lunch break".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].name, "commute");
    assert_eq!(scenes[0].time_tags, vec!["weekday", "morning"]);
}

#[tokio::test]
async fn scene_generator_accepts_bare_array() {
    let client = Arc::new(ScriptedLlm::new(vec![
        r#"[{"name":"rest","location_tags":["home"],"time_tags":["evening"],"other_tags":[]}]"#,
    ]));
    let generator = SceneGenerator::new(client as Arc<dyn LlmClient>);
    let scenes = generator
        .generate_scenes(&sample_user(), &["rest".to_string()])
        .await
        .unwrap();
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].name, "rest");
}

#[tokio::test]
async fn scene_generator_rejects_garbage_as_schema_error() {
    let client = Arc::new(ScriptedLlm::new(vec!["no scenes today"]));
    let generator = SceneGenerator::new(client as Arc<dyn LlmClient>);
    let err = generator
        .generate_scenes(&sample_user(), &["rest".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::Llm(_)));
}

#[tokio::test]
async fn draft_day_prompts_splits_candidates() {
    let client: Arc<dyn LlmClient> = Arc::new(ScriptedLlm::new(vec![
        "Focused mornings on the train.\n---\nLibrary sessions after work.",
    ]));
    let candidates = draft_day_prompts(&client, &sample_user()).await.unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0], "Focused mornings on the train.");
}

#[test]
fn choose_prompt_is_bounds_checked() {
    let mut user = sample_user();
    let candidates = vec!["first".to_string(), "second".to_string()];
    user.choose_prompt(&candidates, 1).unwrap();
    assert_eq!(user.prompt, "second");
    assert!(matches!(
        user.choose_prompt(&candidates, 2),
        Err(PlannerError::IndexOutOfBounds { index: 2, len: 2 })
    ));
}

#[test]
fn append_scenes_extends_profile() {
    let mut user = sample_user();
    user.append_scenes(vec![Scene {
        name: "walk".to_string(),
        ..Scene::default()
    }]);
    assert_eq!(user.scenes.len(), 1);
    assert_eq!(user.scenes[0].name, "walk");
}

#[test]
fn bio_is_valid_json_with_profile_fields() {
    let user = sample_user();
    let bio: serde_json::Value = serde_json::from_str(&user.bio()).unwrap();
    assert_eq!(bio["name"], "Alex");
    assert_eq!(bio["occupation"], "developer");
    assert_eq!(bio["status"], "active");
}

#[test]
fn user_deserializes_with_defaults() {
    let json = r#"{
        "name": "Sam",
        "residence": "Busan",
        "birth_date": "1995-01-02",
        "occupation": "designer"
    }"#;
    let user: User = serde_json::from_str(json).unwrap();
    assert_eq!(user.user_id, 0);
    assert_eq!(user.status, "active");
    assert!(user.scenes.is_empty());
    assert!(!user.is_admin);
}

#[test]
fn display_blocks_render_profile_and_scenes() {
    let mut user = sample_user();
    user.append_scenes(vec![Scene {
        name: "commute".to_string(),
        location_tags: vec!["train".to_string()],
        ..Scene::default()
    }]);
    let block = user.to_string();
    assert!(block.contains("User: Alex"));
    assert!(block.contains("- Occupation: developer"));
    assert!(block.contains("Daily Scenes:"));
    assert!(block.contains("Scene: commute"));
}
