use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const BUNDLED_STORY: &str = include_str!("../../assets/story.json");

static STORY: Lazy<Story> = Lazy::new(Story::load_bundled);

#[derive(Debug, Clone, PartialEq)]
pub enum StoryError {
    Parse(String),
    SceneNotFound(String),
    NoCurrentScene,
}

impl fmt::Display for StoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryError::Parse(msg) => write!(f, "Failed to parse story: {}", msg),
            StoryError::SceneNotFound(id) => write!(f, "Scene '{}' not found", id),
            StoryError::NoCurrentScene => write!(f, "No current scene"),
        }
    }
}

impl std::error::Error for StoryError {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Choice {
    pub id: Option<String>,
    pub label: Option<String>,
    /// `None` ends the story
    pub next_scene: Option<String>,
}

impl Choice {
    /// Label if present, otherwise the id
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .or(self.id.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub id: Option<String>,
    pub title: Option<String>,
    pub narration: Option<String>,
    pub lines: Vec<String>,
    pub choices: Vec<Choice>,
}

impl Scene {
    pub fn choice_labels(&self) -> Vec<String> {
        self.choices
            .iter()
            .filter_map(|choice| choice.label.clone())
            .filter(|label| !label.trim().is_empty())
            .collect()
    }
}

/// A scene graph keyed by scene id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Story {
    pub title: Option<String>,
    pub start_scene: Option<String>,
    pub scenes: BTreeMap<String, Scene>,
}

impl Story {
    pub fn from_json(json: &str) -> Result<Self, StoryError> {
        serde_json::from_str(json).map_err(|e| StoryError::Parse(e.to_string()))
    }

    /// Parse the story shipped with the app. A broken file yields an empty
    /// story so the rest of the app keeps working.
    pub fn load_bundled() -> Self {
        match Self::from_json(BUNDLED_STORY) {
            Ok(story) => {
                log::info!(
                    "Loaded story '{}' with {} scenes",
                    story.title.as_deref().unwrap_or("untitled"),
                    story.scenes.len()
                );
                story
            }
            Err(e) => {
                log::error!("{}, continuing with an empty story", e);
                Self::default()
            }
        }
    }

    pub fn scene(&self, id: &str) -> Result<&Scene, StoryError> {
        self.scenes
            .get(id)
            .ok_or_else(|| StoryError::SceneNotFound(id.to_string()))
    }

    /// Configured start scene, else the first scene by id
    pub fn start_scene_id(&self) -> Option<String> {
        self.start_scene
            .clone()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| self.scenes.keys().next().cloned())
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

/// Story bundled with the app, parsed on first use
pub fn bundled_story() -> &'static Story {
    &STORY
}
