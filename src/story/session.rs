use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matcher::match_choice;
use super::scene::{Choice, Scene, Story, StoryError};

pub const NO_MATCH_MESSAGE: &str =
    "I didn't understand which option you meant. Please pick one of the available choices or repeat it more clearly.";

/// One applied choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub scene: String,
    pub choice_id: Option<String>,
    pub choice_label: Option<String>,
    pub next_scene: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChooseOutcome {
    /// The choice was applied; `next_scene` is `None` when the story ended
    Advanced {
        choice: Choice,
        next_scene: Option<Scene>,
    },
    /// Nothing matched confidently
    NoMatch { available: Vec<String> },
}

/// Progress of one playthrough
#[derive(Debug, Clone, PartialEq)]
pub struct StorySession {
    current_scene: Option<String>,
    history: Vec<HistoryEntry>,
    started_at: DateTime<Utc>,
}

impl StorySession {
    /// Start at `start_override`, else the story's start scene
    pub fn start(story: &Story, start_override: Option<&str>) -> Self {
        let current_scene = start_override
            .map(str::to_string)
            .or_else(|| story.start_scene_id());
        log::info!("Starting story session at {:?}", current_scene);

        Self {
            current_scene,
            history: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn current_scene_id(&self) -> Option<&str> {
        self.current_scene.as_deref()
    }

    pub fn current_scene<'a>(&self, story: &'a Story) -> Result<&'a Scene, StoryError> {
        let id = self.current_scene.as_deref().ok_or(StoryError::NoCurrentScene)?;
        story.scene(id)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// True once a choice without a next scene was taken
    pub fn is_finished(&self) -> bool {
        self.current_scene_id().is_none() && !self.history.is_empty()
    }

    /// Map a spoken or typed answer onto a choice of the current scene and apply it
    pub fn choose(&mut self, story: &Story, utterance: &str) -> Result<ChooseOutcome, StoryError> {
        let scene = self.current_scene(story)?;
        match match_choice(scene, utterance) {
            Some(choice) => {
                let choice = choice.clone();
                self.apply(story, choice)
            }
            None => {
                log::info!("No choice matched '{}'", utterance);
                Ok(ChooseOutcome::NoMatch {
                    available: scene.choice_labels(),
                })
            }
        }
    }

    /// Apply a choice picked directly, without matching
    pub fn apply(&mut self, story: &Story, choice: Choice) -> Result<ChooseOutcome, StoryError> {
        let scene_id = self
            .current_scene
            .clone()
            .ok_or(StoryError::NoCurrentScene)?;

        let next_scene = match choice.next_scene.as_deref() {
            Some(next) => Some(story.scene(next)?.clone()),
            None => None,
        };

        self.history.push(HistoryEntry {
            at: Utc::now(),
            scene: scene_id,
            choice_id: choice.id.clone(),
            choice_label: choice.label.clone(),
            next_scene: choice.next_scene.clone(),
        });
        self.current_scene = choice.next_scene.clone();

        Ok(ChooseOutcome::Advanced { choice, next_scene })
    }

    /// Back to the story's start scene; history is kept
    pub fn reset(&mut self, story: &Story) {
        self.current_scene = story.start_scene_id();
        log::info!("Story session reset to {:?}", self.current_scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::bundled_story;

    #[test]
    fn test_start_uses_story_start_or_override() {
        let story = bundled_story();
        let session = StorySession::start(story, None);
        assert_eq!(session.current_scene_id(), Some("crossroads"));
        assert!(session.history().is_empty());
        assert!(!session.is_finished());

        let session = StorySession::start(story, Some("inn"));
        assert_eq!(session.current_scene(story).unwrap().title.as_deref(), Some("The Roadside Inn"));
    }

    #[test]
    fn test_choose_advances_and_records_history() {
        let story = bundled_story();
        let mut session = StorySession::start(story, None);

        let outcome = session.choose(story, "let's cross the old bridge").unwrap();
        match outcome {
            ChooseOutcome::Advanced { choice, next_scene } => {
                assert_eq!(choice.id.as_deref(), Some("bridge"));
                assert_eq!(next_scene.unwrap().title.as_deref(), Some("The Old Bridge"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        assert_eq!(session.current_scene_id(), Some("bridge"));
        let entry = &session.history()[0];
        assert_eq!(entry.scene, "crossroads");
        assert_eq!(entry.choice_label.as_deref(), Some("Cross the old bridge"));
        assert_eq!(entry.next_scene.as_deref(), Some("bridge"));
        assert!(entry.at >= session.started_at());
    }

    #[test]
    fn test_no_match_lists_available_choices() {
        let story = bundled_story();
        let mut session = StorySession::start(story, None);

        let outcome = session.choose(story, "dance with a dragon").unwrap();
        assert_eq!(
            outcome,
            ChooseOutcome::NoMatch {
                available: vec!["Cross the old bridge".to_string(), "Walk to the inn".to_string()],
            }
        );
        assert_eq!(session.current_scene_id(), Some("crossroads"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_ending_and_reset() {
        let story = bundled_story();
        let mut session = StorySession::start(story, Some("bridge"));

        session.choose(story, "pay").unwrap();
        assert_eq!(session.current_scene_id(), Some("far_shore"));

        let story_end = Story::from_json(
            r#"{ "start_scene": "a", "scenes": { "a": { "choices": [ { "id": "stop", "label": "Stop here" } ] } } }"#,
        )
        .unwrap();
        let mut short = StorySession::start(&story_end, None);
        let outcome = short.choose(&story_end, "stop here").unwrap();
        assert!(matches!(outcome, ChooseOutcome::Advanced { next_scene: None, .. }));
        assert!(short.is_finished());
        assert_eq!(short.current_scene(&story_end), Err(StoryError::NoCurrentScene));

        short.reset(&story_end);
        assert_eq!(short.current_scene_id(), Some("a"));
        assert_eq!(short.history().len(), 1);
    }

    #[test]
    fn test_missing_scene_is_an_error() {
        let story = bundled_story();
        let mut session = StorySession::start(story, Some("attic"));
        assert_eq!(
            session.choose(story, "anything"),
            Err(StoryError::SceneNotFound("attic".to_string()))
        );
    }
}
