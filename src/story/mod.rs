pub mod matcher;
pub mod scene;
pub mod session;

pub use scene::bundled_story;
pub use session::{ChooseOutcome, StorySession, NO_MATCH_MESSAGE};
