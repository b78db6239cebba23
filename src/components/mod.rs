mod story_player;
mod welcome_view;

pub use story_player::StoryPlayer;
pub use welcome_view::WelcomeView;
