use std::fmt;

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use super::constants::DEFAULT_START_LABEL;

const VOICE_AGENT_BACKGROUND: Asset = asset!("/assets/images/voice_agent_background.svg");
const VOICE_AGENT_LOGO: Asset = asset!("/assets/images/voice_agent_logo.svg");
const STORY_GAME_BACKGROUND: Asset = asset!("/assets/images/story_game_background.svg");
const STORY_GAME_LOGO: Asset = asset!("/assets/images/story_game_logo.svg");

pub const VOICE_AGENT_PRESET: &str = "voice_agent";
pub const STORY_GAME_PRESET: &str = "story_game";

const UNSAFE_URL_CHARS: [char; 5] = ['"', '\'', '(', ')', '\\'];

#[derive(Debug, Clone, PartialEq)]
pub enum BrandingError {
    Storage(String),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for BrandingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrandingError::Storage(msg) => write!(f, "Branding storage error: {}", msg),
            BrandingError::Parse(msg) => write!(f, "Failed to parse branding: {}", msg),
            BrandingError::Invalid(msg) => write!(f, "Invalid branding: {}", msg),
        }
    }
}

impl std::error::Error for BrandingError {}

/// Where an image comes from. Loading is left to the host; this only
/// renders to a URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Bundled with the app through `asset!`
    Bundled(Asset),
    /// Served from elsewhere, injected at runtime
    Url(String),
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Bundled(asset) => write!(f, "{}", asset),
            ImageSource::Url(url) => f.write_str(url),
        }
    }
}

/// Color theme of the start button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonTheme {
    Primary,
    Amber,
    /// Arbitrary CSS colors
    Custom { background: String, foreground: String },
}

impl ButtonTheme {
    pub fn class_name(&self) -> &'static str {
        match self {
            ButtonTheme::Primary => "start-button start-button-primary",
            ButtonTheme::Amber => "start-button start-button-amber",
            ButtonTheme::Custom { .. } => "start-button",
        }
    }

    /// Inline style for custom colors; named themes are styled by class
    pub fn inline_style(&self) -> Option<String> {
        match self {
            ButtonTheme::Custom { background, foreground } => Some(format!(
                "background-color: {}; color: {};",
                background, foreground
            )),
            _ => None,
        }
    }
}

/// Everything that varies between deployments of the welcome screen.
///
/// There is a single `WelcomeView`; presets only differ in the data held here.
#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    /// Product name, also the logo alt text
    pub name: String,
    pub background: ImageSource,
    pub logo: ImageSource,
    /// Optional text shown under the logo
    pub intro_text: Option<String>,
    /// Replaces the caller supplied start label when set
    pub fixed_label: Option<String>,
    pub button_theme: ButtonTheme,
    /// Session page plays the bundled story instead of the placeholder
    pub story_mode: bool,
}

impl Default for Branding {
    fn default() -> Self {
        Self::voice_agent()
    }
}

impl Branding {
    /// Generic voice agent branding
    pub fn voice_agent() -> Self {
        Self {
            name: "Voice Agent".to_string(),
            background: ImageSource::Bundled(VOICE_AGENT_BACKGROUND),
            logo: ImageSource::Bundled(VOICE_AGENT_LOGO),
            intro_text: None,
            fixed_label: None,
            button_theme: ButtonTheme::Primary,
            story_mode: false,
        }
    }

    /// Voice driven story game branding
    pub fn story_game() -> Self {
        Self {
            name: "Story Game".to_string(),
            background: ImageSource::Bundled(STORY_GAME_BACKGROUND),
            logo: ImageSource::Bundled(STORY_GAME_LOGO),
            intro_text: Some(
                "An interactive story you play with your voice. Speak your choices and the narrator will carry you to the next scene."
                    .to_string(),
            ),
            fixed_label: Some("Begin the story".to_string()),
            button_theme: ButtonTheme::Amber,
            story_mode: true,
        }
    }

    /// Look up a preset by its configuration name
    pub fn preset(name: &str) -> Result<Self, BrandingError> {
        match name.trim() {
            VOICE_AGENT_PRESET => Ok(Self::voice_agent()),
            STORY_GAME_PRESET => Ok(Self::story_game()),
            other => Err(BrandingError::Invalid(format!("unknown preset '{}'", other))),
        }
    }

    pub fn validate(&self) -> Result<(), BrandingError> {
        if self.name.trim().is_empty() {
            return Err(BrandingError::Invalid("name is empty".to_string()));
        }

        for (field, source) in [("background", &self.background), ("logo", &self.logo)] {
            if let ImageSource::Url(url) = source {
                if url.trim().is_empty() {
                    return Err(BrandingError::Invalid(format!("{} url is empty", field)));
                }
                // the url lands inside a CSS `url("...")`
                if url.chars().any(|c| UNSAFE_URL_CHARS.contains(&c) || c.is_control()) {
                    return Err(BrandingError::Invalid(format!(
                        "{} url contains quotes, parentheses, backslashes or control characters",
                        field
                    )));
                }
            }
        }

        if matches!(&self.fixed_label, Some(label) if label.trim().is_empty()) {
            return Err(BrandingError::Invalid("fixed label is blank".to_string()));
        }

        if let ButtonTheme::Custom { background, foreground } = &self.button_theme {
            if background.trim().is_empty() || foreground.trim().is_empty() {
                return Err(BrandingError::Invalid("custom button colors must be set".to_string()));
            }
        }

        Ok(())
    }
}

/// Text shown on the start button.
///
/// A configured fixed label wins, then the caller's text verbatim. Blank input
/// falls back to `DEFAULT_START_LABEL`.
pub fn resolve_label(start_button_text: &str, branding: &Branding) -> String {
    if let Some(label) = branding.fixed_label.as_deref() {
        if !label.trim().is_empty() {
            return label.to_string();
        }
    }

    if start_button_text.trim().is_empty() {
        log::warn!("Empty start button text, using \"{}\"", DEFAULT_START_LABEL);
        return DEFAULT_START_LABEL.to_string();
    }

    start_button_text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_label_uses_caller_text_verbatim() {
        let branding = Branding::voice_agent();
        assert_eq!(resolve_label("Begin", &branding), "Begin");
        assert_eq!(resolve_label("  Talk to us ", &branding), "  Talk to us ");
    }

    #[test]
    fn test_resolve_label_prefers_fixed_label() {
        let branding = Branding::story_game();
        assert_eq!(resolve_label("Start call", &branding), "Begin the story");
    }

    #[test]
    fn test_resolve_label_falls_back_on_blank_text() {
        let mut branding = Branding::voice_agent();
        assert_eq!(resolve_label("", &branding), DEFAULT_START_LABEL);
        assert_eq!(resolve_label("   ", &branding), DEFAULT_START_LABEL);

        branding.fixed_label = Some(" ".to_string());
        assert_eq!(resolve_label("Go", &branding), "Go");
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(Branding::voice_agent().validate().is_ok());
        assert!(Branding::story_game().validate().is_ok());
        assert_eq!(Branding::default(), Branding::voice_agent());
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(Branding::preset("story_game").unwrap(), Branding::story_game());
        assert_eq!(Branding::preset(" voice_agent ").unwrap(), Branding::voice_agent());
        assert!(matches!(
            Branding::preset("space_opera"),
            Err(BrandingError::Invalid(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut branding = Branding::voice_agent();
        branding.logo = ImageSource::Url("  ".to_string());
        assert!(branding.validate().is_err());

        let mut branding = Branding::voice_agent();
        branding.name = String::new();
        assert!(branding.validate().is_err());

        let mut branding = Branding::voice_agent();
        branding.button_theme = ButtonTheme::Custom {
            background: "#123456".to_string(),
            foreground: String::new(),
        };
        assert!(branding.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_urls_that_break_css() {
        for url in [
            "https://cdn.example.com/bg.png\"); color: red; (\"",
            "https://cdn.example.com/a(1).png",
            "https://cdn.example.com/it's.png",
            "https://cdn.example.com/a\\b.png",
            "https://cdn.example.com/a\nb.png",
        ] {
            let mut branding = Branding::voice_agent();
            branding.background = ImageSource::Url(url.to_string());
            assert!(
                matches!(branding.validate(), Err(BrandingError::Invalid(_))),
                "accepted {:?}",
                url
            );
        }

        let mut branding = Branding::voice_agent();
        branding.background = ImageSource::Url("https://cdn.example.com/bg%20night.webp?v=2".to_string());
        assert!(branding.validate().is_ok());
    }

    #[test]
    fn test_button_theme_style() {
        assert_eq!(ButtonTheme::Primary.inline_style(), None);
        let custom = ButtonTheme::Custom {
            background: "#0f766e".to_string(),
            foreground: "white".to_string(),
        };
        assert_eq!(custom.class_name(), "start-button");
        assert_eq!(
            custom.inline_style().as_deref(),
            Some("background-color: #0f766e; color: white;")
        );
    }

    #[test]
    fn test_url_image_source_displays_verbatim() {
        let source = ImageSource::Url("https://cdn.example.com/bg.webp".to_string());
        assert_eq!(source.to_string(), "https://cdn.example.com/bg.webp");
    }
}
