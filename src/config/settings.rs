use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::branding::{Branding, BrandingError, ButtonTheme, ImageSource};

/// Branding loaded once per process and shared afterwards
static CURRENT_BRANDING: Lazy<RwLock<Option<Branding>>> = Lazy::new(|| RwLock::new(None));

/// Deployment overrides applied on top of a preset.
///
/// Every field is optional; an empty `intro_text` or `fixed_label` clears
/// the preset's value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingOverrides {
    pub preset: Option<String>,
    pub name: Option<String>,
    pub background_url: Option<String>,
    pub logo_url: Option<String>,
    pub intro_text: Option<String>,
    pub fixed_label: Option<String>,
    pub button_theme: Option<ButtonTheme>,
    pub story_mode: Option<bool>,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl BrandingOverrides {
    pub fn from_json(json: &str) -> Result<Self, BrandingError> {
        serde_json::from_str(json).map_err(|e| BrandingError::Parse(e.to_string()))
    }

    /// Build the final branding: preset first, then each override field
    pub fn apply(&self) -> Result<Branding, BrandingError> {
        let mut branding = match self.preset.as_deref() {
            Some(preset) => Branding::preset(preset)?,
            None => Branding::default(),
        };

        if let Some(name) = &self.name {
            branding.name = name.trim().to_string();
        }
        if let Some(url) = &self.background_url {
            branding.background = ImageSource::Url(url.trim().to_string());
        }
        if let Some(url) = &self.logo_url {
            branding.logo = ImageSource::Url(url.trim().to_string());
        }
        if let Some(text) = &self.intro_text {
            branding.intro_text = non_blank(text);
        }
        if let Some(label) = &self.fixed_label {
            branding.fixed_label = non_blank(label);
        }
        if let Some(theme) = &self.button_theme {
            branding.button_theme = theme.clone();
        }
        if let Some(story_mode) = self.story_mode {
            branding.story_mode = story_mode;
        }

        branding.validate()?;
        Ok(branding)
    }

    /// Read stored overrides, `None` if nothing was saved
    pub fn load() -> Result<Option<Self>, BrandingError> {
        match storage::read_raw()? {
            Some(json) => Self::from_json(&json).map(Some),
            None => Ok(None),
        }
    }
}

/// Resolve branding from storage, falling back to the default preset
pub fn load_branding() -> Branding {
    match BrandingOverrides::load() {
        Ok(Some(overrides)) => match overrides.apply() {
            Ok(branding) => {
                log::info!("Using stored branding '{}'", branding.name);
                branding
            }
            Err(e) => {
                log::warn!("{}, using default branding", e);
                Branding::default()
            }
        },
        Ok(None) => {
            log::info!("No stored branding, using default");
            Branding::default()
        }
        Err(e) => {
            log::warn!("{}, using default branding", e);
            Branding::default()
        }
    }
}

/// Cached branding for this process, loaded on first use
pub fn current_branding() -> Branding {
    if let Some(branding) = CURRENT_BRANDING.read().ok().and_then(|b| b.clone()) {
        return branding;
    }

    let branding = load_branding();
    if let Ok(mut current) = CURRENT_BRANDING.write() {
        *current = Some(branding.clone());
    }
    branding
}

#[cfg(target_arch = "wasm32")]
mod storage {
    use web_sys::Storage;

    use crate::config::branding::BrandingError;
    use crate::config::constants::STORAGE_KEY;

    fn local_storage() -> Result<Storage, BrandingError> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .ok_or_else(|| BrandingError::Storage("Local storage not available".to_string()))
    }

    pub fn read_raw() -> Result<Option<String>, BrandingError> {
        local_storage()?
            .get_item(STORAGE_KEY)
            .map_err(|_| BrandingError::Storage("Failed to read branding from local storage".to_string()))
    }
}

#[cfg(all(not(target_arch = "wasm32"), any(feature = "desktop", feature = "mobile")))]
mod storage {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use crate::config::branding::BrandingError;
    use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

    fn config_path() -> Result<PathBuf, BrandingError> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| BrandingError::Storage("No config directory on this system".to_string()))
    }

    pub fn read_raw() -> Result<Option<String>, BrandingError> {
        let path = config_path()?;
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BrandingError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

// Native web builds (tests, SSR) have no override store
#[cfg(all(not(target_arch = "wasm32"), not(any(feature = "desktop", feature = "mobile"))))]
mod storage {
    use crate::config::branding::BrandingError;

    pub fn read_raw() -> Result<Option<String>, BrandingError> {
        Ok(None)
    }
}
