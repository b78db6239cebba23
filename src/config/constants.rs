/// Shared constants for the welcome screen and its configuration layer.

// ============================================================================
// Labels
// ============================================================================

/// Label used when neither the caller nor the branding supplies one
pub const DEFAULT_START_LABEL: &str = "Start call";

/// Window title for desktop builds
pub const WINDOW_TITLE: &str = "Voice Agent";

// ============================================================================
// Branding Storage
// ============================================================================

/// Local storage key holding JSON encoded branding overrides (web)
pub const STORAGE_KEY: &str = "welcome.branding";

/// Directory under the user config dir (desktop/mobile)
pub const CONFIG_DIR_NAME: &str = "voice-welcome";

/// Branding overrides file inside `CONFIG_DIR_NAME`
pub const CONFIG_FILE_NAME: &str = "branding.json";

// ============================================================================
// Welcome View Layout
// ============================================================================

/// DOM id of the welcome view root container
pub const ROOT_ELEMENT_ID: &str = "welcome-view";

/// Alpha of the dark overlay drawn over the background image
pub const OVERLAY_OPACITY: f32 = 0.55;

// ============================================================================
// Session Page
// ============================================================================

/// Status line of the session placeholder page
pub const SESSION_STATUS_TEXT: &str = "Session placeholder. No voice connection is made from this page.";
