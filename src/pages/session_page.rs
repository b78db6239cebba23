use dioxus::prelude::*;

use crate::app::Route;
use crate::components::StoryPlayer;
use crate::config::constants::SESSION_STATUS_TEXT;
use crate::config::Branding;

/// Shown once the welcome screen hands off. Story branding plays the bundled
/// story; otherwise this is a placeholder with a way back.
#[component]
pub fn Session() -> Element {
    let branding = use_context::<Branding>();
    let navigator = use_navigator();

    if branding.story_mode {
        return rsx! {
            div { class: "session-page",
                StoryPlayer {
                    on_leave: move |_| {
                        log::info!("Leaving story");
                        navigator.push(Route::Welcome {});
                    },
                }
            }
        };
    }

    let name = branding.name;
    rsx! {
        div { class: "session-page",
            h2 { class: "session-title", "{name}" }
            p { class: "session-status", "{SESSION_STATUS_TEXT}" }
            button {
                r#type: "button",
                class: "leave-button",
                onclick: move |_| {
                    log::info!("Leaving session");
                    navigator.push(Route::Welcome {});
                },
                "Leave"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_makes_no_connection_claim() {
        let status = SESSION_STATUS_TEXT.to_lowercase();
        assert!(!status.contains("listening"));
        assert!(!status.contains("started"));
        assert!(status.contains("no voice connection"));
    }
}
