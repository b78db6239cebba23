use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::constants::{OVERLAY_OPACITY, ROOT_ELEMENT_ID};
use crate::config::{resolve_label, Branding};

/// Branded splash screen with a single start control.
///
/// Holds no state. The only side effect is calling `on_start_call`, once per
/// activation of the button. `root_ref`, when given, receives the mounted root
/// container so a parent can measure it. Branding falls back to the context
/// value, then to the default preset.
#[component]
pub fn WelcomeView(
    start_button_text: String,
    on_start_call: EventHandler<()>,
    root_ref: Option<Signal<Option<Rc<MountedData>>>>,
    branding: Option<Branding>,
) -> Element {
    let branding = branding
        .or_else(try_consume_context::<Branding>)
        .unwrap_or_default();

    let label = resolve_label(&start_button_text, &branding);
    let name = branding.name.clone();
    let logo = branding.logo.to_string();
    let background_style = format!(
        "background-image: url(\"{}\"); background-size: cover; background-position: center; background-attachment: fixed;",
        branding.background
    );
    let overlay_style = format!("background-color: rgba(0, 0, 0, {});", OVERLAY_OPACITY);

    rsx! {
        div {
            id: ROOT_ELEMENT_ID,
            class: "welcome-view",
            style: "{background_style}",
            onmounted: move |event: MountedEvent| {
                if let Some(mut root_ref) = root_ref {
                    root_ref.set(Some(event.data()));
                }
            },

            div { class: "welcome-overlay", style: "{overlay_style}" }

            div { class: "welcome-content",
                img { class: "welcome-logo", src: "{logo}", alt: "{name}" }

                if let Some(intro) = branding.intro_text.clone() {
                    p { class: "welcome-intro", "{intro}" }
                }

                button {
                    r#type: "button",
                    class: branding.button_theme.class_name(),
                    style: branding.button_theme.inline_style(),
                    onclick: move |_| on_start_call.call(()),
                    "{label}"
                }
            }
        }
    }
}
