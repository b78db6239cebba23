use dioxus::prelude::*;

use crate::story::scene::{Choice, StoryError};
use crate::story::{bundled_story, ChooseOutcome, StorySession, NO_MATCH_MESSAGE};

/// Plays the bundled story: current scene, its choices, a free-text answer
/// box matched against the choices, restart and leave.
#[component]
pub fn StoryPlayer(on_leave: EventHandler<()>) -> Element {
    let story = bundled_story();
    let mut session = use_signal(|| StorySession::start(story, None));
    let mut answer = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);

    let mut handle = move |result: Result<ChooseOutcome, StoryError>| match result {
        Ok(ChooseOutcome::Advanced { choice, .. }) => {
            log::info!("Chose '{}'", choice.display_label());
            notice.set(None);
            answer.set(String::new());
        }
        Ok(ChooseOutcome::NoMatch { available }) => {
            notice.set(Some(format!("{} ({})", NO_MATCH_MESSAGE, available.join(", "))));
        }
        Err(e) => {
            log::error!("{}", e);
            notice.set(Some(e.to_string()));
        }
    };

    let title = story.title.clone().unwrap_or_default();
    let scene = session.read().current_scene(story).ok().cloned();
    let finished = session.read().is_finished();
    let steps = session.read().history().len();
    let started = session.read().started_at().format("%H:%M UTC").to_string();
    let notice_text = notice.read().clone();

    rsx! {
        div { class: "story-player",
            h2 { class: "story-title", "{title}" }

            {match scene {
                Some(scene) => {
                    let choices: Vec<(String, Choice)> = scene
                        .choices
                        .iter()
                        .map(|choice| (choice.display_label().to_string(), choice.clone()))
                        .collect();
                    rsx! {
                        div { class: "story-scene",
                            if let Some(scene_title) = scene.title.clone() {
                                h3 { class: "scene-title", "{scene_title}" }
                            }
                            if let Some(narration) = scene.narration.clone() {
                                p { class: "scene-narration", "{narration}" }
                            }
                            for line in scene.lines.clone() {
                                p { class: "scene-line", "{line}" }
                            }
                            div { class: "story-choices",
                                for (label, choice) in choices {
                                    button {
                                        key: "{label}",
                                        r#type: "button",
                                        class: "story-choice",
                                        onclick: move |_| handle(session.write().apply(story, choice.clone())),
                                        "{label}"
                                    }
                                }
                            }
                            div { class: "story-answer",
                                input {
                                    class: "story-input",
                                    r#type: "text",
                                    placeholder: "Type what you would say",
                                    value: "{answer}",
                                    oninput: move |evt| answer.set(evt.value()),
                                    onkeydown: move |evt: KeyboardEvent| {
                                        if evt.key() == Key::Enter {
                                            let utterance = answer.read().clone();
                                            handle(session.write().choose(story, &utterance));
                                        }
                                    },
                                }
                                button {
                                    r#type: "button",
                                    class: "story-send",
                                    onclick: move |_| {
                                        let utterance = answer.read().clone();
                                        handle(session.write().choose(story, &utterance));
                                    },
                                    "Answer"
                                }
                            }
                        }
                    }
                }
                None => rsx! {
                    p { class: "story-end",
                        if finished {
                            "The End"
                        } else if story.is_empty() {
                            "This story has no scenes yet."
                        } else {
                            "This scene could not be found."
                        }
                    }
                },
            }}

            if let Some(text) = notice_text {
                p { class: "story-notice", "{text}" }
            }

            p { class: "story-progress", title: "Started {started}", "Choices made: {steps}" }

            div { class: "story-controls",
                button {
                    r#type: "button",
                    class: "leave-button",
                    onclick: move |_| {
                        session.write().reset(story);
                        notice.set(None);
                    },
                    "Restart"
                }
                button {
                    r#type: "button",
                    class: "leave-button",
                    onclick: move |_| on_leave.call(()),
                    "Leave"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn test_renders_start_scene_with_choices() {
        fn app() -> Element {
            rsx! { StoryPlayer { on_leave: move |_| {} } }
        }

        let html = render(app);
        assert!(html.contains("The Lantern Road"));
        assert!(html.contains("The Crossroads"));
        assert!(html.contains(">Cross the old bridge</button>"));
        assert!(html.contains(">Walk to the inn</button>"));
        assert!(html.contains("Choices made: 0"));
        assert!(!html.contains("story-notice"));
    }
}
