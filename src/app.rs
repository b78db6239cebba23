use dioxus::prelude::*;

use crate::components::WelcomeView;
use crate::config::constants::DEFAULT_START_LABEL;
use crate::config::current_branding;
use crate::pages::Session;

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Welcome {},
    #[route("/session")]
    Session {},
}

// main app component
#[component]
pub fn App() -> Element {
    // branding is resolved once and shared with every page
    use_context_provider(current_branding);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

#[component]
fn Welcome() -> Element {
    let navigator = use_navigator();

    rsx! {
        WelcomeView {
            start_button_text: DEFAULT_START_LABEL,
            on_start_call: move |_| {
                log::info!("Start requested, opening session");
                navigator.push(Route::Session {});
            },
        }
    }
}
