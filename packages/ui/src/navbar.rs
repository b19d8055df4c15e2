use dioxus::prelude::*;

use crate::activity_log_panel::ActivityLogToggle;
use crate::dispatcher::use_dispatcher;
use crate::events::AppEvent;

/// Top bar of the signed-in screen.
#[component]
pub fn Navbar() -> Element {
    let dispatcher = use_dispatcher();

    rsx! {
        div {
            class: "navbar",
            span { class: "navbar-title", "Invoicer" }
            div {
                class: "navbar-actions",
                ActivityLogToggle {}
                button {
                    id: "logout",
                    onclick: move |_| dispatcher.send(AppEvent::LogoutRequested),
                    "Log out"
                }
            }
        }
    }
}
