use dioxus::prelude::*;

use crate::activity_log::LogLevel;
use crate::dispatcher::use_dispatcher;
use crate::events::AppEvent;

#[component]
pub fn ActivityLogPanel() -> Element {
    let dispatcher = use_dispatcher();
    let log = dispatcher.state().read().activity.clone();

    if !log.visible {
        return rsx! {};
    }

    let on_clear = {
        let dispatcher = dispatcher.clone();
        move |_| dispatcher.send(AppEvent::ActivityLogCleared)
    };
    let on_close = move |_| dispatcher.send(AppEvent::ActivityLogToggled);

    rsx! {
        div {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                span { "Activity Log" }
                div {
                    class: "activity-log-header-actions",
                    button { onclick: on_clear, "Clear" }
                    button { onclick: on_close, "Close" }
                }
            }
            div {
                class: "activity-log-entries",
                for entry in log.entries.iter().rev() {
                    div {
                        class: match entry.level {
                            LogLevel::Error => "activity-log-entry error",
                            LogLevel::Warning => "activity-log-entry warning",
                            LogLevel::Success => "activity-log-entry success",
                            LogLevel::Info => "activity-log-entry info",
                        },
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { " {entry.message}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ActivityLogToggle() -> Element {
    let dispatcher = use_dispatcher();
    let (count, has_errors) = {
        let state = dispatcher.state();
        let state = state.read();
        (state.activity.entries.len(), state.activity.has_errors())
    };

    rsx! {
        button {
            class: if has_errors { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            onclick: move |_| dispatcher.send(AppEvent::ActivityLogToggled),
            title: "Activity log",
            if count > 0 {
                "{count}"
            } else {
                "Log"
            }
        }
    }
}
