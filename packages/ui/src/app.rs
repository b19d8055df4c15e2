use dioxus::prelude::*;
use store::InvoicerConfig;

use crate::activity_log_panel::ActivityLogPanel;
use crate::auth::AuthScreen;
use crate::clients::{ClientForm, ClientList};
use crate::dispatcher::{make_runtime, use_dispatcher, Dispatcher};
use crate::events::AppEvent;
use crate::inactivity::{now_millis, Millis};
use crate::invoices::InvoicePanel;
use crate::navbar::Navbar;
use crate::state::{AppState, Screen};

const INVOICER_CSS: Asset = asset!("/assets/styling/invoicer.css");
const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

/// Built-in configuration, overridable at build time by editing the file.
const CONFIG_TOML: &str = include_str!("../invoicer.toml");

/// Minimum spacing between interaction events forwarded to the reducer.
const ACTIVITY_THROTTLE_MS: Millis = 1_000;

/// Root component: owns the state, provides the [`Dispatcher`] and picks the
/// screen.
#[component]
pub fn InvoicerApp() -> Element {
    let config = use_hook(|| InvoicerConfig::load_or_default(CONFIG_TOML));
    let state = use_signal(|| AppState::new(config.inactivity_threshold()));
    let dispatcher = use_context_provider(|| Dispatcher::new(state, make_runtime(&config)));

    use_effect({
        let dispatcher = dispatcher.clone();
        move || dispatcher.start()
    });

    let mut last_forwarded = use_signal(|| 0 as Millis);
    let on_activity = {
        let dispatcher = dispatcher.clone();
        move || {
            let now = now_millis();
            if now.saturating_sub(*last_forwarded.peek()) >= ACTIVITY_THROTTLE_MS {
                last_forwarded.set(now);
                dispatcher.send(AppEvent::UserActivity);
            }
        }
    };

    let screen = state.read().screen;

    rsx! {
        document::Stylesheet { href: INVOICER_CSS }
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        div {
            class: "invoicer",
            onmousemove: {
                let mut on_activity = on_activity.clone();
                move |_| on_activity()
            },
            onkeydown: {
                let mut on_activity = on_activity.clone();
                move |_| on_activity()
            },
            onclick: {
                let mut on_activity = on_activity.clone();
                move |_| on_activity()
            },
            onscroll: {
                let mut on_activity = on_activity.clone();
                move |_| on_activity()
            },
            onwheel: {
                let mut on_activity = on_activity.clone();
                move |_| on_activity()
            },

            AlertBanner {}
            match screen {
                Screen::Loading => rsx! { p { class: "placeholder", "Loading..." } },
                Screen::Auth(view) => rsx! { AuthScreen { view } },
                Screen::App => rsx! { Dashboard {} },
            }
            ActivityLogPanel {}
        }
    }
}

#[component]
fn Dashboard() -> Element {
    rsx! {
        Navbar {}
        main {
            class: "dashboard",
            div {
                class: "dashboard-clients",
                ClientList {}
                ClientForm {}
            }
            div {
                class: "dashboard-invoices",
                InvoicePanel {}
            }
        }
    }
}

/// Blocking message shown above every screen until dismissed.
#[component]
fn AlertBanner() -> Element {
    let dispatcher = use_dispatcher();
    let alert = dispatcher.state().read().alert.clone();

    let Some(message) = alert else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "alert",
            role: "alert",
            span { "{message}" }
            button {
                onclick: move |_| dispatcher.send(AppEvent::AlertDismissed),
                "OK"
            }
        }
    }
}
