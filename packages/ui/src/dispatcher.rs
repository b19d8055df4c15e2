//! Glue between components, the reducer and the runtime.

use std::rc::Rc;

use api::HttpApi;
use dioxus::prelude::*;
use store::{InvoicerConfig, SessionStore};

use crate::effects::Effect;
use crate::events::AppEvent;
use crate::inactivity::now_millis;
use crate::reducer::update;
use crate::runtime::{Runtime, WebRuntime};
use crate::state::AppState;

/// Sends events into the reducer and runs the effects it returns.
///
/// Provided as context by [`InvoicerApp`](crate::InvoicerApp); components get
/// it through [`use_dispatcher`].
#[derive(Clone)]
pub struct Dispatcher {
    state: Signal<AppState>,
    runtime: Rc<WebRuntime>,
}

impl Dispatcher {
    pub fn new(state: Signal<AppState>, runtime: WebRuntime) -> Self {
        Self {
            state,
            runtime: Rc::new(runtime),
        }
    }

    pub fn state(&self) -> Signal<AppState> {
        self.state
    }

    /// Check the persisted session and enter the matching screen.
    pub fn start(&self) {
        self.send(self.runtime.start());
    }

    pub fn send(&self, event: AppEvent) {
        let now = now_millis();
        let mut state = self.state;
        let effects = state.with_mut(|s| update(s, event, now));
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: Effect) {
        if effect.is_immediate() {
            // Storage is cleared before the next event is handled; only the
            // server-side revocation is left to run in the background.
            if let Some(revoke) = self.runtime.end_session() {
                self.spawn(revoke);
            }
            return;
        }
        self.spawn(effect);
    }

    fn spawn(&self, effect: Effect) {
        let this = self.clone();
        // Not tied to the component that sent the event: the form that
        // submitted a request may be gone by the time the response arrives.
        spawn_forever(async move {
            if let Some(event) = this.runtime.execute(effect).await {
                this.send(event);
            }
        });
    }
}

pub fn use_dispatcher() -> Dispatcher {
    use_context::<Dispatcher>()
}

/// Build the runtime for this platform from `config`.
pub fn make_runtime(config: &InvoicerConfig) -> WebRuntime {
    let api = HttpApi::new(config.base_url());

    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    let storage = store::LocalStore::new();
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    let storage = store::MemoryStore::new();

    Runtime::new(api, SessionStore::new(storage, config.session.token_key.clone()))
}
