//! # UI crate: the invoicing client's state machine and components
//!
//! The crate is split into a pure core and a thin Dioxus shell:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`state`] | [`AppState`]: screen, forms, client list, selection, invoices |
//! | [`events`] / [`effects`] | What can happen, and the I/O it asks for |
//! | [`reducer`] | `update(state, event, now) -> effects` |
//! | [`runtime`] | Executes effects against [`api::InvoiceApi`] and the session store |
//! | [`view`] | Render-ready text for client rows and invoice summaries |
//! | [`format`] | Phone, currency and capitalization formatters |
//! | [`inactivity`] | Idle-logout state machine and platform timers |
//!
//! Components read [`AppState`] from a signal and send [`AppEvent`]s through
//! the [`Dispatcher`] context; they never call the API themselves.

pub mod activity_log;
pub mod effects;
pub mod events;
pub mod format;
pub mod inactivity;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod view;

mod activity_log_panel;
mod app;
mod auth;
mod clients;
mod dispatcher;
mod invoices;
mod navbar;

pub use activity_log::{ActivityLog, LogEntry, LogLevel};
pub use app::InvoicerApp;
pub use dispatcher::{use_dispatcher, Dispatcher};
pub use effects::Effect;
pub use events::{AppEvent, AuthFailure, InvoiceAction};
pub use runtime::{Runtime, WebRuntime};
pub use state::{AppState, AuthView, Screen};
