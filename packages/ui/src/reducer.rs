//! Reducer (update function).
//!
//! All state mutations happen here. The dispatcher calls
//! `update(state, event, now)` and hands the returned effects to the runtime.

use std::time::Duration;

use api::{Credentials, NewClient, NewInvoice, Registration};
use chrono::NaiveDate;

use crate::activity_log::LogLevel;
use crate::effects::Effect;
use crate::events::{AppEvent, AuthFailure, InvoiceAction};
use crate::format::{capitalize_first, display_amount, finalize_currency, parse_amount};
use crate::inactivity::{IdleCheck, Millis};
use crate::state::{
    AppState, AuthView, ClientDraft, InvoiceDraft, LoginDraft, RegisterDraft, Screen,
};

pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const SELECT_CLIENT_FIRST: &str = "Select a client first";
pub const INACTIVITY_LOGOUT: &str = "You have been logged out due to inactivity.";

/// Apply `event` to `state` at time `now`, returning effects to execute.
pub fn update(state: &mut AppState, event: AppEvent, now: Millis) -> Vec<Effect> {
    match event {
        AppEvent::Started { authenticated } => {
            if authenticated {
                state.activity.push(now, LogLevel::Info, "Restored saved session");
                enter_app(state, now)
            } else {
                state.screen = Screen::Auth(AuthView::Login);
                vec![]
            }
        }

        AppEvent::ShowLogin => {
            show_auth_view(state, AuthView::Login);
            vec![]
        }
        AppEvent::ShowRegister => {
            show_auth_view(state, AuthView::Register);
            vec![]
        }
        AppEvent::LoginEdited(field, value) => {
            state.auth.login.set(field, value);
            vec![]
        }
        AppEvent::RegisterEdited(field, value) => {
            state.auth.register.set(field, value);
            vec![]
        }
        AppEvent::LoginSubmitted => submit_login(state),
        AppEvent::RegisterSubmitted => submit_registration(state),
        AppEvent::LoginFinished(result) => finish_auth(state, result, AuthView::Login, now),
        AppEvent::RegisterFinished(result) => finish_auth(state, result, AuthView::Register, now),
        AppEvent::LogoutRequested => {
            if !state.is_signed_in() {
                return vec![];
            }
            state.activity.push(now, LogLevel::Info, "Logged out");
            end_session(state)
        }

        AppEvent::UserActivity => {
            state.monitor.record_activity(now);
            vec![]
        }
        AppEvent::IdleCheck { generation } => match state.monitor.check(generation, now) {
            IdleCheck::Stale => vec![],
            IdleCheck::Remaining(ms) => vec![Effect::ScheduleIdleCheck {
                generation,
                after: Duration::from_millis(ms),
            }],
            IdleCheck::Expired => {
                alert(state, now, INACTIVITY_LOGOUT);
                end_session(state)
            }
        },

        AppEvent::ClientsLoaded { epoch, result } => {
            if epoch != state.epoch {
                return vec![];
            }
            match result {
                Ok(clients) => {
                    state.activity.push(
                        now,
                        LogLevel::Info,
                        format!("Loaded {} clients", clients.len()),
                    );
                    state.clients = clients;
                }
                Err(e) => alert(state, now, &e.user_message("Failed to load clients")),
            }
            vec![]
        }
        AppEvent::ClientSelected(client_id) => {
            if !state.is_signed_in() || !state.clients.iter().any(|c| c.id == client_id) {
                return vec![];
            }
            state.selected_client = Some(client_id);
            state.invoice_generation += 1;
            state.invoices = None;
            state.invoices_loading = true;
            vec![Effect::LoadInvoices {
                generation: state.invoice_generation,
                client_id,
            }]
        }
        AppEvent::ClientEdited(field, value) => {
            state.client_draft.set(field, value);
            vec![]
        }
        AppEvent::ClientSubmitted => {
            if !state.is_signed_in() {
                return vec![];
            }
            let draft = &state.client_draft;
            let client = NewClient {
                name: draft.full_name(),
                email: draft.email.trim().to_string(),
                phone: draft.phone.trim().to_string(),
            };
            let epoch = state.epoch;
            vec![match state.editing_client {
                Some(client_id) => Effect::UpdateClient {
                    epoch,
                    client_id,
                    client,
                },
                None => Effect::CreateClient { epoch, client },
            }]
        }
        AppEvent::ClientCreated { epoch, result } => {
            if epoch != state.epoch {
                return vec![];
            }
            match result {
                Ok(client) => {
                    state
                        .activity
                        .push(now, LogLevel::Success, format!("Added client {}", client.name));
                    state.clients.push(client);
                    state.client_draft = Default::default();
                }
                Err(e) => alert(state, now, &e.user_message("Failed to add client")),
            }
            vec![]
        }
        AppEvent::ClientEditRequested(client_id) => {
            let Some(client) = state.clients.iter().find(|c| c.id == client_id) else {
                return vec![];
            };
            state.client_draft = ClientDraft::from_client(client);
            state.editing_client = Some(client_id);
            vec![]
        }
        AppEvent::ClientEditCancelled => {
            state.editing_client = None;
            state.client_draft = ClientDraft::default();
            vec![]
        }
        AppEvent::ClientUpdated { epoch, result } => {
            if epoch != state.epoch {
                return vec![];
            }
            match result {
                Ok(client) => {
                    state
                        .activity
                        .push(now, LogLevel::Success, format!("Updated client {}", client.name));
                    if state.editing_client == Some(client.id) {
                        state.editing_client = None;
                        state.client_draft = ClientDraft::default();
                    }
                    if let Some(existing) = state.clients.iter_mut().find(|c| c.id == client.id) {
                        *existing = client;
                    }
                }
                Err(e) => alert(state, now, &e.user_message("Failed to update client")),
            }
            vec![]
        }
        AppEvent::ClientDeleteRequested(client_id) => {
            if !state.is_signed_in() || !state.clients.iter().any(|c| c.id == client_id) {
                return vec![];
            }
            vec![Effect::DeleteClient {
                epoch: state.epoch,
                client_id,
            }]
        }
        AppEvent::ClientDeleted {
            epoch,
            client_id,
            result,
        } => {
            if epoch != state.epoch {
                return vec![];
            }
            if let Err(e) = result {
                alert(state, now, &e.user_message("Failed to delete client"));
                return vec![];
            }
            state
                .activity
                .push(now, LogLevel::Success, format!("Deleted client #{client_id}"));
            state.clients.retain(|c| c.id != client_id);
            if state.selected_client == Some(client_id) {
                state.selected_client = None;
                state.invoice_generation += 1;
                state.invoices = None;
                state.invoices_loading = false;
                state.invoice_draft = InvoiceDraft::default();
            }
            if state.editing_client == Some(client_id) {
                state.editing_client = None;
                state.client_draft = ClientDraft::default();
            }
            vec![Effect::LoadClients { epoch }]
        }

        AppEvent::InvoicesLoaded { generation, result } => {
            if generation != state.invoice_generation {
                return vec![];
            }
            state.invoices_loading = false;
            match result {
                Ok(invoices) => {
                    state.activity.push(
                        now,
                        LogLevel::Info,
                        format!("Loaded {} invoices", invoices.len()),
                    );
                    state.invoices = Some(invoices);
                }
                Err(e) => alert(state, now, &e.user_message("Failed to load invoices")),
            }
            vec![]
        }
        AppEvent::InvoiceEdited(field, value) => {
            state.invoice_draft.set(field, value);
            vec![]
        }
        AppEvent::AmountBlurred => {
            state.invoice_draft.amount = finalize_currency(&state.invoice_draft.amount);
            vec![]
        }
        AppEvent::InvoiceSubmitted => submit_invoice(state, now),
        AppEvent::InvoiceCreated { generation, result } => {
            if generation != state.invoice_generation {
                return vec![];
            }
            match result {
                Ok(invoice) => {
                    state.activity.push(
                        now,
                        LogLevel::Success,
                        format!(
                            "Created invoice #{} for {}",
                            invoice.id,
                            display_amount(invoice.amount)
                        ),
                    );
                    state.invoice_draft = InvoiceDraft::default();
                    reload_invoices(state, generation)
                }
                Err(e) => {
                    alert(state, now, &e.user_message("Failed to add invoice"));
                    vec![]
                }
            }
        }
        AppEvent::InvoiceActionRequested(invoice_id, action) => {
            if state.selected_client.is_none() {
                return vec![];
            }
            let generation = state.invoice_generation;
            vec![match action {
                InvoiceAction::MarkPaid => Effect::MarkInvoicePaid {
                    generation,
                    invoice_id,
                },
                InvoiceAction::Delete => Effect::DeleteInvoice {
                    generation,
                    invoice_id,
                },
            }]
        }
        AppEvent::InvoiceActionFinished {
            generation,
            action,
            result,
        } => {
            if generation != state.invoice_generation {
                return vec![];
            }
            match result {
                Ok(()) => reload_invoices(state, generation),
                Err(e) => {
                    alert(state, now, &e.user_message(action.fallback_message()));
                    vec![]
                }
            }
        }

        AppEvent::AlertDismissed => {
            state.alert = None;
            vec![]
        }
        AppEvent::ActivityLogToggled => {
            state.activity.visible = !state.activity.visible;
            vec![]
        }
        AppEvent::ActivityLogCleared => {
            state.activity.entries.clear();
            vec![]
        }
    }
}

fn show_auth_view(state: &mut AppState, view: AuthView) {
    state.auth.view = view;
    state.auth.clear_errors();
    if matches!(state.screen, Screen::Auth(_)) {
        state.screen = Screen::Auth(view);
    }
}

fn submit_login(state: &mut AppState) -> Vec<Effect> {
    if state.auth.busy || state.is_signed_in() {
        return vec![];
    }
    state.auth.login_error = None;
    state.auth.busy = true;
    let draft = &state.auth.login;
    vec![Effect::Login(Credentials {
        email: draft.email.trim().to_string(),
        password: draft.password.clone(),
    })]
}

fn submit_registration(state: &mut AppState) -> Vec<Effect> {
    if state.auth.busy || state.is_signed_in() {
        return vec![];
    }
    state.auth.register_error = None;
    let draft = &state.auth.register;
    if draft.password != draft.confirm_password {
        state.auth.register_error = Some(PASSWORD_MISMATCH.to_string());
        return vec![];
    }
    let registration = Registration {
        name: draft.full_name(),
        email: draft.email.trim().to_string(),
        password: draft.password.clone(),
    };
    state.auth.busy = true;
    vec![Effect::Register(registration)]
}

fn finish_auth(
    state: &mut AppState,
    result: Result<(), AuthFailure>,
    flow: AuthView,
    now: Millis,
) -> Vec<Effect> {
    state.auth.busy = false;
    match (result, flow) {
        (Ok(()), AuthView::Login) => {
            state.auth.login = LoginDraft::default();
            state.activity.push(now, LogLevel::Success, "Logged in");
            enter_app(state, now)
        }
        (Ok(()), AuthView::Register) => {
            state.auth.register = RegisterDraft::default();
            state.auth.view = AuthView::Login;
            state.activity.push(now, LogLevel::Success, "Registered and logged in");
            enter_app(state, now)
        }
        (Err(failure), AuthView::Login) => {
            let message = failure.message("Login failed");
            state.activity.push(now, LogLevel::Error, message.clone());
            state.auth.login_error = Some(message);
            vec![]
        }
        (Err(failure), AuthView::Register) => {
            let message = failure.message("Auto login failed");
            state.activity.push(now, LogLevel::Error, message.clone());
            state.auth.register_error = Some(message);
            vec![]
        }
    }
}

/// Show the app, arm the monitor, and load the client list.
fn enter_app(state: &mut AppState, now: Millis) -> Vec<Effect> {
    state.screen = Screen::App;
    state.auth.clear_errors();
    let mut effects = vec![Effect::LoadClients { epoch: state.epoch }];
    if let Some(generation) = state.monitor.arm(now) {
        effects.push(Effect::ScheduleIdleCheck {
            generation,
            after: Duration::from_millis(state.monitor.threshold()),
        });
    }
    effects
}

fn end_session(state: &mut AppState) -> Vec<Effect> {
    state.monitor.disarm();
    state.clear_session_data();
    state.auth.view = AuthView::Login;
    state.auth.busy = false;
    state.auth.clear_errors();
    state.screen = Screen::Auth(AuthView::Login);
    vec![Effect::EndSession]
}

fn submit_invoice(state: &mut AppState, now: Millis) -> Vec<Effect> {
    let Some(client_id) = state.selected_client else {
        alert(state, now, SELECT_CLIENT_FIRST);
        return vec![];
    };
    let draft = &state.invoice_draft;
    let amount = match parse_amount(&draft.amount) {
        Ok(amount) => amount,
        Err(e) => {
            alert(state, now, &e.to_string());
            return vec![];
        }
    };
    let due_date = match draft.due_date.trim() {
        "" => None,
        text => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                alert(state, now, "Enter a valid due date.");
                return vec![];
            }
        },
    };
    let description = capitalize_first(draft.description.trim());
    state.invoice_draft.description = description.clone();

    let invoice = NewInvoice {
        client_id,
        amount,
        description,
        due_date,
        status: state.invoice_draft.status.clone(),
    };
    vec![Effect::CreateInvoice {
        generation: state.invoice_generation,
        invoice,
    }]
}

/// Authoritative refresh of the selected client's invoices, unless the
/// selection moved on since `generation`.
fn reload_invoices(state: &mut AppState, generation: u64) -> Vec<Effect> {
    match state.selected_client {
        Some(client_id) if generation == state.invoice_generation => {
            state.invoices_loading = true;
            vec![Effect::LoadInvoices {
                generation,
                client_id,
            }]
        }
        _ => vec![],
    }
}

fn alert(state: &mut AppState, now: Millis, message: &str) {
    state.activity.push(now, LogLevel::Error, message);
    state.alert = Some(message.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{ApiError, Client, Invoice, InvoiceStatus};
    use rust_decimal::Decimal;

    use crate::state::{ClientField, InvoiceField, LoginField, RegisterField};

    const MINUTE: Millis = 60_000;

    fn signed_in() -> AppState {
        let mut state = AppState::new(Duration::from_secs(20 * 60));
        update(&mut state, AppEvent::Started { authenticated: true }, 0);
        let epoch = state.epoch;
        update(
            &mut state,
            AppEvent::ClientsLoaded {
                epoch,
                result: Ok(vec![client(7, "Jo Lin"), client(8, "Sam Roe")]),
            },
            0,
        );
        state
    }

    fn client(id: i64, name: &str) -> Client {
        Client {
            id,
            name: name.into(),
            email: format!("{id}@example.com"),
            phone: None,
        }
    }

    fn invoice(id: i64, client_id: i64) -> Invoice {
        Invoice {
            id,
            client_id,
            amount: Decimal::new(1250, 2),
            description: None,
            due_date: None,
            status: InvoiceStatus::Unpaid,
        }
    }

    #[test]
    fn test_started_without_token_shows_login() {
        let mut state = AppState::new(Duration::from_secs(60));
        let effects = update(&mut state, AppEvent::Started { authenticated: false }, 0);
        assert!(effects.is_empty());
        assert_eq!(state.screen, Screen::Auth(AuthView::Login));
    }

    #[test]
    fn test_started_with_token_loads_clients_and_arms_monitor() {
        let mut state = AppState::new(Duration::from_secs(60));
        let effects = update(&mut state, AppEvent::Started { authenticated: true }, 0);
        assert_eq!(state.screen, Screen::App);
        assert!(state.monitor.is_armed());
        assert_eq!(
            effects,
            vec![
                Effect::LoadClients { epoch: 0 },
                Effect::ScheduleIdleCheck {
                    generation: state.monitor.generation(),
                    after: Duration::from_secs(60),
                },
            ]
        );
    }

    #[test]
    fn test_login_submit_trims_email_and_blocks_double_submit() {
        let mut state = AppState::new(Duration::from_secs(60));
        update(&mut state, AppEvent::Started { authenticated: false }, 0);
        update(&mut state, AppEvent::LoginEdited(LoginField::Email, " a@b.com ".into()), 0);
        update(&mut state, AppEvent::LoginEdited(LoginField::Password, "pw".into()), 0);

        let effects = update(&mut state, AppEvent::LoginSubmitted, 0);
        assert_eq!(
            effects,
            vec![Effect::Login(Credentials {
                email: "a@b.com".into(),
                password: "pw".into(),
            })]
        );
        assert!(update(&mut state, AppEvent::LoginSubmitted, 0).is_empty());
    }

    #[test]
    fn test_login_failure_shows_server_message() {
        let mut state = AppState::new(Duration::from_secs(60));
        update(&mut state, AppEvent::Started { authenticated: false }, 0);
        update(&mut state, AppEvent::LoginSubmitted, 0);
        let failure = AuthFailure::Login(ApiError::Rejected {
            status: 401,
            message: Some("Invalid credentials".into()),
        });
        update(&mut state, AppEvent::LoginFinished(Err(failure)), 0);

        assert_eq!(state.screen, Screen::Auth(AuthView::Login));
        assert_eq!(state.auth.login_error.as_deref(), Some("Invalid credentials"));
        assert!(!state.auth.busy);
    }

    #[test]
    fn test_password_mismatch_makes_no_request() {
        let mut state = AppState::new(Duration::from_secs(60));
        update(&mut state, AppEvent::Started { authenticated: false }, 0);
        update(&mut state, AppEvent::ShowRegister, 0);
        update(&mut state, AppEvent::RegisterEdited(RegisterField::Password, "a".into()), 0);
        update(
            &mut state,
            AppEvent::RegisterEdited(RegisterField::ConfirmPassword, "b".into()),
            0,
        );

        assert!(update(&mut state, AppEvent::RegisterSubmitted, 0).is_empty());
        assert_eq!(state.auth.register_error.as_deref(), Some(PASSWORD_MISMATCH));
        assert_eq!(state.screen, Screen::Auth(AuthView::Register));
    }

    #[test]
    fn test_register_submits_full_name() {
        let mut state = AppState::new(Duration::from_secs(60));
        update(&mut state, AppEvent::Started { authenticated: false }, 0);
        for (field, value) in [
            (RegisterField::FirstName, "ada"),
            (RegisterField::LastName, "lovelace"),
            (RegisterField::Email, "ada@example.com"),
            (RegisterField::Password, "pw"),
            (RegisterField::ConfirmPassword, "pw"),
        ] {
            update(&mut state, AppEvent::RegisterEdited(field, value.into()), 0);
        }

        let effects = update(&mut state, AppEvent::RegisterSubmitted, 0);
        assert_eq!(
            effects,
            vec![Effect::Register(Registration {
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                password: "pw".into(),
            })]
        );
    }

    #[test]
    fn test_auto_login_failure_after_register() {
        let mut state = AppState::new(Duration::from_secs(60));
        update(&mut state, AppEvent::Started { authenticated: false }, 0);
        update(&mut state, AppEvent::ShowRegister, 0);
        let failure = AuthFailure::Login(ApiError::Rejected {
            status: 500,
            message: None,
        });
        update(&mut state, AppEvent::RegisterFinished(Err(failure)), 0);
        assert_eq!(state.auth.register_error.as_deref(), Some("Auto login failed"));
    }

    #[test]
    fn test_select_client_requests_invoices_once() {
        let mut state = signed_in();
        let effects = update(&mut state, AppEvent::ClientSelected(7), 0);

        assert_eq!(
            effects,
            vec![Effect::LoadInvoices {
                generation: state.invoice_generation,
                client_id: 7,
            }]
        );
        assert_eq!(state.selected_client().map(|c| c.name.as_str()), Some("Jo Lin"));
        assert!(state.invoices_loading);
    }

    #[test]
    fn test_select_unknown_client_is_ignored() {
        let mut state = signed_in();
        assert!(update(&mut state, AppEvent::ClientSelected(99), 0).is_empty());
        assert!(state.selected_client.is_none());
    }

    #[test]
    fn test_stale_invoice_response_is_dropped() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let first = state.invoice_generation;
        update(&mut state, AppEvent::ClientSelected(8), 0);

        update(
            &mut state,
            AppEvent::InvoicesLoaded {
                generation: first,
                result: Ok(vec![invoice(1, 7)]),
            },
            0,
        );
        assert!(state.invoices.is_none());
        assert!(state.invoices_loading);

        let current = state.invoice_generation;
        update(
            &mut state,
            AppEvent::InvoicesLoaded {
                generation: current,
                result: Ok(vec![invoice(2, 8)]),
            },
            0,
        );
        assert_eq!(state.invoices.as_ref().map(Vec::len), Some(1));
        assert!(!state.invoices_loading);
    }

    #[test]
    fn test_failed_client_load_keeps_list() {
        let mut state = signed_in();
        let epoch = state.epoch;
        update(
            &mut state,
            AppEvent::ClientsLoaded {
                epoch,
                result: Err(ApiError::Rejected {
                    status: 500,
                    message: None,
                }),
            },
            0,
        );
        assert_eq!(state.clients.len(), 2);
        assert_eq!(state.alert.as_deref(), Some("Failed to load clients"));
        assert!(state.activity.has_errors());
    }

    #[test]
    fn test_client_submit_and_create() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientEdited(ClientField::FirstName, "kim".into()), 0);
        update(&mut state, AppEvent::ClientEdited(ClientField::LastName, "park".into()), 0);
        update(&mut state, AppEvent::ClientEdited(ClientField::Email, "k@p.com".into()), 0);
        update(&mut state, AppEvent::ClientEdited(ClientField::Phone, "5551234567".into()), 0);

        let effects = update(&mut state, AppEvent::ClientSubmitted, 0);
        assert_eq!(
            effects,
            vec![Effect::CreateClient {
                epoch: state.epoch,
                client: NewClient {
                    name: "Kim Park".into(),
                    email: "k@p.com".into(),
                    phone: "(555)123-4567".into(),
                },
            }]
        );

        let epoch = state.epoch;
        update(
            &mut state,
            AppEvent::ClientCreated {
                epoch,
                result: Ok(client(9, "Kim Park")),
            },
            0,
        );
        assert_eq!(state.clients.len(), 3);
        assert_eq!(state.client_draft, Default::default());
    }

    #[test]
    fn test_failed_client_create_keeps_draft() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientEdited(ClientField::FirstName, "kim".into()), 0);
        let epoch = state.epoch;
        update(
            &mut state,
            AppEvent::ClientCreated {
                epoch,
                result: Err(ApiError::Rejected {
                    status: 400,
                    message: Some("Email already used".into()),
                }),
            },
            0,
        );
        assert_eq!(state.client_draft.first_name, "Kim");
        assert_eq!(state.alert.as_deref(), Some("Email already used"));
    }

    #[test]
    fn test_edit_client_submits_update() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientEditRequested(8), 0);
        assert_eq!(state.editing_client, Some(8));
        assert_eq!(state.client_draft.first_name, "Sam");
        assert_eq!(state.client_draft.last_name, "Roe");
        update(
            &mut state,
            AppEvent::ClientEdited(ClientField::Email, "sam@roe.dev".into()),
            0,
        );

        let epoch = state.epoch;
        let effects = update(&mut state, AppEvent::ClientSubmitted, 0);
        assert_eq!(
            effects,
            vec![Effect::UpdateClient {
                epoch,
                client_id: 8,
                client: NewClient {
                    name: "Sam Roe".into(),
                    email: "sam@roe.dev".into(),
                    phone: String::new(),
                },
            }]
        );

        let mut updated = client(8, "Sam Roe");
        updated.email = "sam@roe.dev".into();
        update(
            &mut state,
            AppEvent::ClientUpdated {
                epoch,
                result: Ok(updated),
            },
            0,
        );
        assert_eq!(state.clients.len(), 2);
        assert_eq!(state.clients[1].email, "sam@roe.dev");
        assert_eq!(state.editing_client, None);
        assert_eq!(state.client_draft, ClientDraft::default());
    }

    #[test]
    fn test_cancel_edit_returns_to_add_mode() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientEditRequested(7), 0);
        update(&mut state, AppEvent::ClientEditCancelled, 0);
        assert_eq!(state.editing_client, None);

        let effects = update(&mut state, AppEvent::ClientSubmitted, 0);
        assert!(matches!(effects[..], [Effect::CreateClient { .. }]));
    }

    #[test]
    fn test_failed_client_update_keeps_edit() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientEditRequested(7), 0);
        let epoch = state.epoch;
        update(
            &mut state,
            AppEvent::ClientUpdated {
                epoch,
                result: Err(ApiError::Rejected {
                    status: 404,
                    message: None,
                }),
            },
            0,
        );
        assert_eq!(state.alert.as_deref(), Some("Failed to update client"));
        assert_eq!(state.editing_client, Some(7));
        assert_eq!(state.clients[0].name, "Jo Lin");
    }

    #[test]
    fn test_deleting_selected_client_clears_invoices() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let stale = state.invoice_generation;
        let epoch = state.epoch;

        let effects = update(&mut state, AppEvent::ClientDeleteRequested(7), 0);
        assert_eq!(effects, vec![Effect::DeleteClient { epoch, client_id: 7 }]);

        let effects = update(
            &mut state,
            AppEvent::ClientDeleted {
                epoch,
                client_id: 7,
                result: Ok(()),
            },
            0,
        );
        assert_eq!(effects, vec![Effect::LoadClients { epoch }]);
        assert_eq!(state.selected_client, None);
        assert_eq!(state.invoices, None);
        assert!(!state.invoices_loading);
        assert!(state.clients.iter().all(|c| c.id != 7));

        update(
            &mut state,
            AppEvent::InvoicesLoaded {
                generation: stale,
                result: Ok(vec![invoice(1, 7)]),
            },
            0,
        );
        assert_eq!(state.invoices, None);
    }

    #[test]
    fn test_deleting_other_client_keeps_selection() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let generation = state.invoice_generation;
        let epoch = state.epoch;
        update(
            &mut state,
            AppEvent::ClientDeleted {
                epoch,
                client_id: 8,
                result: Ok(()),
            },
            0,
        );
        assert_eq!(state.selected_client, Some(7));
        assert_eq!(state.invoice_generation, generation);
    }

    #[test]
    fn test_failed_client_delete_alerts() {
        let mut state = signed_in();
        let epoch = state.epoch;
        let effects = update(
            &mut state,
            AppEvent::ClientDeleted {
                epoch,
                client_id: 7,
                result: Err(ApiError::Transport("offline".into())),
            },
            0,
        );
        assert!(effects.is_empty());
        assert_eq!(state.clients.len(), 2);
        assert_eq!(state.alert.as_deref(), Some(api::NETWORK_ERROR_MESSAGE));
    }

    #[test]
    fn test_client_delete_after_logout_is_ignored() {
        let mut state = signed_in();
        let epoch = state.epoch;
        update(&mut state, AppEvent::LogoutRequested, 0);
        let effects = update(
            &mut state,
            AppEvent::ClientDeleted {
                epoch,
                client_id: 7,
                result: Err(ApiError::Transport("offline".into())),
            },
            0,
        );
        assert!(effects.is_empty());
        assert_eq!(state.alert, None);
    }

    #[test]
    fn test_invoice_without_selection_alerts() {
        let mut state = signed_in();
        update(&mut state, AppEvent::InvoiceEdited(InvoiceField::Amount, "10".into()), 0);
        assert!(update(&mut state, AppEvent::InvoiceSubmitted, 0).is_empty());
        assert_eq!(state.alert.as_deref(), Some(SELECT_CLIENT_FIRST));
    }

    #[test]
    fn test_invoice_submit_builds_request() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        update(&mut state, AppEvent::InvoiceEdited(InvoiceField::Amount, "1234.5".into()), 0);
        update(&mut state, AppEvent::AmountBlurred, 0);
        assert_eq!(state.invoice_draft.amount, "$1234.50");
        update(
            &mut state,
            AppEvent::InvoiceEdited(InvoiceField::Description, "  logo work ".into()),
            0,
        );
        update(
            &mut state,
            AppEvent::InvoiceEdited(InvoiceField::DueDate, "2024-03-01".into()),
            0,
        );

        let effects = update(&mut state, AppEvent::InvoiceSubmitted, 0);
        assert_eq!(
            effects,
            vec![Effect::CreateInvoice {
                generation: state.invoice_generation,
                invoice: NewInvoice {
                    client_id: 7,
                    amount: Decimal::new(123450, 2),
                    description: "Logo work".into(),
                    due_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                    status: InvoiceStatus::Unpaid,
                },
            }]
        );
    }

    #[test]
    fn test_invoice_with_bad_input_makes_no_request() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        assert!(update(&mut state, AppEvent::InvoiceSubmitted, 0).is_empty());
        assert_eq!(state.alert.as_deref(), Some("Enter an amount."));

        update(&mut state, AppEvent::InvoiceEdited(InvoiceField::Amount, "5".into()), 0);
        update(
            &mut state,
            AppEvent::InvoiceEdited(InvoiceField::DueDate, "next week".into()),
            0,
        );
        assert!(update(&mut state, AppEvent::InvoiceSubmitted, 0).is_empty());
        assert_eq!(state.alert.as_deref(), Some("Enter a valid due date."));
    }

    #[test]
    fn test_created_invoice_reloads_list() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let generation = state.invoice_generation;
        let effects = update(
            &mut state,
            AppEvent::InvoiceCreated {
                generation,
                result: Ok(invoice(3, 7)),
            },
            0,
        );
        assert_eq!(
            effects,
            vec![Effect::LoadInvoices {
                generation,
                client_id: 7,
            }]
        );
        assert_eq!(state.invoice_draft, InvoiceDraft::default());
    }

    #[test]
    fn test_rejected_invoice_keeps_session() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let generation = state.invoice_generation;
        let effects = update(
            &mut state,
            AppEvent::InvoiceCreated {
                generation,
                result: Err(ApiError::Rejected {
                    status: 404,
                    message: Some("Client not found".into()),
                }),
            },
            0,
        );
        assert!(effects.is_empty());
        assert_eq!(state.screen, Screen::App);
        assert_eq!(state.alert.as_deref(), Some("Client not found"));
    }

    #[test]
    fn test_invoice_actions() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let generation = state.invoice_generation;

        let effects = update(
            &mut state,
            AppEvent::InvoiceActionRequested(3, InvoiceAction::MarkPaid),
            0,
        );
        assert_eq!(
            effects,
            vec![Effect::MarkInvoicePaid {
                generation,
                invoice_id: 3,
            }]
        );

        let effects = update(
            &mut state,
            AppEvent::InvoiceActionFinished {
                generation,
                action: InvoiceAction::Delete,
                result: Err(ApiError::Transport("offline".into())),
            },
            0,
        );
        assert!(effects.is_empty());
        assert_eq!(state.alert.as_deref(), Some(api::NETWORK_ERROR_MESSAGE));
    }

    #[test]
    fn test_created_invoice_for_previous_selection_keeps_new_draft() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let for_jo = state.invoice_generation;
        update(&mut state, AppEvent::ClientSelected(8), 0);
        update(
            &mut state,
            AppEvent::InvoiceEdited(InvoiceField::Description, "draft for sam".into()),
            0,
        );
        let log_len = state.activity.entries.len();

        let effects = update(
            &mut state,
            AppEvent::InvoiceCreated {
                generation: for_jo,
                result: Ok(invoice(3, 7)),
            },
            0,
        );
        assert!(effects.is_empty());
        assert_eq!(state.invoice_draft.description, "Draft for sam");
        assert_eq!(state.activity.entries.len(), log_len);
    }

    #[test]
    fn test_invoice_failure_after_logout_is_silent() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let generation = state.invoice_generation;
        update(&mut state, AppEvent::LogoutRequested, 0);

        let effects = update(
            &mut state,
            AppEvent::InvoiceCreated {
                generation,
                result: Err(ApiError::Rejected {
                    status: 404,
                    message: Some("Client not found".into()),
                }),
            },
            0,
        );
        assert!(effects.is_empty());
        assert_eq!(state.alert, None);
        assert_eq!(state.screen, Screen::Auth(AuthView::Login));
    }

    #[test]
    fn test_invoice_action_after_logout_is_silent() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let generation = state.invoice_generation;
        update(
            &mut state,
            AppEvent::InvoiceActionRequested(3, InvoiceAction::MarkPaid),
            0,
        );
        update(&mut state, AppEvent::LogoutRequested, 0);

        let effects = update(
            &mut state,
            AppEvent::InvoiceActionFinished {
                generation,
                action: InvoiceAction::MarkPaid,
                result: Err(ApiError::Rejected {
                    status: 404,
                    message: Some("Invoice not found".into()),
                }),
            },
            0,
        );
        assert!(effects.is_empty());
        assert_eq!(state.alert, None);
    }

    #[test]
    fn test_invoice_action_for_previous_selection_is_dropped() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let for_jo = state.invoice_generation;
        update(&mut state, AppEvent::ClientSelected(8), 0);

        let effects = update(
            &mut state,
            AppEvent::InvoiceActionFinished {
                generation: for_jo,
                action: InvoiceAction::Delete,
                result: Ok(()),
            },
            0,
        );
        assert!(effects.is_empty());
        assert!(state.invoices_loading);
        assert_eq!(state.selected_client, Some(8));
    }

    #[test]
    fn test_created_invoice_log_rounds_amount() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let generation = state.invoice_generation;
        let mut created = invoice(3, 7);
        created.amount = Decimal::new(129, 3);
        update(
            &mut state,
            AppEvent::InvoiceCreated {
                generation,
                result: Ok(created),
            },
            0,
        );
        let entry = state.activity.entries.last().unwrap();
        assert_eq!(entry.message, "Created invoice #3 for $0.13");
    }

    #[test]
    fn test_logout_clears_session_data() {
        let mut state = signed_in();
        update(&mut state, AppEvent::ClientSelected(7), 0);
        let old_epoch = state.epoch;

        let effects = update(&mut state, AppEvent::LogoutRequested, 0);
        assert_eq!(effects, vec![Effect::EndSession]);
        assert_eq!(state.screen, Screen::Auth(AuthView::Login));
        assert!(state.clients.is_empty());
        assert!(state.selected_client.is_none());
        assert!(!state.monitor.is_armed());

        update(
            &mut state,
            AppEvent::ClientsLoaded {
                epoch: old_epoch,
                result: Ok(vec![client(7, "Jo Lin")]),
            },
            0,
        );
        assert!(state.clients.is_empty());
    }

    #[test]
    fn test_idle_expiry_logs_out_once() {
        let mut state = signed_in();
        let generation = state.monitor.generation();

        let effects = update(&mut state, AppEvent::IdleCheck { generation }, 20 * MINUTE);
        assert_eq!(effects, vec![Effect::EndSession]);
        assert_eq!(state.alert.as_deref(), Some(INACTIVITY_LOGOUT));
        assert_eq!(state.screen, Screen::Auth(AuthView::Login));

        assert!(update(&mut state, AppEvent::IdleCheck { generation }, 40 * MINUTE).is_empty());
    }

    #[test]
    fn test_activity_reschedules_idle_check() {
        let mut state = signed_in();
        let generation = state.monitor.generation();
        update(&mut state, AppEvent::UserActivity, 5 * MINUTE);

        let effects = update(&mut state, AppEvent::IdleCheck { generation }, 20 * MINUTE);
        assert_eq!(
            effects,
            vec![Effect::ScheduleIdleCheck {
                generation,
                after: Duration::from_millis(5 * MINUTE),
            }]
        );
        assert_eq!(state.screen, Screen::App);
    }
}
