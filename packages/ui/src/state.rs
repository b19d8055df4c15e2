//! # Application state
//!
//! [`AppState`] is the single value the UI renders from. It replaces the loose
//! globals a script would keep (client list, selection, token presence) and
//! also holds every form draft, so formatter binding, submission and failure
//! handling are plain data transformations.
//!
//! The bearer token itself is not here: it is owned by the runtime's
//! [`store::SessionStore`]. The state only knows which [`Screen`] is showing.
//!
//! Two counters guard against late responses:
//! - `epoch` changes on every logout; client-list responses carry the epoch
//!   they were requested under.
//! - `invoice_generation` changes on every selection change and logout;
//!   invoice responses carry the generation they were requested under.

use std::time::Duration;

use api::{Client, ClientId, Invoice, InvoiceStatus};

use crate::activity_log::ActivityLog;
use crate::format::{capitalize_first, format_currency, format_phone};
use crate::inactivity::InactivityMonitor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthView {
    #[default]
    Login,
    Register,
}

/// Which top-level view is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Startup, before the persisted session has been checked.
    Loading,
    Auth(AuthView),
    App,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientField {
    FirstName,
    LastName,
    Email,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceField {
    Amount,
    Description,
    DueDate,
    Status,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    pub fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterDraft {
    pub fn set(&mut self, field: RegisterField, value: String) {
        match field {
            RegisterField::FirstName => self.first_name = capitalize_first(&value),
            RegisterField::LastName => self.last_name = capitalize_first(&value),
            RegisterField::Email => self.email = value,
            RegisterField::Password => self.password = value,
            RegisterField::ConfirmPassword => self.confirm_password = value,
        }
    }

    /// `"<first> <last>"` with each part trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ClientDraft {
    pub fn set(&mut self, field: ClientField, value: String) {
        match field {
            ClientField::FirstName => self.first_name = capitalize_first(&value),
            ClientField::LastName => self.last_name = capitalize_first(&value),
            ClientField::Email => self.email = value,
            ClientField::Phone => self.phone = format_phone(&value),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Prefill from an existing client. The name splits at its first space.
    pub fn from_client(client: &Client) -> Self {
        let (first, last) = client
            .name
            .trim()
            .split_once(' ')
            .unwrap_or((client.name.trim(), ""));
        Self {
            first_name: first.to_string(),
            last_name: last.trim().to_string(),
            email: client.email.clone(),
            phone: client.phone.as_deref().map(format_phone).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceDraft {
    /// Displayed amount, `$`-prefixed.
    pub amount: String,
    pub description: String,
    /// `YYYY-MM-DD` from the date input, empty for none.
    pub due_date: String,
    pub status: InvoiceStatus,
}

impl InvoiceDraft {
    pub fn set(&mut self, field: InvoiceField, value: String) {
        match field {
            InvoiceField::Amount => self.amount = format_currency(&value),
            InvoiceField::Description => self.description = capitalize_first(&value),
            InvoiceField::DueDate => self.due_date = value,
            InvoiceField::Status => self.status = InvoiceStatus::from(value),
        }
    }
}

/// Login/registration forms and their messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForms {
    pub view: AuthView,
    pub login: LoginDraft,
    pub register: RegisterDraft,
    pub login_error: Option<String>,
    pub register_error: Option<String>,
    /// A login or registration request is in flight.
    pub busy: bool,
}

impl AuthForms {
    pub fn clear_errors(&mut self) {
        self.login_error = None;
        self.register_error = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    pub auth: AuthForms,
    pub clients: Vec<Client>,
    pub selected_client: Option<ClientId>,
    /// Invoices of the selected client; `None` until fetched.
    pub invoices: Option<Vec<Invoice>>,
    pub invoices_loading: bool,
    pub client_draft: ClientDraft,
    /// Client the draft is editing; `None` when the form adds a new one.
    pub editing_client: Option<ClientId>,
    pub invoice_draft: InvoiceDraft,
    /// Blocking message for the user, shown until dismissed.
    pub alert: Option<String>,
    pub activity: ActivityLog,
    pub monitor: InactivityMonitor,
    pub epoch: u64,
    pub invoice_generation: u64,
}

impl AppState {
    pub fn new(inactivity_threshold: Duration) -> Self {
        Self {
            screen: Screen::Loading,
            auth: AuthForms::default(),
            clients: Vec::new(),
            selected_client: None,
            invoices: None,
            invoices_loading: false,
            client_draft: ClientDraft::default(),
            editing_client: None,
            invoice_draft: InvoiceDraft::default(),
            alert: None,
            activity: ActivityLog::default(),
            monitor: InactivityMonitor::new(inactivity_threshold),
            epoch: 0,
            invoice_generation: 0,
        }
    }

    pub fn selected_client(&self) -> Option<&Client> {
        let id = self.selected_client?;
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn is_signed_in(&self) -> bool {
        self.screen == Screen::App
    }

    /// Forget everything tied to the current session.
    pub(crate) fn clear_session_data(&mut self) {
        self.epoch += 1;
        self.invoice_generation += 1;
        self.clients.clear();
        self.selected_client = None;
        self.invoices = None;
        self.invoices_loading = false;
        self.client_draft = ClientDraft::default();
        self.editing_client = None;
        self.invoice_draft = InvoiceDraft::default();
    }
}
