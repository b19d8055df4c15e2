//! Events fed to the reducer.
//!
//! User intents come from components; completion events come back from the
//! [`Runtime`](crate::runtime::Runtime) after it executes an effect.

use api::{ApiError, Client, ClientId, Invoice, InvoiceId};
use store::StoreError;
use thiserror::Error;

use crate::state::{ClientField, InvoiceField, LoginField, RegisterField};

/// Why a login or registration did not produce a stored session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("registration failed: {0}")]
    Register(ApiError),
    #[error("login failed: {0}")]
    Login(ApiError),
    #[error("could not store session: {0}")]
    Storage(StoreError),
}

impl AuthFailure {
    /// Message for the auth form. `login_fallback` is used for a login step
    /// the server rejected without details.
    pub fn message(&self, login_fallback: &str) -> String {
        match self {
            Self::Register(e) => e.user_message("Registration failed"),
            Self::Login(e) => e.user_message(login_fallback),
            Self::Storage(e) => format!("Could not save your session: {e}"),
        }
    }
}

/// Per-invoice actions offered in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceAction {
    MarkPaid,
    Delete,
}

impl InvoiceAction {
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::MarkPaid => "Failed to update invoice",
            Self::Delete => "Failed to delete invoice",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The persisted session has been checked.
    Started { authenticated: bool },

    // Auth
    ShowLogin,
    ShowRegister,
    LoginEdited(LoginField, String),
    RegisterEdited(RegisterField, String),
    LoginSubmitted,
    RegisterSubmitted,
    LoginFinished(Result<(), AuthFailure>),
    RegisterFinished(Result<(), AuthFailure>),
    LogoutRequested,

    // Inactivity
    UserActivity,
    IdleCheck { generation: u64 },

    // Clients
    ClientsLoaded {
        epoch: u64,
        result: Result<Vec<Client>, ApiError>,
    },
    ClientSelected(ClientId),
    ClientEdited(ClientField, String),
    ClientSubmitted,
    ClientCreated {
        epoch: u64,
        result: Result<Client, ApiError>,
    },
    /// Load a client into the form for editing.
    ClientEditRequested(ClientId),
    ClientEditCancelled,
    ClientUpdated {
        epoch: u64,
        result: Result<Client, ApiError>,
    },
    ClientDeleteRequested(ClientId),
    ClientDeleted {
        epoch: u64,
        client_id: ClientId,
        result: Result<(), ApiError>,
    },

    // Invoices
    InvoicesLoaded {
        generation: u64,
        result: Result<Vec<Invoice>, ApiError>,
    },
    InvoiceEdited(InvoiceField, String),
    AmountBlurred,
    InvoiceSubmitted,
    InvoiceCreated {
        generation: u64,
        result: Result<Invoice, ApiError>,
    },
    InvoiceActionRequested(InvoiceId, InvoiceAction),
    InvoiceActionFinished {
        generation: u64,
        action: InvoiceAction,
        result: Result<(), ApiError>,
    },

    // Chrome
    AlertDismissed,
    ActivityLogToggled,
    ActivityLogCleared,
}
