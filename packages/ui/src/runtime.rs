//! Effect runtime.
//!
//! [`Runtime`] is the only place that talks to the backend or the session
//! store. It executes an [`Effect`] and hands back the event the reducer
//! should see next. The bearer token never leaves it: authenticated calls
//! read the token from the [`SessionStore`] at the moment they are made.

use std::cell::RefCell;

use api::{ApiError, Credentials, InvoiceApi, InvoiceStatus, Registration};
use store::{KeyValueStore, SessionStore, StoreError};

use crate::effects::Effect;
use crate::events::{AppEvent, AuthFailure, InvoiceAction};
use crate::inactivity::sleep;

/// Runtime used by the browser build.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type WebRuntime = Runtime<api::HttpApi, store::LocalStore>;

/// Runtime used off the browser (previews, tests).
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type WebRuntime = Runtime<api::HttpApi, store::MemoryStore>;

pub struct Runtime<A: InvoiceApi, S: KeyValueStore> {
    api: A,
    session: RefCell<SessionStore<S>>,
}

impl<A: InvoiceApi, S: KeyValueStore> Runtime<A, S> {
    pub fn new(api: A, session: SessionStore<S>) -> Self {
        Self {
            api,
            session: RefCell::new(session),
        }
    }

    /// Load the persisted session. Returns the event that starts the app.
    pub fn start(&self) -> AppEvent {
        let authenticated = self.session.borrow_mut().hydrate().is_some();
        tracing::info!(authenticated, "Session checked");
        AppEvent::Started { authenticated }
    }

    /// Clear the session synchronously. Returns the revocation to run
    /// afterwards, if a token was held.
    pub fn end_session(&self) -> Option<Effect> {
        let mut session = self.session.borrow_mut();
        let token = session.token().map(str::to_owned);
        if let Err(e) = session.clear() {
            tracing::warn!("Could not clear persisted session: {e}");
        }
        token.map(Effect::RevokeToken)
    }

    /// Execute one effect and return the resulting event, if any.
    pub async fn execute(&self, effect: Effect) -> Option<AppEvent> {
        match effect {
            Effect::Login(credentials) => {
                let result = self.login(&credentials).await;
                Some(AppEvent::LoginFinished(result))
            }
            Effect::Register(registration) => {
                let result = self.register(&registration).await;
                Some(AppEvent::RegisterFinished(result))
            }
            Effect::EndSession => {
                if let Some(Effect::RevokeToken(token)) = self.end_session() {
                    self.revoke(&token).await;
                }
                None
            }
            Effect::RevokeToken(token) => {
                self.revoke(&token).await;
                None
            }

            Effect::LoadClients { epoch } => {
                let result = match self.token() {
                    Ok(token) => self.api.list_clients(&token).await,
                    Err(e) => Err(e),
                };
                Some(AppEvent::ClientsLoaded { epoch, result })
            }
            Effect::CreateClient { epoch, client } => {
                let result = match self.token() {
                    Ok(token) => self.api.create_client(&token, &client).await,
                    Err(e) => Err(e),
                };
                Some(AppEvent::ClientCreated { epoch, result })
            }
            Effect::UpdateClient {
                epoch,
                client_id,
                client,
            } => {
                let result = match self.token() {
                    Ok(token) => self.api.update_client(&token, client_id, &client).await,
                    Err(e) => Err(e),
                };
                Some(AppEvent::ClientUpdated { epoch, result })
            }
            Effect::DeleteClient { epoch, client_id } => {
                let result = match self.token() {
                    Ok(token) => self.api.delete_client(&token, client_id).await,
                    Err(e) => Err(e),
                };
                Some(AppEvent::ClientDeleted {
                    epoch,
                    client_id,
                    result,
                })
            }

            Effect::LoadInvoices {
                generation,
                client_id,
            } => {
                let result = match self.token() {
                    Ok(token) => self.api.list_invoices(&token, client_id).await,
                    Err(e) => Err(e),
                };
                Some(AppEvent::InvoicesLoaded { generation, result })
            }
            Effect::CreateInvoice {
                generation,
                invoice,
            } => {
                let result = match self.token() {
                    Ok(token) => self.api.create_invoice(&token, &invoice).await,
                    Err(e) => Err(e),
                };
                Some(AppEvent::InvoiceCreated { generation, result })
            }
            Effect::MarkInvoicePaid {
                generation,
                invoice_id,
            } => {
                let result = match self.token() {
                    Ok(token) => self
                        .api
                        .update_invoice_status(&token, invoice_id, &InvoiceStatus::Paid)
                        .await
                        .map(|_| ()),
                    Err(e) => Err(e),
                };
                Some(AppEvent::InvoiceActionFinished {
                    generation,
                    action: InvoiceAction::MarkPaid,
                    result,
                })
            }
            Effect::DeleteInvoice {
                generation,
                invoice_id,
            } => {
                let result = match self.token() {
                    Ok(token) => self.api.delete_invoice(&token, invoice_id).await,
                    Err(e) => Err(e),
                };
                Some(AppEvent::InvoiceActionFinished {
                    generation,
                    action: InvoiceAction::Delete,
                    result,
                })
            }

            Effect::ScheduleIdleCheck { generation, after } => {
                sleep(after).await;
                Some(AppEvent::IdleCheck { generation })
            }
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), AuthFailure> {
        let response = self
            .api
            .login(credentials)
            .await
            .map_err(AuthFailure::Login)?;
        self.store_token(response.access_token)
    }

    /// Register, then log in with the same credentials.
    async fn register(&self, registration: &Registration) -> Result<(), AuthFailure> {
        self.api
            .register(registration)
            .await
            .map_err(AuthFailure::Register)?;
        tracing::debug!("Registered account");
        self.login(&registration.credentials()).await
    }

    fn store_token(&self, token: String) -> Result<(), AuthFailure> {
        self.session
            .borrow_mut()
            .set_token(token)
            .map_err(|e: StoreError| {
                tracing::error!("Could not persist session: {e}");
                AuthFailure::Storage(e)
            })
    }

    async fn revoke(&self, token: &str) {
        if let Err(e) = self.api.logout(token).await {
            tracing::warn!("Token revocation failed: {e}");
        }
    }

    /// Snapshot of the current token. A missing token is reported the way
    /// the server reports one.
    fn token(&self) -> Result<String, ApiError> {
        self.session
            .borrow()
            .token()
            .map(str::to_owned)
            .ok_or(ApiError::Rejected {
                status: 401,
                message: None,
            })
    }
}
