//! # API crate: typed client for the invoicing REST backend
//!
//! Everything the web client says to the server goes through the
//! [`InvoiceApi`] trait. The production implementation is [`HttpApi`]
//! (reqwest, `fetch` on wasm); the `ui` crate's tests substitute a recording
//! mock so the state machine can be exercised without a network.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Wire types: `Client`, `Invoice`, `InvoiceStatus`, request bodies, `TokenResponse` |
//! | [`error`] | [`ApiError`] and the user-facing message policy |
//! | [`http`] | [`HttpApi`], the JSON-over-HTTP implementation |
//!
//! ## Endpoints
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | `register` | `POST /auth/register` | none |
//! | `login` | `POST /auth/login` | none |
//! | `logout` | `POST /auth/logout` | bearer |
//! | `list_clients` / `create_client` | `GET`/`POST /clients/` | bearer |
//! | `update_client` / `delete_client` | `PUT`/`DELETE /clients/<id>/` | bearer |
//! | `list_invoices` | `GET /invoices/?client_id=` | bearer |
//! | `create_invoice` | `POST /invoices/` | bearer |
//! | `update_invoice_status` / `delete_invoice` | `PUT`/`DELETE /invoices/<id>/` | bearer |

use std::future::Future;

pub mod error;
pub mod http;
pub mod models;

pub use error::{ApiError, NETWORK_ERROR_MESSAGE};
pub use http::HttpApi;
pub use models::{
    Client, ClientId, Credentials, Invoice, InvoiceId, InvoiceStatus, NewClient, NewInvoice,
    Registration, TokenResponse,
};

/// Async interface to the invoicing backend.
pub trait InvoiceApi {
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<TokenResponse, ApiError>>;
    /// Revoke `token` server-side.
    fn logout(&self, token: &str) -> impl Future<Output = Result<(), ApiError>>;
    fn list_clients(&self, token: &str) -> impl Future<Output = Result<Vec<Client>, ApiError>>;
    fn create_client(
        &self,
        token: &str,
        client: &NewClient,
    ) -> impl Future<Output = Result<Client, ApiError>>;
    /// Replace a client's name, email and phone.
    fn update_client(
        &self,
        token: &str,
        client_id: ClientId,
        client: &NewClient,
    ) -> impl Future<Output = Result<Client, ApiError>>;
    /// Delete a client along with its invoices.
    fn delete_client(
        &self,
        token: &str,
        client_id: ClientId,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn list_invoices(
        &self,
        token: &str,
        client_id: ClientId,
    ) -> impl Future<Output = Result<Vec<Invoice>, ApiError>>;
    fn create_invoice(
        &self,
        token: &str,
        invoice: &NewInvoice,
    ) -> impl Future<Output = Result<Invoice, ApiError>>;
    fn update_invoice_status(
        &self,
        token: &str,
        invoice_id: InvoiceId,
        status: &InvoiceStatus,
    ) -> impl Future<Output = Result<Invoice, ApiError>>;
    fn delete_invoice(
        &self,
        token: &str,
        invoice_id: InvoiceId,
    ) -> impl Future<Output = Result<(), ApiError>>;
}
