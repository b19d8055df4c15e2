//! # reqwest-backed [`InvoiceApi`]
//!
//! [`HttpApi`] talks JSON to the invoicing backend. On `wasm32` reqwest goes
//! through the browser's `fetch`, natively through hyper, so the same client
//! serves the web build and the integration tests.
//!
//! Authenticated calls send `Authorization: Bearer <token>`. A non-2xx status
//! becomes [`ApiError::Rejected`] carrying the body's `error` field when the
//! body has one.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ErrorBody};
use crate::models::{
    Client, ClientId, Credentials, Invoice, InvoiceId, InvoiceStatus, NewClient, NewInvoice,
    Registration, StatusUpdate, TokenResponse,
};
use crate::InvoiceApi;

/// JSON-over-HTTP client for the invoicing API.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn checked(request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error);
    tracing::debug!("API rejected request with {status}: {message:?}");
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = checked(request).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

impl InvoiceApi for HttpApi {
    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        tracing::debug!("Registering account");
        let request = self.client.post(self.url("/auth/register")).json(registration);
        checked(request).await.map(|_| ())
    }

    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        tracing::debug!("Logging in");
        let request = self.client.post(self.url("/auth/login")).json(credentials);
        fetch_json(request).await
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/auth/logout")).bearer_auth(token);
        checked(request).await.map(|_| ())
    }

    async fn list_clients(&self, token: &str) -> Result<Vec<Client>, ApiError> {
        let request = self.client.get(self.url("/clients/")).bearer_auth(token);
        fetch_json(request).await
    }

    async fn create_client(&self, token: &str, client: &NewClient) -> Result<Client, ApiError> {
        let request = self
            .client
            .post(self.url("/clients/"))
            .bearer_auth(token)
            .json(client);
        fetch_json(request).await
    }

    async fn update_client(
        &self,
        token: &str,
        client_id: ClientId,
        client: &NewClient,
    ) -> Result<Client, ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/clients/{client_id}/")))
            .bearer_auth(token)
            .json(client);
        fetch_json(request).await
    }

    async fn delete_client(&self, token: &str, client_id: ClientId) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/clients/{client_id}/")))
            .bearer_auth(token);
        checked(request).await.map(|_| ())
    }

    async fn list_invoices(&self, token: &str, client_id: ClientId) -> Result<Vec<Invoice>, ApiError> {
        let request = self
            .client
            .get(self.url("/invoices/"))
            .query(&[("client_id", client_id)])
            .bearer_auth(token);
        fetch_json(request).await
    }

    async fn create_invoice(&self, token: &str, invoice: &NewInvoice) -> Result<Invoice, ApiError> {
        let request = self
            .client
            .post(self.url("/invoices/"))
            .bearer_auth(token)
            .json(invoice);
        fetch_json(request).await
    }

    async fn update_invoice_status(
        &self,
        token: &str,
        invoice_id: InvoiceId,
        status: &InvoiceStatus,
    ) -> Result<Invoice, ApiError> {
        let body = StatusUpdate {
            status: status.clone(),
        };
        let request = self
            .client
            .put(self.url(&format!("/invoices/{invoice_id}/")))
            .bearer_auth(token)
            .json(&body);
        fetch_json(request).await
    }

    async fn delete_invoice(&self, token: &str, invoice_id: InvoiceId) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/invoices/{invoice_id}/")))
            .bearer_auth(token);
        checked(request).await.map(|_| ())
    }
}
