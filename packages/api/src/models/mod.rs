//! Wire models exchanged with the invoicing REST API.

mod auth;
mod client;
mod invoice;

pub use auth::{Credentials, Registration, TokenResponse};
pub use client::{Client, ClientId, NewClient};
pub use invoice::{Invoice, InvoiceId, InvoiceStatus, NewInvoice, StatusUpdate};
