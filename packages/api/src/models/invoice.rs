use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ClientId;

pub type InvoiceId = i64;

/// Invoice lifecycle status.
///
/// The server stores a free-form string; values outside the known set are
/// kept verbatim so they still display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceStatus {
    #[default]
    Unpaid,
    Paid,
    Overdue,
    Other(String),
}

impl InvoiceStatus {
    /// Statuses offered by the add-invoice form.
    pub const CHOICES: [InvoiceStatus; 3] =
        [InvoiceStatus::Unpaid, InvoiceStatus::Paid, InvoiceStatus::Overdue];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Other(s) => s,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl From<String> for InvoiceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "unpaid" => Self::Unpaid,
            "paid" => Self::Paid,
            "overdue" => Self::Overdue,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for InvoiceStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<InvoiceStatus> for String {
    fn from(value: InvoiceStatus) -> Self {
        match value {
            InvoiceStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invoice as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub client_id: ClientId,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO `YYYY-MM-DD`, absent when the invoice has no due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: InvoiceStatus,
}

/// Body of `POST /invoices/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewInvoice {
    pub client_id: ClientId,
    pub amount: Decimal,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub status: InvoiceStatus,
}

/// Body of `PUT /invoices/<id>/` when only the status changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: InvoiceStatus,
}
