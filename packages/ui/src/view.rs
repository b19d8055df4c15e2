//! Render-ready projections of [`AppState`].
//!
//! Components call these instead of reaching into the state, so the text the
//! user sees is testable without a DOM.

use api::{ClientId, Invoice, InvoiceId, InvoiceStatus};

use crate::format::display_amount;
use crate::state::AppState;

pub const NO_INVOICES: &str = "No invoices found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRow {
    pub id: ClientId,
    /// `"<name> (<email>)"`.
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRow {
    pub id: InvoiceId,
    pub summary: String,
    pub description: Option<String>,
    pub status: InvoiceStatus,
}

impl InvoiceRow {
    pub fn can_mark_paid(&self) -> bool {
        !self.status.is_paid()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceListView {
    /// No client selected, or the last load failed.
    Hidden,
    Loading,
    Empty(&'static str),
    Rows(Vec<InvoiceRow>),
}

pub fn client_rows(state: &AppState) -> Vec<ClientRow> {
    state
        .clients
        .iter()
        .map(|c| ClientRow {
            id: c.id,
            label: format!("{} ({})", c.name, c.email),
            selected: state.selected_client == Some(c.id),
        })
        .collect()
}

/// Title of the client form: adding, or editing an existing client.
pub fn client_form_title(state: &AppState) -> &'static str {
    if state.editing_client.is_some() {
        "Save client"
    } else {
        "Add client"
    }
}

/// `"Invoices for <name>"`, or `None` with no selection.
pub fn invoices_heading(state: &AppState) -> Option<String> {
    state
        .selected_client()
        .map(|c| format!("Invoices for {}", c.name))
}

/// The invoice form is only offered once a client is selected.
pub fn show_invoice_form(state: &AppState) -> bool {
    state.selected_client().is_some()
}

pub fn invoice_list(state: &AppState) -> InvoiceListView {
    if state.selected_client.is_none() {
        return InvoiceListView::Hidden;
    }
    if state.invoices_loading {
        return InvoiceListView::Loading;
    }
    match &state.invoices {
        None => InvoiceListView::Hidden,
        Some(invoices) if invoices.is_empty() => InvoiceListView::Empty(NO_INVOICES),
        Some(invoices) => InvoiceListView::Rows(invoices.iter().map(invoice_row).collect()),
    }
}

fn invoice_row(invoice: &Invoice) -> InvoiceRow {
    InvoiceRow {
        id: invoice.id,
        summary: invoice_summary(invoice),
        description: invoice.description.clone().filter(|d| !d.is_empty()),
        status: invoice.status.clone(),
    }
}

/// `Amount: $<amount>, Due: <date or N/A>, Status: <status>`.
pub fn invoice_summary(invoice: &Invoice) -> String {
    let due = invoice
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "Amount: {}, Due: {}, Status: {}",
        display_amount(invoice.amount),
        due,
        invoice.status
    )
}
