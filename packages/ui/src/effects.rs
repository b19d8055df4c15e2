//! Effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover everything that touches the network, the session store or a
//! timer, so the reducer itself never performs I/O.

use std::time::Duration;

use api::{ClientId, Credentials, InvoiceId, NewClient, NewInvoice, Registration};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Exchange credentials for a token and store it.
    Login(Credentials),
    /// Register, then log in with the same credentials and store the token.
    Register(Registration),
    /// Clear the stored session. Runs synchronously.
    EndSession,
    /// Best-effort server-side revocation of a token that was just cleared.
    RevokeToken(String),

    LoadClients { epoch: u64 },
    CreateClient { epoch: u64, client: NewClient },
    UpdateClient { epoch: u64, client_id: ClientId, client: NewClient },
    DeleteClient { epoch: u64, client_id: ClientId },

    LoadInvoices { generation: u64, client_id: ClientId },
    CreateInvoice { generation: u64, invoice: NewInvoice },
    MarkInvoicePaid { generation: u64, invoice_id: InvoiceId },
    DeleteInvoice { generation: u64, invoice_id: InvoiceId },

    /// Wake the inactivity monitor after `after`.
    ScheduleIdleCheck { generation: u64, after: Duration },
}

impl Effect {
    /// Whether the runtime can finish this effect without awaiting.
    pub fn is_immediate(&self) -> bool {
        matches!(self, Self::EndSession)
    }
}
