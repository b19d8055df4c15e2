use api::InvoiceStatus;
use dioxus::prelude::*;

use crate::dispatcher::use_dispatcher;
use crate::events::{AppEvent, InvoiceAction};
use crate::state::InvoiceField;
use crate::view::{invoice_list, invoices_heading, show_invoice_form, InvoiceListView};

/// Heading, list and form for the selected client's invoices.
///
/// Renders nothing until a client is selected.
#[component]
pub fn InvoicePanel() -> Element {
    let dispatcher = use_dispatcher();
    let state = dispatcher.state();
    let (heading, list, with_form) = {
        let state = state.read();
        (invoices_heading(&state), invoice_list(&state), show_invoice_form(&state))
    };

    let Some(heading) = heading else {
        return rsx! {};
    };

    rsx! {
        section {
            class: "invoice-panel",
            h2 { id: "invoices-heading", "{heading}" }
            match list {
                InvoiceListView::Hidden => rsx! {},
                InvoiceListView::Loading => rsx! { p { class: "placeholder", "Loading invoices..." } },
                InvoiceListView::Empty(text) => rsx! { p { class: "placeholder", "{text}" } },
                InvoiceListView::Rows(rows) => rsx! {
                    ul {
                        class: "invoice-list",
                        for row in rows {
                            li {
                                key: "{row.id}",
                                class: "invoice-row status-{row.status}",
                                span { "{row.summary}" }
                                if let Some(description) = &row.description {
                                    span { class: "invoice-description", "{description}" }
                                }
                                if row.can_mark_paid() {
                                    button {
                                        onclick: {
                                            let dispatcher = dispatcher.clone();
                                            move |_| dispatcher.send(AppEvent::InvoiceActionRequested(row.id, InvoiceAction::MarkPaid))
                                        },
                                        "Mark paid"
                                    }
                                }
                                button {
                                    class: "danger",
                                    onclick: {
                                        let dispatcher = dispatcher.clone();
                                        move |_| dispatcher.send(AppEvent::InvoiceActionRequested(row.id, InvoiceAction::Delete))
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                },
            }
            if with_form {
                InvoiceForm {}
            }
        }
    }
}

#[component]
fn InvoiceForm() -> Element {
    let dispatcher = use_dispatcher();
    let draft = dispatcher.state().read().invoice_draft.clone();

    let field = |f: InvoiceField| {
        let dispatcher = dispatcher.clone();
        move |evt: FormEvent| dispatcher.send(AppEvent::InvoiceEdited(f, evt.value()))
    };
    let on_blur = {
        let dispatcher = dispatcher.clone();
        move |_| dispatcher.send(AppEvent::AmountBlurred)
    };
    let on_submit = {
        let dispatcher = dispatcher.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            dispatcher.send(AppEvent::InvoiceSubmitted);
        }
    };

    rsx! {
        form {
            id: "invoice-form",
            class: "entity-form",
            onsubmit: on_submit,
            h3 { "Add invoice" }
            input {
                placeholder: "$0.00",
                inputmode: "decimal",
                required: true,
                value: "{draft.amount}",
                oninput: field(InvoiceField::Amount),
                onblur: on_blur,
            }
            input {
                placeholder: "Description",
                value: "{draft.description}",
                oninput: field(InvoiceField::Description),
            }
            input {
                r#type: "date",
                value: "{draft.due_date}",
                oninput: field(InvoiceField::DueDate),
            }
            select {
                value: "{draft.status}",
                onchange: field(InvoiceField::Status),
                for status in InvoiceStatus::CHOICES {
                    option { key: "{status}", value: "{status}", "{status}" }
                }
            }
            button { r#type: "submit", "Add invoice" }
        }
    }
}
