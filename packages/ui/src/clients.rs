use dioxus::prelude::*;

use crate::dispatcher::use_dispatcher;
use crate::events::AppEvent;
use crate::state::ClientField;
use crate::view::{client_form_title, client_rows};

/// Clickable client list. Selecting a row loads that client's invoices.
#[component]
pub fn ClientList() -> Element {
    let dispatcher = use_dispatcher();
    let rows = client_rows(&dispatcher.state().read());

    rsx! {
        section {
            class: "client-list",
            h2 { "Clients" }
            if rows.is_empty() {
                p { class: "placeholder", "No clients yet." }
            }
            ul {
                for row in rows {
                    li {
                        key: "{row.id}",
                        class: if row.selected { "client-row selected" } else { "client-row" },
                        onclick: {
                            let dispatcher = dispatcher.clone();
                            move |_| dispatcher.send(AppEvent::ClientSelected(row.id))
                        },
                        span { "{row.label}" }
                        button {
                            onclick: {
                                let dispatcher = dispatcher.clone();
                                move |evt: MouseEvent| {
                                    evt.stop_propagation();
                                    dispatcher.send(AppEvent::ClientEditRequested(row.id));
                                }
                            },
                            "Edit"
                        }
                        button {
                            class: "danger",
                            onclick: {
                                let dispatcher = dispatcher.clone();
                                move |evt: MouseEvent| {
                                    evt.stop_propagation();
                                    dispatcher.send(AppEvent::ClientDeleteRequested(row.id));
                                }
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

/// Add or edit a client. Name parts are capitalized and the phone masked as
/// typed.
#[component]
pub fn ClientForm() -> Element {
    let dispatcher = use_dispatcher();
    let (draft, title, editing) = {
        let state = dispatcher.state();
        let state = state.read();
        (
            state.client_draft.clone(),
            client_form_title(&state),
            state.editing_client.is_some(),
        )
    };

    let field = |f: ClientField| {
        let dispatcher = dispatcher.clone();
        move |evt: FormEvent| dispatcher.send(AppEvent::ClientEdited(f, evt.value()))
    };
    let on_submit = {
        let dispatcher = dispatcher.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            dispatcher.send(AppEvent::ClientSubmitted);
        }
    };

    rsx! {
        form {
            id: "client-form",
            class: "entity-form",
            onsubmit: on_submit,
            h3 { "{title}" }
            input {
                placeholder: "First name",
                required: true,
                value: "{draft.first_name}",
                oninput: field(ClientField::FirstName),
            }
            input {
                placeholder: "Last name",
                required: true,
                value: "{draft.last_name}",
                oninput: field(ClientField::LastName),
            }
            input {
                r#type: "email",
                placeholder: "Email",
                required: true,
                value: "{draft.email}",
                oninput: field(ClientField::Email),
            }
            input {
                r#type: "tel",
                placeholder: "(555)123-4567",
                value: "{draft.phone}",
                oninput: field(ClientField::Phone),
            }
            button { r#type: "submit", "{title}" }
            if editing {
                button {
                    r#type: "button",
                    onclick: {
                        let dispatcher = dispatcher.clone();
                        move |_| dispatcher.send(AppEvent::ClientEditCancelled)
                    },
                    "Cancel"
                }
            }
        }
    }
}
