//! Login and registration forms.

use dioxus::prelude::*;

use crate::dispatcher::use_dispatcher;
use crate::events::AppEvent;
use crate::state::{AuthView, LoginField, RegisterField};

/// The unauthenticated screen: one of the two forms, with a switch between them.
#[component]
pub fn AuthScreen(view: AuthView) -> Element {
    rsx! {
        div {
            class: "auth-screen",
            match view {
                AuthView::Login => rsx! { LoginForm {} },
                AuthView::Register => rsx! { RegisterForm {} },
            }
        }
    }
}

#[component]
fn LoginForm() -> Element {
    let dispatcher = use_dispatcher();
    let state = dispatcher.state();
    let auth = state.read().auth.clone();

    let on_submit = {
        let dispatcher = dispatcher.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            dispatcher.send(AppEvent::LoginSubmitted);
        }
    };
    let on_email = {
        let dispatcher = dispatcher.clone();
        move |evt: FormEvent| dispatcher.send(AppEvent::LoginEdited(LoginField::Email, evt.value()))
    };
    let on_password = {
        let dispatcher = dispatcher.clone();
        move |evt: FormEvent| {
            dispatcher.send(AppEvent::LoginEdited(LoginField::Password, evt.value()))
        }
    };
    let to_register = move |_| dispatcher.send(AppEvent::ShowRegister);

    rsx! {
        form {
            id: "login-form",
            class: "auth-form",
            onsubmit: on_submit,
            h2 { "Log in" }
            label { r#for: "login-email", "Email" }
            input {
                id: "login-email",
                r#type: "email",
                required: true,
                value: "{auth.login.email}",
                oninput: on_email,
            }
            label { r#for: "login-password", "Password" }
            input {
                id: "login-password",
                r#type: "password",
                required: true,
                value: "{auth.login.password}",
                oninput: on_password,
            }
            if let Some(error) = &auth.login_error {
                p { class: "form-error", "{error}" }
            }
            button {
                r#type: "submit",
                disabled: auth.busy,
                if auth.busy { "Logging in..." } else { "Log in" }
            }
            p {
                class: "auth-switch",
                "No account? "
                button { r#type: "button", class: "link-button", onclick: to_register, "Register" }
            }
        }
    }
}

#[component]
fn RegisterForm() -> Element {
    let dispatcher = use_dispatcher();
    let state = dispatcher.state();
    let auth = state.read().auth.clone();
    let draft = auth.register.clone();

    let field = |f: RegisterField| {
        let dispatcher = dispatcher.clone();
        move |evt: FormEvent| dispatcher.send(AppEvent::RegisterEdited(f, evt.value()))
    };
    let on_submit = {
        let dispatcher = dispatcher.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            dispatcher.send(AppEvent::RegisterSubmitted);
        }
    };
    let to_login = {
        let dispatcher = dispatcher.clone();
        move |_| dispatcher.send(AppEvent::ShowLogin)
    };

    rsx! {
        form {
            id: "register-form",
            class: "auth-form",
            onsubmit: on_submit,
            h2 { "Register" }
            label { r#for: "register-first-name", "First name" }
            input {
                id: "register-first-name",
                required: true,
                value: "{draft.first_name}",
                oninput: field(RegisterField::FirstName),
            }
            label { r#for: "register-last-name", "Last name" }
            input {
                id: "register-last-name",
                required: true,
                value: "{draft.last_name}",
                oninput: field(RegisterField::LastName),
            }
            label { r#for: "register-email", "Email" }
            input {
                id: "register-email",
                r#type: "email",
                required: true,
                value: "{draft.email}",
                oninput: field(RegisterField::Email),
            }
            label { r#for: "register-password", "Password" }
            input {
                id: "register-password",
                r#type: "password",
                required: true,
                value: "{draft.password}",
                oninput: field(RegisterField::Password),
            }
            label { r#for: "register-confirm-password", "Confirm password" }
            input {
                id: "register-confirm-password",
                r#type: "password",
                required: true,
                value: "{draft.confirm_password}",
                oninput: field(RegisterField::ConfirmPassword),
            }
            if let Some(error) = &auth.register_error {
                p { class: "form-error", "{error}" }
            }
            button {
                r#type: "submit",
                disabled: auth.busy,
                if auth.busy { "Creating account..." } else { "Register" }
            }
            p {
                class: "auth-switch",
                "Already registered? "
                button { r#type: "button", class: "link-button", onclick: to_login, "Log in" }
            }
        }
    }
}
