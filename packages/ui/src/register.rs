//! Registration panel shown over the map.

use api::ApiClient;
use dioxus::prelude::*;

use crate::auth::{apply_register, submit_register, RegisterForm, RegisterStatus};
use crate::controller::use_map_controller;
use crate::icons::{FaLocationDot, FaXmark};
use crate::Icon;

/// Stays open after a successful registration; the user closes it and logs in.
#[component]
pub fn RegisterPanel() -> Element {
    let api = use_context::<ApiClient>();
    let mut controller = use_map_controller();
    let mut form = use_signal(RegisterForm::default);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        if form.read().pending {
            return;
        }
        let registration = form.read().registration();
        match registration {
            Err(failure) => form.write().status = RegisterStatus::Failed(failure),
            Ok(registration) => {
                {
                    let mut f = form.write();
                    f.pending = true;
                    f.status = RegisterStatus::Idle;
                }
                let api = api.clone();
                spawn(async move {
                    let outcome = submit_register(&api, &registration).await;
                    apply_register(outcome, &mut *form.write());
                });
            }
        }
    };

    let pending = form.read().pending;
    let status = form.read().status;
    let message = form.read().message();
    let message_class = if status == RegisterStatus::Registered {
        "auth-success"
    } else {
        "auth-failure"
    };

    rsx! {
        div {
            class: "auth-panel",
            div {
                class: "auth-logo",
                Icon { icon: FaLocationDot, width: 20, height: 20 }
                " TravelPin"
            }

            form {
                onsubmit: handle_register,
                input {
                    r#type: "text",
                    placeholder: "username",
                    autocomplete: "username",
                    value: "{form.read().username}",
                    oninput: move |evt: FormEvent| form.write().username = evt.value(),
                }
                input {
                    r#type: "email",
                    placeholder: "email",
                    autocomplete: "email",
                    value: "{form.read().email}",
                    oninput: move |evt: FormEvent| form.write().email = evt.value(),
                }
                input {
                    r#type: "password",
                    placeholder: "password",
                    autocomplete: "new-password",
                    value: "{form.read().password}",
                    oninput: move |evt: FormEvent| form.write().password = evt.value(),
                }
                button {
                    class: "auth-submit",
                    r#type: "submit",
                    disabled: pending,
                    if pending { "Registering..." } else { "Register" }
                }
                if let Some(message) = message {
                    span { class: "{message_class}", "{message}" }
                }
            }

            button {
                class: "auth-cancel",
                title: "Close",
                onclick: move |_| controller.write().close_overlay(),
                Icon { icon: FaXmark, width: 14, height: 14 }
            }
        }
    }
}
