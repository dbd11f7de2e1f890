//! Login panel shown over the map.

use api::ApiClient;
use dioxus::prelude::*;

use crate::auth::{apply_login, submit_login, use_session_context, LoginForm};
use crate::controller::use_map_controller;
use crate::icons::{FaLocationDot, FaXmark};
use crate::Icon;

#[component]
pub fn LoginPanel() -> Element {
    let api = use_context::<ApiClient>();
    let mut session = use_session_context();
    let mut controller = use_map_controller();
    let mut form = use_signal(LoginForm::default);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        if form.read().pending {
            return;
        }
        let credentials = form.read().credentials();
        match credentials {
            Err(failure) => form.write().error = Some(failure),
            Ok(credentials) => {
                {
                    let mut f = form.write();
                    f.pending = true;
                    f.error = None;
                }
                let api = api.clone();
                spawn(async move {
                    let outcome = submit_login(&api, &credentials).await;
                    apply_login(
                        outcome,
                        &mut *form.write(),
                        &mut *session.write(),
                        &mut *controller.write(),
                    );
                });
            }
        }
    };

    let pending = form.read().pending;
    let error = form.read().error_message();

    rsx! {
        div {
            class: "auth-panel",
            div {
                class: "auth-logo",
                Icon { icon: FaLocationDot, width: 20, height: 20 }
                " TravelPin"
            }

            form {
                onsubmit: handle_login,
                input {
                    r#type: "text",
                    placeholder: "username",
                    autocomplete: "username",
                    value: "{form.read().username}",
                    oninput: move |evt: FormEvent| form.write().username = evt.value(),
                }
                input {
                    r#type: "password",
                    placeholder: "password",
                    autocomplete: "current-password",
                    value: "{form.read().password}",
                    oninput: move |evt: FormEvent| form.write().password = evt.value(),
                }
                button {
                    class: "auth-submit",
                    r#type: "submit",
                    disabled: pending,
                    if pending { "Logging in..." } else { "Login" }
                }
                if let Some(message) = error {
                    span { class: "auth-failure", "{message}" }
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
