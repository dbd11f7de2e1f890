//! The map page: pins, popups, the draft form and the account controls.

use api::ApiClient;
use dioxus::prelude::*;
use store::{GeoPoint, TravelPinConfig};
use ui::{
    create_pin, load_pins, use_session_context, AuthOverlay, AuthPrompt, DraftPopup, LoginPanel,
    LogoutButton, MapController, MapPopup, MapView, NewPinForm, PinCard, PinMarker,
    RegisterPanel, Viewport,
};

#[component]
pub fn TravelMap() -> Element {
    let config = use_context::<TravelPinConfig>();
    let api = use_context::<ApiClient>();
    let session = use_session_context();

    let start = config.viewport.clone();
    let mut controller = use_signal(move || {
        MapController::new(Viewport::new(
            GeoPoint::new(start.latitude, start.longitude),
            start.zoom,
        ))
    });
    use_context_provider(|| controller);

    let tile_template = use_hook(|| config.map.tile_template());

    let load_api = api.clone();
    let mut pins_load = use_resource(move || {
        let api = load_api.clone();
        async move {
            let mut controller = controller;
            load_pins(&api, &mut controller).await;
        }
    });

    let submit_api = api.clone();
    let handle_submit = move |_: ()| {
        let Some(author) = session.read().username().map(str::to_string) else {
            return;
        };
        let api = submit_api.clone();
        spawn(async move {
            let mut controller = controller;
            create_pin(&api, &author, &mut controller).await;
        });
    };

    let current = session.read().current().clone();
    let username = current.username().map(str::to_string);

    let state = controller.read();
    let viewport = *state.viewport();
    let pins = state.pins().to_vec();
    let selected = state.selected_pin().cloned();
    let draft = state.draft().cloned().zip(state.draft_popup(&current));
    let overlay = state.overlay();
    let load_error = state.load_error().cloned();
    let loading = state.is_loading();
    drop(state);

    rsx! {
        div {
            class: "travel-map",

            MapView {
                viewport,
                tile_template,
                on_viewport_change: move |next: Viewport| controller.write().set_viewport(next),
                on_double_click: move |point: GeoPoint| controller.write().place_draft(point),

                for pin in pins {
                    PinMarker {
                        key: "{pin.id}",
                        position: viewport.project(pin.position()),
                        zoom: viewport.zoom,
                        own: pin.is_authored_by(username.as_deref()),
                        on_select: move |id: String| {
                            controller.write().select_pin(&id);
                        },
                        pin: pin.clone(),
                    }
                }

                if let Some(pin) = selected {
                    MapPopup {
                        position: viewport.project(pin.position()),
                        on_close: move |_| controller.write().close_pin(),
                        PinCard { pin: pin.clone() }
                    }
                }

                if let Some((draft, popup)) = draft {
                    MapPopup {
                        position: viewport.project(draft.coords),
                        on_close: move |_| controller.write().dismiss_draft(),
                        {match popup {
                            DraftPopup::Form => rsx! {
                                NewPinForm {
                                    content: draft.content_or_default(),
                                    submitting: draft.submitting,
                                    error: draft.error.clone(),
                                    on_title: move |title: String| controller.write().set_title(title),
                                    on_desc: move |desc: String| controller.write().set_desc(desc),
                                    on_rating: move |rating: u8| controller.write().set_rating(rating),
                                    on_submit: handle_submit,
                                }
                            },
                            DraftPopup::AuthPrompt => rsx! { AuthPrompt {} },
                        }}
                    }
                }
            }

            if loading {
                div { class: "map-status", "Loading pins..." }
            }

            if let Some(e) = load_error {
                div {
                    class: "load-banner",
                    span { "Could not load pins: {e}" }
                    button { onclick: move |_| pins_load.restart(), "Retry" }
                    button {
                        onclick: move |_| controller.write().dismiss_load_error(),
                        "Dismiss"
                    }
                }
            }

            div {
                class: "account-buttons",
                if current.is_logged_in() {
                    LogoutButton { class: "button logout" }
                } else {
                    button {
                        class: "button login",
                        onclick: move |_| controller.write().open_login(),
                        "Login"
                    }
                    button {
                        class: "button register",
                        onclick: move |_| controller.write().open_register(),
                        "Register"
                    }
                }
            }

            {match overlay {
                Some(AuthOverlay::Login) => rsx! { LoginPanel {} },
                Some(AuthOverlay::Register) => rsx! { RegisterPanel {} },
                None => rsx! {},
            }}
        }
    }
}
