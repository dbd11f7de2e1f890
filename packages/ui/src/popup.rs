//! Popups anchored to a point on the map: pin details, the new-pin form and the
//! login prompt shown to anonymous users.

use api::ApiError;
use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use store::Pin;

use crate::controller::DraftContent;
use crate::icons::{FaStar, FaXmark};
use crate::map::ScreenPoint;
use crate::timeago::format_relative;
use crate::Icon;

/// A card next to `position` with a close button.
///
/// Pointer events stop here so the map underneath neither pans nor places a draft.
#[component]
pub fn MapPopup(position: ScreenPoint, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "map-popup",
            style: "left: {position.x}px; top: {position.y}px;",
            onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
            ondoubleclick: move |evt: Event<MouseData>| evt.stop_propagation(),
            onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
            onwheel: move |evt: Event<WheelData>| evt.stop_propagation(),

            button {
                class: "map-popup-close",
                title: "Close",
                onclick: move |_| on_close.call(()),
                Icon { icon: FaXmark, width: 12, height: 12 }
            }
            {children}
        }
    }
}

/// What a pin card shows, computed for a given moment.
#[derive(Clone, Debug, PartialEq)]
pub struct PinDetails {
    pub title: String,
    pub desc: String,
    pub stars: usize,
    pub author: String,
    pub age: String,
}

impl PinDetails {
    pub fn new(pin: &Pin, now: DateTime<Utc>) -> Self {
        Self {
            title: pin.title.clone(),
            desc: pin.desc.clone(),
            stars: pin.rating as usize,
            author: pin.username.clone(),
            age: format_relative(pin.created_at, now),
        }
    }
}

#[component]
pub fn PinCard(pin: Pin) -> Element {
    let details = PinDetails::new(&pin, Utc::now());

    rsx! {
        div {
            class: "pin-card",
            label { "Place" }
            h4 { class: "pin-card-place", "{details.title}" }
            label { "Review" }
            p { class: "pin-card-desc", "{details.desc}" }
            label { "Rating" }
            div {
                class: "pin-card-stars",
                for i in 0..details.stars {
                    span {
                        key: "{i}",
                        Icon { icon: FaStar, width: 14, height: 14 }
                    }
                }
            }
            label { "Information" }
            span {
                class: "pin-card-author",
                "Created by "
                b { "{details.author}" }
            }
            span { class: "pin-card-date", "{details.age}" }
        }
    }
}

/// Creation form for the open draft.
#[component]
pub fn NewPinForm(
    content: DraftContent,
    submitting: bool,
    error: Option<ApiError>,
    on_title: EventHandler<String>,
    on_desc: EventHandler<String>,
    on_rating: EventHandler<u8>,
    on_submit: EventHandler<()>,
) -> Element {
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        on_submit.call(());
    };

    rsx! {
        form {
            class: "pin-form",
            onsubmit: handle_submit,

            label { r#for: "pin-title", "Title" }
            input {
                id: "pin-title",
                r#type: "text",
                placeholder: "Enter a title",
                value: "{content.title}",
                oninput: move |evt: FormEvent| on_title.call(evt.value()),
            }

            label { r#for: "pin-desc", "Review" }
            textarea {
                id: "pin-desc",
                placeholder: "Say something about this place",
                value: "{content.desc}",
                oninput: move |evt: FormEvent| on_desc.call(evt.value()),
            }

            label { r#for: "pin-rating", "Rating" }
            select {
                id: "pin-rating",
                value: "{content.rating}",
                onchange: move |evt: FormEvent| {
                    if let Ok(rating) = evt.value().parse::<u8>() {
                        on_rating.call(rating);
                    }
                },
                option { value: "0", disabled: true, hidden: true, "Rate it" }
                for n in 1..=5u8 {
                    option { key: "{n}", value: "{n}", "{n}" }
                }
            }

            if let Some(e) = error {
                p { class: "pin-form-error", "Could not save the pin: {e}" }
            }

            button {
                class: "pin-form-submit",
                r#type: "submit",
                disabled: submitting,
                if submitting { "Saving..." } else { "Add Pin" }
            }
        }
    }
}

#[component]
pub fn AuthPrompt() -> Element {
    rsx! {
        p { class: "auth-prompt", "Please Register / Login" }
    }
}
