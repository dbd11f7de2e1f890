use dioxus::prelude::*;
use store::Pin;

use super::viewport::ScreenPoint;
use crate::icons::FaLocationDot;
use crate::Icon;

/// Location icon for one pin.
///
/// The icon grows with the zoom level and its tip sits on the pin's position.
/// The current user's pins are drawn in tomato, everyone else's in slateblue.
#[component]
pub fn PinMarker(
    pin: Pin,
    position: ScreenPoint,
    zoom: f64,
    own: bool,
    on_select: EventHandler<String>,
) -> Element {
    let size = (zoom * 7.0).round().max(1.0) as u32;
    let left = position.x - zoom * 3.5;
    let top = position.y - zoom * 7.0;
    let color = if own { "tomato" } else { "slateblue" };
    let id = pin.id.clone();

    rsx! {
        div {
            class: "pin-marker",
            title: "{pin.title}",
            style: "left: {left}px; top: {top}px; color: {color};",
            onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
            ondoubleclick: move |evt: Event<MouseData>| evt.stop_propagation(),
            onclick: move |evt: Event<MouseData>| {
                evt.stop_propagation();
                on_select.call(id.clone());
            },
            Icon { icon: FaLocationDot, width: size, height: size }
        }
    }
}
