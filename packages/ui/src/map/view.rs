use std::rc::Rc;

use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use store::GeoPoint;

use super::tiles::{tile_url, visible_tiles};
use super::viewport::{ScreenPoint, Viewport};

/// Zoom change per wheel notch.
const ZOOM_STEP: f64 = 0.5;

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Zoom change for a wheel movement; `None` when there was no vertical movement.
fn wheel_zoom_step(delta_y: f64) -> Option<f64> {
    if delta_y < 0.0 {
        Some(ZOOM_STEP)
    } else if delta_y > 0.0 {
        Some(-ZOOM_STEP)
    } else {
        None
    }
}

/// A client (window) position relative to the container whose top-left is `origin`.
///
/// Events bubbling up from markers report offsets relative to the marker, so
/// positions are always derived from client coordinates.
fn container_point(client: ScreenPoint, origin: ScreenPoint) -> ScreenPoint {
    ScreenPoint::new(client.x - origin.x, client.y - origin.y)
}

/// Viewport after one wheel movement at `client`.
fn wheel_zoom(
    viewport: Viewport,
    client: ScreenPoint,
    origin: ScreenPoint,
    delta_y: f64,
) -> Viewport {
    let mut next = viewport;
    if let Some(step) = wheel_zoom_step(delta_y) {
        next.zoom_at(container_point(client, origin), step);
    }
    next
}

/// Pointer position and viewport captured when a drag starts.
#[derive(Clone, Copy, Debug, PartialEq)]
struct DragStart {
    pointer: ScreenPoint,
    viewport: Viewport,
}

/// A pannable, zoomable raster map.
///
/// The map owns no state beyond the in-progress drag and where its container
/// sits in the window: every gesture reports the next viewport through
/// `on_viewport_change` and the parent decides whether to apply it. `children`
/// are laid over the tiles and are expected to position themselves with
/// [`Viewport::project`].
#[component]
pub fn MapView(
    viewport: Viewport,
    tile_template: String,
    on_viewport_change: EventHandler<Viewport>,
    on_double_click: EventHandler<GeoPoint>,
    children: Element,
) -> Element {
    let mut drag = use_signal(|| Option::<DragStart>::None);
    let mut container = use_signal(|| Option::<Rc<MountedData>>::None);
    let mut origin = use_signal(ScreenPoint::default);

    let measure_origin = move || {
        let Some(element) = container() else { return };
        spawn(async move {
            match element.get_client_rect().await {
                Ok(rect) => origin.set(ScreenPoint::new(rect.origin.x, rect.origin.y)),
                Err(e) => tracing::warn!("Could not locate map container: {:?}", e),
            }
        });
    };

    let tiles = visible_tiles(&viewport);
    let class = if drag.read().is_some() {
        "map map--dragging"
    } else {
        "map"
    };

    rsx! {
        div {
            class: "{class}",

            onmounted: move |evt: Event<MountedData>| {
                container.set(Some(evt.data()));
                measure_origin();
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                let client = evt.client_coordinates();
                let point = container_point(ScreenPoint::new(client.x, client.y), origin());
                on_double_click.call(viewport.unproject(point));
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                drag.set(Some(DragStart {
                    pointer: ScreenPoint::new(client.x, client.y),
                    viewport,
                }));
            },

            onmousemove: move |evt: Event<MouseData>| {
                let Some(start) = drag() else { return };
                let client = evt.client_coordinates();
                let mut next = start.viewport;
                next.pan_by(client.x - start.pointer.x, client.y - start.pointer.y);
                on_viewport_change.call(next);
            },

            onmouseup: move |_| drag.set(None),
            onmouseleave: move |_| drag.set(None),

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let delta_y = wheel_delta_y(evt.data().delta());
                let client = evt.data().client_coordinates();
                let client = ScreenPoint::new(client.x, client.y);
                let next = wheel_zoom(viewport, client, origin(), delta_y);
                if next != viewport {
                    on_viewport_change.call(next);
                }
            },

            onresize: move |evt: Event<ResizeData>| {
                match evt.data().get_content_box_size() {
                    Ok(size) => {
                        measure_origin();
                        let mut next = viewport;
                        next.resize(size.width, size.height);
                        if next != viewport {
                            on_viewport_change.call(next);
                        }
                    }
                    Err(e) => tracing::warn!("Could not measure map container: {:?}", e),
                }
            },

            div {
                class: "map-tiles",
                for tile in tiles {
                    img {
                        key: "{tile.key()}",
                        class: "map-tile",
                        src: tile_url(&tile_template, tile.coord),
                        alt: "",
                        draggable: "false",
                        style: "left: {tile.left}px; top: {tile.top}px; width: {tile.size}px; height: {tile.size}px;",
                    }
                }
            }

            div {
                class: "map-overlay",
                {children}
            }
        }
    }
}
