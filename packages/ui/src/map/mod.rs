//! Slippy map: projection, tile layout and the interactive view.

mod marker;
mod tiles;
mod view;
mod viewport;

pub use marker::PinMarker;
pub use tiles::{tile_url, visible_tiles, TileCoord, TilePlacement, MAX_TILE_ZOOM};
pub use view::MapView;
pub use viewport::{
    clamp_latitude, wrap_longitude, ScreenPoint, Viewport, MAX_LATITUDE, MAX_ZOOM, MIN_ZOOM,
    TILE_SIZE,
};
