//! # Viewport — Web Mercator projection for the slippy map
//!
//! The map is drawn in the standard "slippy map" pixel space: at zoom `z` the
//! whole world is a square of `256 * 2^z` pixels, longitude grows to the right and
//! latitude is projected with spherical Web Mercator. A [`Viewport`] is the window
//! onto that space: a geographic center, a (fractional) zoom and the size of the
//! container in CSS pixels.
//!
//! Screen points are relative to the top-left corner of the map container.
//! Longitudes are wrapped into `[-180, 180)` and latitudes clamped to the Mercator
//! limit, so panning past the antimeridian or the poles never produces an
//! unrepresentable center.

use std::f64::consts::PI;

use store::GeoPoint;

pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 19.0;
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

const DEFAULT_WIDTH: f64 = 1024.0;
const DEFAULT_HEIGHT: f64 = 768.0;

/// A point in container pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The visible window onto the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(GeoPoint::default(), MIN_ZOOM)
    }
}

impl Viewport {
    /// A viewport centered on `center`. The size is a placeholder until the
    /// container reports its real dimensions.
    pub fn new(center: GeoPoint, zoom: f64) -> Self {
        Self {
            latitude: clamp_latitude(center.lat),
            longitude: wrap_longitude(center.long),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Width of the whole world in pixels at the current zoom.
    pub fn world_size(&self) -> f64 {
        world_size(self.zoom)
    }

    /// Container position of `point`, using the copy of the world nearest the center.
    pub fn project(&self, point: GeoPoint) -> ScreenPoint {
        let size = self.world_size();
        let (cx, cy) = to_world(self.center(), size);
        let (px, py) = to_world(point, size);
        let dx = (px - cx + size / 2.0).rem_euclid(size) - size / 2.0;
        ScreenPoint::new(self.width / 2.0 + dx, self.height / 2.0 + (py - cy))
    }

    /// Geographic position under a container point.
    pub fn unproject(&self, point: ScreenPoint) -> GeoPoint {
        let size = self.world_size();
        let (cx, cy) = to_world(self.center(), size);
        from_world(
            cx + point.x - self.width / 2.0,
            cy + point.y - self.height / 2.0,
            size,
        )
    }

    pub fn recenter(&mut self, point: GeoPoint) {
        self.latitude = clamp_latitude(point.lat);
        self.longitude = wrap_longitude(point.long);
    }

    /// Move the map content by `(dx, dy)` pixels, as a drag gesture does.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let center = self.unproject(ScreenPoint::new(
            self.width / 2.0 - dx,
            self.height / 2.0 - dy,
        ));
        self.recenter(center);
    }

    /// Change zoom by `delta` while keeping the geographic point under `anchor` fixed.
    pub fn zoom_at(&mut self, anchor: ScreenPoint, delta: f64) {
        let zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if (zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let fixed = self.unproject(anchor);
        self.zoom = zoom;
        let moved = self.project(fixed);
        self.pan_by(anchor.x - moved.x, anchor.y - moved.y);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
        }
    }
}

pub(crate) fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Project to world pixels for a world `size` pixels wide.
pub(crate) fn to_world(point: GeoPoint, size: f64) -> (f64, f64) {
    let lat = clamp_latitude(point.lat).to_radians();
    let x = (point.long + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

pub(crate) fn from_world(x: f64, y: f64, size: f64) -> GeoPoint {
    let long = x / size * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / size)).sinh().atan().to_degrees();
    GeoPoint::new(clamp_latitude(lat), wrap_longitude(long))
}

pub fn wrap_longitude(long: f64) -> f64 {
    (long + 180.0).rem_euclid(360.0) - 180.0
}

pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
}
