//! # Client configuration — `travelpin.toml`
//!
//! The web client embeds a TOML file at build time describing where the API lives,
//! which map tiles to draw and where the map starts.
//!
//! ## Structure
//!
//! ```toml
//! log_level = "info"
//!
//! [api]
//! base_url = "https://travel-pin-app.herokuapp.com"
//!
//! [map]
//! access_token = ""      # Mapbox token; empty falls back to OpenStreetMap tiles
//! style = "mapbox://styles/satyaki07/cko9n937s4m1e18loytwy0vv6"
//! tile_url = ""          # explicit {z}/{x}/{y} template, wins over `style`
//!
//! [viewport]
//! latitude = 22.0
//! longitude = 88.0
//! zoom = 4.0
//! ```
//!
//! Every section is optional; a missing or empty file is equivalent to
//! [`TravelPinConfig::default`].

use serde::{Deserialize, Serialize};

const DEFAULT_API_URL: &str = "https://travel-pin-app.herokuapp.com";
const DEFAULT_MAP_STYLE: &str = "mapbox://styles/satyaki07/cko9n937s4m1e18loytwy0vv6";
const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const MAPBOX_STYLE_PREFIX: &str = "mapbox://styles/";

/// Top-level configuration stored in `travelpin.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TravelPinConfig {
    /// `tracing` level name: "error", "warn", "info", "debug" or "trace".
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TravelPinConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api: ApiConfig::default(),
            map: MapConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

/// Remote API location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin serving both `/api/pins` and `/users/*`.
    #[serde(default = "default_api_url")]
    pub base_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
        }
    }
}

/// Map tile source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_map_style")]
    pub style: String,
    #[serde(default)]
    pub tile_url: String,
}

fn default_map_style() -> String {
    DEFAULT_MAP_STYLE.to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            style: default_map_style(),
            tile_url: String::new(),
        }
    }
}

impl MapConfig {
    /// URL template with `{z}`, `{x}` and `{y}` placeholders.
    ///
    /// An explicit `tile_url` wins. Otherwise a `mapbox://styles/<owner>/<id>` style
    /// with a token maps onto the Mapbox static tiles endpoint, and anything else
    /// falls back to OpenStreetMap.
    pub fn tile_template(&self) -> String {
        if !self.tile_url.is_empty() {
            return self.tile_url.clone();
        }
        match self.style.strip_prefix(MAPBOX_STYLE_PREFIX) {
            Some(style_path) if !self.access_token.is_empty() => format!(
                "https://api.mapbox.com/styles/v1/{style_path}/tiles/256/{{z}}/{{x}}/{{y}}?access_token={}",
                self.access_token
            ),
            _ => OSM_TILE_URL.to_string(),
        }
    }
}

/// Initial view of the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

fn default_latitude() -> f64 {
    22.0
}

fn default_longitude() -> f64 {
    88.0
}

fn default_zoom() -> f64 {
    4.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            zoom: default_zoom(),
        }
    }
}

impl TravelPinConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "travelpin.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply values baked in from the build environment. Empty values are ignored.
    pub fn with_overrides(mut self, api_url: Option<&str>, map_token: Option<&str>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.is_empty()) {
            self.api.base_url = url.to_string();
        }
        if let Some(token) = map_token.filter(|t| !t.is_empty()) {
            self.map.access_token = token.to_string();
        }
        self
    }
}
