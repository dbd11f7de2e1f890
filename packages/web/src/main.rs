use api::ApiClient;
use dioxus::prelude::*;
use store::TravelPinConfig;

use ui::SessionProvider;
use views::TravelMap;

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    TravelMap {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Configuration embedded at build time.
const CONFIG_TOML: &str = include_str!("../travelpin.toml");

fn main() {
    let (config, parse_error) = match TravelPinConfig::from_toml(CONFIG_TOML) {
        Ok(config) => (config, None),
        Err(e) => (TravelPinConfig::default(), Some(e)),
    };
    let config = config.with_overrides(
        option_env!("TRAVELPIN_API_URL"),
        option_env!("TRAVELPIN_MAP_TOKEN"),
    );

    let level = config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    if let Err(e) = dioxus::logger::init(level) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    if let Some(e) = parse_error {
        tracing::warn!("Invalid {}, using defaults: {}", TravelPinConfig::filename(), e);
    }
    tracing::info!("Using API at {}", config.api.base_url);

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context::<TravelPinConfig>();
    use_context_provider(|| ApiClient::new(config.api.base_url.clone()));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}
