//! # API crate — HTTP client for the Travel Pin backend
//!
//! The backend is an external service. This crate is the only place that knows its
//! URLs and wire formats; everything above it talks to the two traits defined here.
//!
//! ## Endpoints
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `GET` | `/api/pins` | — | `[Pin]` |
//! | `POST` | `/api/pins` | [`NewPin`] | [`Pin`] |
//! | `POST` | `/users/login` | [`Credentials`] | [`LoggedInUser`] |
//! | `POST` | `/users/register` | [`Registration`] | any success status |
//!
//! ## Traits
//!
//! [`PinsApi`] and [`UsersApi`] split the surface the way the UI uses it: the map
//! page lists and creates pins, the auth panels log in and register. [`ApiClient`]
//! implements both over `reqwest`; tests substitute in-memory stubs.
//!
//! No call sets a timeout or retries. A failed call is reported once as an
//! [`ApiError`] and the caller decides what to show.

use std::future::Future;

use reqwest::Response;

mod error;
pub use error::ApiError;

pub use store::{Credentials, LoggedInUser, NewPin, Pin, Registration};

const PINS_PATH: &str = "/api/pins";
const LOGIN_PATH: &str = "/users/login";
const REGISTER_PATH: &str = "/users/register";

/// Reading and creating pins.
pub trait PinsApi {
    fn list_pins(&self) -> impl Future<Output = Result<Vec<Pin>, ApiError>>;
    fn create_pin(&self, pin: &NewPin) -> impl Future<Output = Result<Pin, ApiError>>;
}

/// Account operations.
pub trait UsersApi {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoggedInUser, ApiError>>;
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<(), ApiError>>;
}

/// `reqwest`-backed client for the Travel Pin API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

impl ApiClient {
    /// Create a client for the API served at `base_url` (scheme + host, optional prefix).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    response.error_for_status().map_err(ApiError::from)
}

impl PinsApi for ApiClient {
    async fn list_pins(&self) -> Result<Vec<Pin>, ApiError> {
        let response = self.http.get(self.url(PINS_PATH)).send().await?;
        let pins: Vec<Pin> = check_status(response)?.json().await?;
        tracing::debug!("Fetched {} pins", pins.len());
        Ok(pins)
    }

    async fn create_pin(&self, pin: &NewPin) -> Result<Pin, ApiError> {
        let response = self.http.post(self.url(PINS_PATH)).json(pin).send().await?;
        Ok(check_status(response)?.json().await?)
    }
}

impl UsersApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoggedInUser, ApiError> {
        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(credentials)
            .send()
            .await?;
        Ok(check_status(response)?.json().await?)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(REGISTER_PATH))
            .json(registration)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }
}
