//! # Domain models for pins and accounts
//!
//! The types in this module mirror the JSON documents exchanged with the Travel Pin
//! API. They are `Serialize + Deserialize` so the [`api`] crate can send and receive
//! them directly, and `PartialEq` so they can live inside Dioxus signals and props.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Pin`] | A persisted point of interest. The server assigns `_id` and `createdAt`; everything else is author-supplied. |
//! | [`NewPin`] | The request body for creating a pin (no id, no timestamp). |
//! | [`GeoPoint`] | A latitude/longitude pair, used for map clicks, pin positions and the viewport center. |
//! | [`Credentials`] | Login request body. |
//! | [`Registration`] | Registration request body. |
//! | [`LoggedInUser`] | Login response body. |
//!
//! Wire names follow the API (`desc`, `long`, `_id`, `createdAt`). Fields the
//! client does not use (`updatedAt`, `__v`) are ignored when decoding.
//!
//! [`api`]: ../api/index.html

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub long: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

/// A pin as returned by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    /// Opaque server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Username of the author.
    pub username: String,
    /// Place name.
    pub title: String,
    /// Free-text review.
    pub desc: String,
    /// Star rating, nominally 1-5. Not validated by the client.
    pub rating: u8,
    pub lat: f64,
    pub long: f64,
    pub created_at: DateTime<Utc>,
}

impl Pin {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.long)
    }

    /// Whether `username` authored this pin.
    pub fn is_authored_by(&self, username: Option<&str>) -> bool {
        username == Some(self.username.as_str())
    }
}

/// Body of `POST /api/pins`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewPin {
    pub username: String,
    pub title: String,
    pub desc: String,
    pub rating: u8,
    pub lat: f64,
    pub long: f64,
}

/// Body of `POST /users/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /users/register`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response of a successful login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedInUser {
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pin_decodes_server_document() {
        let json = r#"{
            "_id": "60a1f2",
            "username": "alice",
            "title": "Victoria Memorial",
            "desc": "Lovely gardens",
            "rating": 4,
            "lat": 22.5448,
            "long": 88.3426,
            "createdAt": "2021-05-16T10:20:30.000Z",
            "updatedAt": "2021-05-16T10:20:30.000Z",
            "__v": 0
        }"#;

        let pin: Pin = serde_json::from_str(json).unwrap();
        assert_eq!(pin.id, "60a1f2");
        assert_eq!(pin.desc, "Lovely gardens");
        assert_eq!(pin.rating, 4);
        assert_eq!(pin.position(), GeoPoint::new(22.5448, 88.3426));
        assert_eq!(
            pin.created_at,
            Utc.with_ymd_and_hms(2021, 5, 16, 10, 20, 30).unwrap()
        );
    }

    #[test]
    fn test_new_pin_uses_api_field_names() {
        let body = NewPin {
            username: "alice".to_string(),
            title: "Fort".to_string(),
            desc: String::new(),
            rating: 0,
            lat: 1.5,
            long: -2.5,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["long"], -2.5);
        assert_eq!(value["rating"], 0);
        assert!(value.get("_id").is_none());
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn test_is_authored_by() {
        let pin: Pin = serde_json::from_str(
            r#"{"_id":"1","username":"bob","title":"t","desc":"d","rating":1,"lat":0,"long":0,"createdAt":"2021-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert!(pin.is_authored_by(Some("bob")));
        assert!(!pin.is_authored_by(Some("alice")));
        assert!(!pin.is_authored_by(None));
    }
}
