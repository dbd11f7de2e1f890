pub mod config;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use config::TravelPinConfig;
pub use models::{Credentials, GeoPoint, LoggedInUser, NewPin, Pin, Registration};
pub use session::{KeyValueStore, Session, SessionContext, SessionStore, SESSION_KEY};
