//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod map;
pub use map::{MapView, PinMarker, ScreenPoint, Viewport};

pub mod controller;
pub use controller::{
    use_map_controller, AuthOverlay, DraftContent, DraftPin, DraftPopup, MapController,
    SubmitOutcome,
};

pub mod pins;
pub use pins::{create_pin, load_pins, ControllerCell};

mod auth;
pub use auth::{
    apply_login, apply_register, platform_storage, submit_login, submit_register,
    use_session_context, AuthFailure, LoginForm, LogoutButton, PlatformStorage, RegisterForm,
    RegisterStatus, SessionProvider,
};

mod login;
pub use login::LoginPanel;

mod register;
pub use register::RegisterPanel;

mod popup;
pub use popup::{AuthPrompt, MapPopup, NewPinForm, PinCard, PinDetails};

pub mod timeago;
