//! Session context and the login/register flows.

use api::{ApiError, UsersApi};
use dioxus::prelude::*;
use store::{Credentials, KeyValueStore, Registration, SessionContext, SessionStore};

use crate::controller::{use_map_controller, MapController};

/// Session storage for the current platform: `localStorage` in the browser,
/// process memory elsewhere.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

pub fn platform_storage() -> PlatformStorage {
    PlatformStorage::new()
}

/// Get the session context.
pub fn use_session_context() -> Signal<SessionContext<PlatformStorage>> {
    use_context::<Signal<SessionContext<PlatformStorage>>>()
}

/// Restores the persisted session once and provides it to the tree.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let session =
        use_signal(|| SessionContext::restore(SessionStore::new(platform_storage())));

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Why a login or registration did not go through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthFailure {
    /// A field was left empty; nothing was sent.
    MissingFields,
    /// The server answered with an error status.
    Rejected,
    /// The server could not be reached or answered nonsense.
    Unreachable,
}

impl From<&ApiError> for AuthFailure {
    fn from(e: &ApiError) -> Self {
        if e.is_rejection() {
            AuthFailure::Rejected
        } else {
            AuthFailure::Unreachable
        }
    }
}

/// Names and emails are trimmed before sending; passwords go out exactly as typed.
fn is_blank(field: &str) -> bool {
    field.trim().is_empty()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub pending: bool,
    pub error: Option<AuthFailure>,
}

impl LoginForm {
    pub fn credentials(&self) -> Result<Credentials, AuthFailure> {
        if is_blank(&self.username) || self.password.is_empty() {
            return Err(AuthFailure::MissingFields);
        }
        Ok(Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|failure| match failure {
            AuthFailure::MissingFields => "Please enter a username and password.",
            AuthFailure::Rejected => "Invalid username or password.",
            AuthFailure::Unreachable => "Something went wrong!",
        })
    }
}

/// Outcome of the last registration attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegisterStatus {
    #[default]
    Idle,
    Registered,
    Failed(AuthFailure),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub pending: bool,
    pub status: RegisterStatus,
}

impl RegisterForm {
    pub fn registration(&self) -> Result<Registration, AuthFailure> {
        if is_blank(&self.username) || is_blank(&self.email) || self.password.is_empty() {
            return Err(AuthFailure::MissingFields);
        }
        Ok(Registration {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn message(&self) -> Option<&'static str> {
        match self.status {
            RegisterStatus::Idle => None,
            RegisterStatus::Registered => Some("Registration Successful! You can login now."),
            RegisterStatus::Failed(AuthFailure::MissingFields) => {
                Some("Please fill in every field.")
            }
            RegisterStatus::Failed(AuthFailure::Rejected) => {
                Some("Registration failed. Try another username or email.")
            }
            RegisterStatus::Failed(AuthFailure::Unreachable) => Some("Something went wrong!"),
        }
    }
}

/// Log in and return the username the server confirmed.
pub async fn submit_login<A: UsersApi>(
    api: &A,
    credentials: &Credentials,
) -> Result<String, AuthFailure> {
    match api.login(credentials).await {
        Ok(user) => Ok(user.username),
        Err(e) => {
            tracing::error!("Login failed for {}: {}", credentials.username, e);
            Err(AuthFailure::from(&e))
        }
    }
}

pub async fn submit_register<A: UsersApi>(
    api: &A,
    registration: &Registration,
) -> Result<(), AuthFailure> {
    match api.register(registration).await {
        Ok(()) => {
            tracing::info!("Registered {}", registration.username);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Registration failed for {}: {}", registration.username, e);
            Err(AuthFailure::from(&e))
        }
    }
}

/// Apply a login result: persist the session and close the panel, or show why not.
pub fn apply_login<S: KeyValueStore>(
    outcome: Result<String, AuthFailure>,
    form: &mut LoginForm,
    session: &mut SessionContext<S>,
    controller: &mut MapController,
) {
    form.pending = false;
    match outcome {
        Ok(username) => {
            session.login(&username);
            *form = LoginForm::default();
            controller.close_overlay();
        }
        Err(failure) => form.error = Some(failure),
    }
}

pub fn apply_register(outcome: Result<(), AuthFailure>, form: &mut RegisterForm) {
    form.pending = false;
    form.status = match outcome {
        Ok(()) => RegisterStatus::Registered,
        Err(failure) => RegisterStatus::Failed(failure),
    };
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut session = use_session_context();
    let mut controller = use_map_controller();

    let onclick = move |_| {
        session.write().logout();
        controller.write().close_overlay();
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::{controller_with, pin};
    use crate::controller::DraftPopup;
    use api::LoggedInUser;
    use store::{GeoPoint, MemoryStorage, Session, SESSION_KEY};

    struct StubUsers {
        login: Result<LoggedInUser, ApiError>,
        register: Result<(), ApiError>,
    }

    impl StubUsers {
        fn accepting(username: &str) -> Self {
            Self {
                login: Ok(LoggedInUser {
                    username: username.to_string(),
                }),
                register: Ok(()),
            }
        }

        fn failing(error: ApiError) -> Self {
            Self {
                login: Err(error.clone()),
                register: Err(error),
            }
        }
    }

    impl UsersApi for StubUsers {
        async fn login(&self, _credentials: &Credentials) -> Result<LoggedInUser, ApiError> {
            self.login.clone()
        }

        async fn register(&self, _registration: &Registration) -> Result<(), ApiError> {
            self.register.clone()
        }
    }

    fn logged_out() -> (MemoryStorage, SessionContext<MemoryStorage>) {
        let storage = MemoryStorage::new();
        let session = SessionContext::restore(SessionStore::new(storage.clone()));
        (storage, session)
    }

    fn alice_form() -> LoginForm {
        LoginForm {
            username: "alice".to_string(),
            password: "secret".to_string(),
            ..LoginForm::default()
        }
    }

    #[tokio::test]
    async fn test_login_persists_session_and_closes_panel() {
        let api = StubUsers::accepting("alice");
        let (storage, mut session) = logged_out();
        let mut controller = controller_with(vec![]);
        controller.open_login();
        let mut form = alice_form();

        let credentials = form.credentials().unwrap();
        let outcome = submit_login(&api, &credentials).await;
        apply_login(outcome, &mut form, &mut session, &mut controller);

        assert_eq!(storage.get_item(SESSION_KEY), Some("alice".to_string()));
        assert_eq!(session.username(), Some("alice"));
        assert_eq!(controller.overlay(), None);
        assert_eq!(form.error_message(), None);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_panel_open() {
        let api = StubUsers::failing(ApiError::Rejected { status: 400 });
        let (storage, mut session) = logged_out();
        let mut controller = controller_with(vec![]);
        controller.open_login();
        let mut form = alice_form();

        let outcome = submit_login(&api, &form.credentials().unwrap()).await;
        apply_login(outcome, &mut form, &mut session, &mut controller);

        assert_eq!(storage.get_item(SESSION_KEY), None);
        assert_eq!(session.current(), &Session::LoggedOut);
        assert_eq!(form.error_message(), Some("Invalid username or password."));
        assert_eq!(controller.overlay(), Some(crate::controller::AuthOverlay::Login));
    }

    #[tokio::test]
    async fn test_unreachable_server_has_its_own_message() {
        let api = StubUsers::failing(ApiError::Transport("connection refused".to_string()));
        let (_, mut session) = logged_out();
        let mut controller = controller_with(vec![]);
        let mut form = alice_form();

        let outcome = submit_login(&api, &form.credentials().unwrap()).await;
        apply_login(outcome, &mut form, &mut session, &mut controller);

        assert_eq!(form.error, Some(AuthFailure::Unreachable));
        assert_eq!(form.error_message(), Some("Something went wrong!"));
    }

    #[test]
    fn test_empty_fields_are_not_sent() {
        let form = LoginForm {
            username: "alice".to_string(),
            ..LoginForm::default()
        };
        assert_eq!(form.credentials(), Err(AuthFailure::MissingFields));

        let form = RegisterForm {
            username: "bob".to_string(),
            email: "  ".to_string(),
            password: "pw".to_string(),
            ..RegisterForm::default()
        };
        assert_eq!(form.registration(), Err(AuthFailure::MissingFields));
    }

    #[test]
    fn test_whitespace_password_is_sent_as_typed() {
        let form = LoginForm {
            username: " alice ".to_string(),
            password: "   ".to_string(),
            ..LoginForm::default()
        };
        assert_eq!(
            form.credentials(),
            Ok(Credentials {
                username: "alice".to_string(),
                password: "   ".to_string(),
            })
        );

        let form = RegisterForm {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: " ".to_string(),
            ..RegisterForm::default()
        };
        assert_eq!(form.registration().map(|r| r.password), Ok(" ".to_string()));
    }

    #[tokio::test]
    async fn test_register_success_message() {
        let api = StubUsers::accepting("bob");
        let mut form = RegisterForm {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "pw".to_string(),
            ..RegisterForm::default()
        };

        let outcome = submit_register(&api, &form.registration().unwrap()).await;
        apply_register(outcome, &mut form);

        assert_eq!(form.status, RegisterStatus::Registered);
        assert_eq!(
            form.message(),
            Some("Registration Successful! You can login now.")
        );
    }

    #[tokio::test]
    async fn test_register_failure_message() {
        let api = StubUsers::failing(ApiError::Rejected { status: 500 });
        let mut form = RegisterForm {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "pw".to_string(),
            ..RegisterForm::default()
        };

        let outcome = submit_register(&api, &form.registration().unwrap()).await;
        apply_register(outcome, &mut form);

        assert_eq!(form.status, RegisterStatus::Failed(AuthFailure::Rejected));
        assert!(form.message().is_some());
    }

    #[test]
    fn test_logout_clears_session_with_draft_open() {
        let storage = MemoryStorage::new();
        storage.set_item(SESSION_KEY, "alice");
        let mut session = SessionContext::restore(SessionStore::new(storage.clone()));
        let mut controller = controller_with(vec![pin("a", "alice", 0.0, 0.0)]);
        controller.select_pin("a");
        controller.place_draft(GeoPoint::new(1.0, 2.0));
        controller.set_title("half written".to_string());
        assert_eq!(controller.draft_popup(session.current()), Some(DraftPopup::Form));

        session.logout();

        assert_eq!(storage.get_item(SESSION_KEY), None);
        assert_eq!(session.current(), &Session::LoggedOut);
        assert_eq!(
            controller.draft_popup(session.current()),
            Some(DraftPopup::AuthPrompt)
        );
    }
}
