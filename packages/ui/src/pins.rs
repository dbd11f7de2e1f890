//! Pin loading and creation against the API.

use std::cell::RefCell;
use std::rc::Rc;

use api::PinsApi;
use dioxus::prelude::*;

use crate::controller::{MapController, SubmitOutcome};

/// Somewhere a [`MapController`] can be mutated for the length of a closure.
///
/// The map page holds the controller in a `Signal`; tests use a plain `RefCell`.
/// Borrows never span an `.await`.
pub trait ControllerCell {
    fn update<R>(&mut self, f: impl FnOnce(&mut MapController) -> R) -> R;
}

impl ControllerCell for Signal<MapController> {
    fn update<R>(&mut self, f: impl FnOnce(&mut MapController) -> R) -> R {
        f(&mut *self.write())
    }
}

impl ControllerCell for Rc<RefCell<MapController>> {
    fn update<R>(&mut self, f: impl FnOnce(&mut MapController) -> R) -> R {
        f(&mut *self.borrow_mut())
    }
}

/// Fetch the pin list. Returns `false` if a newer load superseded this one.
pub async fn load_pins<A, C>(api: &A, controller: &mut C) -> bool
where
    A: PinsApi,
    C: ControllerCell,
{
    let ticket = controller.update(|c| c.begin_load());
    let result = api.list_pins().await;
    controller.update(|c| c.finish_load(ticket, result))
}

/// Save the current draft as a pin by `author`.
///
/// `None` when there was nothing to send: no draft, or one already in flight.
pub async fn create_pin<A, C>(api: &A, author: &str, controller: &mut C) -> Option<SubmitOutcome>
where
    A: PinsApi,
    C: ControllerCell,
{
    let (ticket, body) = controller.update(|c| c.begin_submit(author))?;
    let result = api.create_pin(&body).await;
    Some(controller.update(|c| c.finish_submit(ticket, result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::{controller_with, pin};
    use api::ApiError;
    use store::{GeoPoint, NewPin, Pin};

    type Hook = Box<dyn Fn()>;

    /// Canned responses, plus a hook run while a request is "in flight".
    struct StubPins {
        list: Result<Vec<Pin>, ApiError>,
        created: Result<Pin, ApiError>,
        sent: RefCell<Vec<NewPin>>,
        in_flight: Option<Hook>,
    }

    impl StubPins {
        fn new(list: Result<Vec<Pin>, ApiError>, created: Result<Pin, ApiError>) -> Self {
            Self {
                list,
                created,
                sent: RefCell::new(Vec::new()),
                in_flight: None,
            }
        }

        fn during_request(mut self, hook: impl Fn() + 'static) -> Self {
            self.in_flight = Some(Box::new(hook));
            self
        }

        fn run_hook(&self) {
            if let Some(hook) = &self.in_flight {
                hook();
            }
        }
    }

    impl PinsApi for StubPins {
        async fn list_pins(&self) -> Result<Vec<Pin>, ApiError> {
            self.run_hook();
            self.list.clone()
        }

        async fn create_pin(&self, pin: &NewPin) -> Result<Pin, ApiError> {
            self.sent.borrow_mut().push(pin.clone());
            self.run_hook();
            self.created.clone()
        }
    }

    fn offline() -> ApiError {
        ApiError::Transport("connection refused".to_string())
    }

    fn cell(controller: MapController) -> Rc<RefCell<MapController>> {
        Rc::new(RefCell::new(controller))
    }

    #[tokio::test]
    async fn test_load_fills_list() {
        let api = StubPins::new(
            Ok(vec![pin("a", "bob", 1.0, 2.0), pin("b", "carol", 3.0, 4.0)]),
            Err(offline()),
        );
        let mut controller = cell(controller_with(vec![]));

        assert!(load_pins(&api, &mut controller).await);

        let c = controller.borrow();
        assert_eq!(c.pins().len(), 2);
        assert!(!c.is_loading());
        assert!(c.load_error().is_none());
    }

    #[tokio::test]
    async fn test_load_failure_is_reported_and_retry_recovers() {
        let mut controller = cell(controller_with(vec![]));

        load_pins(&StubPins::new(Err(offline()), Err(offline())), &mut controller).await;
        assert!(controller.borrow().pins().is_empty());
        assert_eq!(controller.borrow().load_error(), Some(&offline()));

        let api = StubPins::new(Ok(vec![pin("a", "bob", 1.0, 2.0)]), Err(offline()));
        load_pins(&api, &mut controller).await;
        assert_eq!(controller.borrow().pins().len(), 1);
        assert!(controller.borrow().load_error().is_none());
    }

    #[tokio::test]
    async fn test_superseded_load_is_discarded() {
        let mut controller = cell(controller_with(vec![]));
        let shared = controller.clone();
        let api = StubPins::new(Ok(vec![pin("old", "bob", 1.0, 2.0)]), Err(offline()))
            .during_request(move || {
                shared.borrow_mut().begin_load();
            });

        assert!(!load_pins(&api, &mut controller).await);

        let c = controller.borrow();
        assert!(c.pins().is_empty());
        // the newer load is still pending
        assert!(c.is_loading());
    }

    #[tokio::test]
    async fn test_create_appends_and_clears_draft() {
        let created = pin("new", "alice", 5.0, 6.0);
        let api = StubPins::new(Ok(vec![]), Ok(created.clone()));
        let mut controller = cell(controller_with(vec![pin("a", "bob", 1.0, 2.0)]));
        {
            let mut c = controller.borrow_mut();
            c.place_draft(GeoPoint::new(5.0, 6.0));
            c.set_title("Lake".to_string());
            c.set_desc("Quiet".to_string());
            c.set_rating(5);
        }

        let outcome = create_pin(&api, "alice", &mut controller).await;

        assert_eq!(outcome, Some(SubmitOutcome::Saved));
        assert_eq!(
            api.sent.borrow().as_slice(),
            &[NewPin {
                username: "alice".to_string(),
                title: "Lake".to_string(),
                desc: "Quiet".to_string(),
                rating: 5,
                lat: 5.0,
                long: 6.0,
            }]
        );
        let c = controller.borrow();
        assert_eq!(c.pins().last(), Some(&created));
        assert_eq!(c.pins().len(), 2);
        assert!(c.draft().is_none());
    }

    #[tokio::test]
    async fn test_create_failure_keeps_draft() {
        let api = StubPins::new(Ok(vec![]), Err(ApiError::Rejected { status: 500 }));
        let mut controller = cell(controller_with(vec![pin("a", "bob", 1.0, 2.0)]));
        controller.borrow_mut().place_draft(GeoPoint::new(5.0, 6.0));
        controller.borrow_mut().set_title("Lake".to_string());

        let outcome = create_pin(&api, "alice", &mut controller).await;

        assert_eq!(outcome, Some(SubmitOutcome::Failed));
        let c = controller.borrow();
        assert_eq!(c.pins().len(), 1);
        let draft = c.draft().unwrap();
        assert_eq!(draft.content_or_default().title, "Lake");
        assert!(draft.error.is_some());
    }

    #[tokio::test]
    async fn test_create_without_draft_sends_nothing() {
        let api = StubPins::new(Ok(vec![]), Err(offline()));
        let mut controller = cell(controller_with(vec![]));

        assert_eq!(create_pin(&api, "alice", &mut controller).await, None);
        assert!(api.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_draft_replaced_while_saving() {
        let mut controller = cell(controller_with(vec![]));
        controller.borrow_mut().place_draft(GeoPoint::new(5.0, 6.0));
        let shared = controller.clone();
        let api = StubPins::new(Ok(vec![]), Ok(pin("new", "alice", 5.0, 6.0))).during_request(
            move || shared.borrow_mut().place_draft(GeoPoint::new(-3.0, 40.0)),
        );

        let outcome = create_pin(&api, "alice", &mut controller).await;

        assert_eq!(outcome, Some(SubmitOutcome::SavedElsewhere));
        let c = controller.borrow();
        assert_eq!(c.pins().len(), 1);
        assert_eq!(c.draft().unwrap().coords, GeoPoint::new(-3.0, 40.0));
    }
}
