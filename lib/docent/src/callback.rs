//! Callback flows.
//!
//! Some documented endpoints call the consumer back instead of being
//! called. The coordinator models that inbound flow: a test registers a
//! trigger action, the trigger synchronously causes an inbound request to
//! the test-local destination, and the coordinator asserts the destination
//! actually fired before unregistering everything.

use docent_core::{Error, Request, Response, Result};
use tracing::{debug, info};
use url::Url;

use crate::Environment;

type Handler = Box<dyn FnMut(&Request) -> Response>;
type Trigger = Box<dyn FnMut(&mut TestDestination)>;

/// Lifecycle of one callback registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackState {
    /// Nothing registered yet.
    #[default]
    Idle,
    /// A trigger action is bound and waiting.
    Registered,
    /// The trigger action ran; an inbound request is expected.
    Triggered,
    /// The destination fired and the registration was released.
    Fired,
}

/// Test-local receiver standing in for the consumer's callback endpoint.
///
/// At most one handler is active at a time; without one, every inbound
/// request is answered with a bare `200`.
#[derive(Default)]
pub struct TestDestination {
    handler: Option<Handler>,
    url: Option<Url>,
    received: Vec<Request>,
}

impl TestDestination {
    /// Create a destination with no handler bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the handler invoked for every inbound request.
    ///
    /// Rebinding replaces the previous handler.
    pub fn on_request(&mut self, handler: impl FnMut(&Request) -> Response + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Drop the active handler, if any.
    pub fn clear_handler(&mut self) {
        self.handler = None;
    }

    /// Deliver an inbound request, returning the handler's response.
    pub fn deliver(&mut self, request: Request) -> Response {
        debug!(path = request.path(), "callback destination hit");
        self.received.push(request.clone());
        match self.handler.as_mut() {
            Some(handler) => handler(&request),
            None => Response::with_status(200),
        }
    }

    /// URL the destination is listening on, once pointed by the coordinator.
    #[must_use]
    pub const fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Returns `true` if at least one inbound request arrived.
    #[must_use]
    pub fn was_called(&self) -> bool {
        !self.received.is_empty()
    }

    /// Inbound requests received so far, oldest first.
    #[must_use]
    pub fn received(&self) -> &[Request] {
        &self.received
    }
}

impl std::fmt::Debug for TestDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestDestination")
            .field("url", &self.url)
            .field("handler", &self.handler.is_some())
            .field("received", &self.received.len())
            .finish()
    }
}

/// Coordinates the trigger action and the destination for one test.
#[derive(Default)]
pub struct CallbackCoordinator {
    destination: TestDestination,
    trigger: Option<Trigger>,
    state: CallbackState,
}

impl std::fmt::Debug for CallbackCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackCoordinator")
            .field("destination", &self.destination)
            .field("trigger", &self.trigger.is_some())
            .field("state", &self.state)
            .finish()
    }
}

impl CallbackCoordinator {
    /// Create an idle coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> CallbackState {
        self.state
    }

    /// The destination receiving inbound requests.
    #[must_use]
    pub const fn destination(&self) -> &TestDestination {
        &self.destination
    }

    /// Mutable access to the destination, e.g. to bind a handler.
    pub const fn destination_mut(&mut self) -> &mut TestDestination {
        &mut self.destination
    }

    /// Register the action expected to cause the inbound callback.
    ///
    /// Registering again replaces the previous action; only one is active
    /// per test.
    pub fn trigger_callback(&mut self, action: impl FnMut(&mut TestDestination) + 'static) {
        self.trigger = Some(Box::new(action));
        self.state = CallbackState::Registered;
    }

    /// Run the registered trigger and assert the destination fired.
    ///
    /// The `callback_url` binding names where the consumer would be
    /// listening; the destination is pointed at it before the trigger runs.
    /// The trigger is consumed - a second `do_callback` needs a new
    /// registration - and the destination handler is released once fired.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingCallbackUrl`] when `callback_url` is unbound.
    /// - [`Error::InvalidUrl`] when the bound value does not parse.
    /// - A callback error when no trigger is registered or the destination
    ///   never received the inbound request.
    pub fn do_callback(&mut self, env: &Environment) -> Result<()> {
        let url = env
            .get("callback_url")
            .as_ref()
            .and_then(docent_core::canonical_string)
            .ok_or(Error::MissingCallbackUrl)?;
        let url = Url::parse(&url)?;
        self.destination.url = Some(url.clone());

        let mut trigger = self
            .trigger
            .take()
            .ok_or_else(|| Error::callback("no trigger registered; call trigger_callback first"))?;

        let before = self.destination.received.len();
        self.state = CallbackState::Triggered;
        info!(%url, "triggering callback");
        trigger(&mut self.destination);

        if self.destination.received.len() == before {
            return Err(Error::callback("destination was never called"));
        }

        self.state = CallbackState::Fired;
        self.destination.clear_handler();
        Ok(())
    }
}
