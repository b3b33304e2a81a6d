use std::sync::Arc;

use services::{Clock, ProblemService, SessionController};

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn problems(&self) -> Arc<ProblemService>;

    /// Fresh state for one user session.
    fn new_session(&self) -> SessionController;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app: Arc::clone(app),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.app.clock()
    }

    #[must_use]
    pub fn problems(&self) -> Arc<ProblemService> {
        self.app.problems()
    }

    #[must_use]
    pub fn new_session(&self) -> SessionController {
        self.app.new_session()
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
