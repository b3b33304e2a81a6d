use premise_core::model::{ProblemRequest, SessionId};
use premise_core::{RateLimitSettings, RateLimiter};

/// Per-session UI state. Only `SessionController` mutates it.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(super) id: SessionId,
    pub(super) generating: bool,
    pub(super) problem_text: Option<String>,
    pub(super) solution_text: Option<String>,
    pub(super) show_solution: bool,
    pub(super) limiter: RateLimiter,
    pub(super) cooldown_message: Option<String>,
    pub(super) error_message: Option<String>,
    pub(super) notice: Option<String>,
    pub(super) inputs: ProblemRequest,
    pub(super) last_inputs: Option<ProblemRequest>,
}

impl SessionState {
    #[must_use]
    pub fn new(limits: RateLimitSettings) -> Self {
        Self {
            id: SessionId::new(),
            generating: false,
            problem_text: None,
            solution_text: None,
            show_solution: false,
            limiter: RateLimiter::new(limits),
            cooldown_message: None,
            error_message: None,
            notice: None,
            inputs: ProblemRequest::default(),
            last_inputs: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn generating(&self) -> bool {
        self.generating
    }

    #[must_use]
    pub fn problem_text(&self) -> Option<&str> {
        self.problem_text.as_deref()
    }

    #[must_use]
    pub fn solution_text(&self) -> Option<&str> {
        self.solution_text.as_deref()
    }

    /// Visibility only counts while there is a solution to show.
    #[must_use]
    pub fn show_solution(&self) -> bool {
        self.show_solution && self.has_solution()
    }

    #[must_use]
    pub fn has_solution(&self) -> bool {
        self.solution_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    #[must_use]
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    #[must_use]
    pub fn cooldown_message(&self) -> Option<&str> {
        self.cooldown_message.as_deref()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Inputs as currently edited.
    #[must_use]
    pub fn inputs(&self) -> &ProblemRequest {
        &self.inputs
    }
}

/// Immutable view of a session for one render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub inputs: ProblemRequest,
    pub generating: bool,
    /// Whether the generate button should accept clicks.
    pub generate_enabled: bool,
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub show_solution: bool,
    pub cooldown_message: Option<String>,
    pub error_message: Option<String>,
    pub notice: Option<String>,
}
