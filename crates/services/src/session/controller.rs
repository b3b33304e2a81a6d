use chrono::{DateTime, Utc};

use premise_core::model::{ProblemRequest, SessionId};
use premise_core::{RateLimitSettings, RateLimited};

use crate::error::ProblemError;
use crate::problems::{FetchOutcome, ProblemService};
use crate::session::state::{SessionSnapshot, SessionState};

/// Result of a generate trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Accepted: the session is now generating and the caller should fetch.
    Fetch(ProblemRequest),
    /// Rejected by the rate limiter; a cooldown message is pending.
    CoolingDown { remaining_secs: u32 },
    /// Rejected because a fetch is already in flight.
    Busy,
    /// Rejected because the inputs match the last accepted generation.
    Unchanged,
}

/// A discrete user action or fetch completion.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    InputsChanged(ProblemRequest),
    GenerateTriggered {
        request: ProblemRequest,
        now: DateTime<Utc>,
    },
    FetchCompleted(Result<FetchOutcome, ProblemError>),
    ToggleSolution,
}

/// What the caller must do after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(ProblemRequest),
}

/// Owns one session's state and decides which actions may proceed.
///
/// Lifecycle: `Idle -> Generating -> Idle` (with a new result or an error).
/// Only one fetch is ever in flight; triggers while generating are dropped.
#[derive(Debug, Clone)]
pub struct SessionController {
    state: SessionState,
    require_new_inputs: bool,
}

impl SessionController {
    #[must_use]
    pub fn new(limits: RateLimitSettings) -> Self {
        Self {
            state: SessionState::new(limits),
            require_new_inputs: false,
        }
    }

    /// Only allow a new generation when the inputs differ from the last one.
    #[must_use]
    pub fn with_require_new_inputs(mut self, require_new_inputs: bool) -> Self {
        self.require_new_inputs = require_new_inputs;
        self
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.state.id
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Not generating and the rate-limit window has room at `now`.
    #[must_use]
    pub fn can_generate(&self, now: DateTime<Utc>) -> bool {
        !self.state.generating && self.state.limiter.has_capacity(now)
    }

    /// Whether the generate button should be clickable.
    ///
    /// Cooldown is not part of this: a click during cooldown is how the user
    /// learns how long to wait.
    #[must_use]
    pub fn generate_enabled(&self) -> bool {
        !self.state.generating && !self.blocked_as_unchanged(&self.state.inputs)
    }

    pub fn on_inputs_changed(&mut self, request: ProblemRequest) {
        self.state.inputs = request;
    }

    pub fn on_generate_triggered(
        &mut self,
        request: ProblemRequest,
        now: DateTime<Utc>,
    ) -> Trigger {
        let session_id = self.state.id;
        self.state.inputs = request.clone();

        if self.state.generating {
            tracing::debug!(%session_id, "generate ignored: fetch already in flight");
            return Trigger::Busy;
        }
        if self.blocked_as_unchanged(&request) {
            tracing::debug!(%session_id, "generate ignored: inputs unchanged");
            return Trigger::Unchanged;
        }

        if let Err(RateLimited { remaining_secs }) = self.state.limiter.try_acquire(now) {
            tracing::info!(%session_id, remaining_secs, "generate rejected: cooling down");
            self.state.cooldown_message = Some(cooldown_message(remaining_secs));
            return Trigger::CoolingDown { remaining_secs };
        }

        tracing::info!(
            %session_id,
            category = %request.category,
            age_category = %request.age_category,
            "generate accepted"
        );
        self.state.generating = true;
        self.state.last_inputs = Some(request.clone());
        self.state.cooldown_message = None;
        self.state.error_message = None;
        self.state.notice = None;
        Trigger::Fetch(request)
    }

    pub fn on_fetch_complete(&mut self, result: Result<FetchOutcome, ProblemError>) {
        let session_id = self.state.id;
        if !self.state.generating {
            tracing::warn!(%session_id, "discarding fetch result: no generation in flight");
            return;
        }
        self.state.generating = false;

        match result {
            Ok(outcome) => {
                tracing::info!(
                    %session_id,
                    has_solution = outcome.problem.has_solution(),
                    "problem generated"
                );
                self.state.problem_text = Some(outcome.problem.problem);
                self.state.solution_text = outcome.problem.solution;
                self.state.show_solution = false;
                self.state.cooldown_message = None;
                self.state.error_message = None;
                self.state.notice = outcome.warning.map(|warning| warning.to_string());
            }
            Err(err) => {
                tracing::warn!(%session_id, error = %err, "problem generation failed");
                self.state.error_message = Some(err.to_string());
            }
        }
    }

    /// Flip solution visibility; ignored while there is no solution.
    pub fn toggle_solution(&mut self) {
        if self.state.has_solution() {
            self.state.show_solution = !self.state.show_solution;
        }
    }

    pub fn handle(&mut self, event: SessionEvent) -> Effect {
        match event {
            SessionEvent::InputsChanged(request) => {
                self.on_inputs_changed(request);
                Effect::None
            }
            SessionEvent::GenerateTriggered { request, now } => {
                match self.on_generate_triggered(request, now) {
                    Trigger::Fetch(request) => Effect::Fetch(request),
                    Trigger::CoolingDown { .. } | Trigger::Busy | Trigger::Unchanged => {
                        Effect::None
                    }
                }
            }
            SessionEvent::FetchCompleted(result) => {
                self.on_fetch_complete(result);
                Effect::None
            }
            SessionEvent::ToggleSolution => {
                self.toggle_solution();
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = &self.state;
        SessionSnapshot {
            inputs: state.inputs.clone(),
            generating: state.generating,
            generate_enabled: self.generate_enabled(),
            problem: state
                .problem_text
                .clone()
                .filter(|text| !text.trim().is_empty()),
            solution: state.solution_text.clone().filter(|text| !text.trim().is_empty()),
            show_solution: state.show_solution(),
            cooldown_message: state.cooldown_message.clone(),
            error_message: state.error_message.clone(),
            notice: state.notice.clone(),
        }
    }

    /// Snapshot for display; the cooldown message is shown once and then cleared.
    pub fn render(&mut self) -> SessionSnapshot {
        let snapshot = self.snapshot();
        self.state.cooldown_message = None;
        snapshot
    }

    /// Trigger a generation and, if accepted, run it to completion.
    ///
    /// Holds the session for the whole call, so it suits callers without an
    /// event loop (the CLI, tests).
    pub async fn run_generation(
        &mut self,
        problems: &ProblemService,
        request: ProblemRequest,
        now: DateTime<Utc>,
    ) -> Trigger {
        let trigger = self.on_generate_triggered(request, now);
        if let Trigger::Fetch(request) = &trigger {
            let result = problems.generate(request).await;
            self.on_fetch_complete(result);
        }
        trigger
    }

    fn blocked_as_unchanged(&self, request: &ProblemRequest) -> bool {
        self.require_new_inputs && self.state.last_inputs.as_ref() == Some(request)
    }
}

fn cooldown_message(remaining_secs: u32) -> String {
    let unit = if remaining_secs == 1 { "second" } else { "seconds" };
    format!("Please wait {remaining_secs} {unit} before generating another problem.")
}
