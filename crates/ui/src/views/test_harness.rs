use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use premise_core::RateLimitSettings;
use premise_core::model::{GenerationSettings, ProblemRequest};
use premise_core::time::fixed_now;
use services::{
    Clock, CompletionApi, CompletionRequest, ProblemError, ProblemService, SessionController,
    SessionSnapshot,
};
use tokio::sync::Notify;

use crate::context::{UiApp, build_app_context};
use crate::views::GeneratorView;
use crate::views::generator::{GeneratorIntent, GeneratorTestHandles};

/// Completion endpoint that answers with the same text, optionally held back
/// until the test opens the gate.
pub struct CannedApi {
    reply: String,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl CompletionApi for CannedApi {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProblemError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self.reply.clone())
    }
}

#[derive(Clone)]
struct TestApp {
    clock: Clock,
    problems: Arc<ProblemService>,
    session: SessionController,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.clock
    }

    fn problems(&self) -> Arc<ProblemService> {
        Arc::clone(&self.problems)
    }

    fn new_session(&self) -> SessionController {
        self.session.clone()
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: GeneratorTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn GeneratorHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { GeneratorView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: GeneratorTestHandles,
    pub gate: Arc<Notify>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Send one intent through the view's dispatcher and re-render.
    pub fn dispatch(&mut self, intent: GeneratorIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let snapshot = self.handles.snapshot();
        self.dom.in_runtime(|| snapshot.peek().clone())
    }

    /// Let the held-back completion answer, then wait for the spawned fetch to land.
    pub async fn release_fetch(&mut self) {
        self.gate.notify_one();
        for _ in 0..10 {
            if !self.snapshot().generating {
                break;
            }
            self.drive_async().await;
        }
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn problems_replying(reply: &str, gate: Option<Arc<Notify>>) -> Arc<ProblemService> {
    let api: Arc<dyn CompletionApi> = Arc::new(CannedApi {
        reply: reply.to_string(),
        gate,
    });
    Arc::new(ProblemService::new(Some(api), GenerationSettings::default()))
}

fn harness_for(
    clock: Clock,
    problems: Arc<ProblemService>,
    session: SessionController,
    gate: Arc<Notify>,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        clock,
        problems,
        session,
    });
    let handles = GeneratorTestHandles::default();
    let dom = VirtualDom::new_with_props(
        GeneratorHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, handles, gate }
}

/// A session that has not generated anything yet.
pub fn setup_idle_harness() -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let problems = problems_replying("Problem: unused", None);
    let session = SessionController::new(RateLimitSettings::default());
    harness_for(clock, problems, session, Arc::new(Notify::new()))
}

/// A fresh session whose completions wait for `ViewHarness::release_fetch`.
pub fn setup_gated_harness(reply: &str) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let gate = Arc::new(Notify::new());
    let problems = problems_replying(reply, Some(Arc::clone(&gate)));
    let session = SessionController::new(RateLimitSettings::default());
    harness_for(clock, problems, session, gate)
}

/// A session that already holds a generated problem with its solution revealed.
pub async fn setup_generated_harness(reply: &str) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let problems = problems_replying(reply, None);
    let mut session = SessionController::new(RateLimitSettings::default());
    session
        .run_generation(&problems, ProblemRequest::default(), clock.now())
        .await;
    session.toggle_solution();
    harness_for(clock, problems, session, Arc::new(Notify::new()))
}
