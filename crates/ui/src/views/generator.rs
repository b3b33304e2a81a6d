use dioxus::prelude::*;

use premise_core::model::{AgeCategory, Category};
use services::{Clock, Effect, SessionController, SessionEvent, SessionSnapshot};

use crate::context::AppContext;
use crate::vm::{GENERATE_LABEL, GeneratorVm, map_generator_vm};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum GeneratorIntent {
    SetPremise(String),
    SelectCategory(Category),
    SelectAge(AgeCategory),
    Generate,
    ToggleSolution,
}

/// Feed one event to the controller and publish the next snapshot.
fn dispatch(
    mut controller: Signal<SessionController>,
    mut snapshot: Signal<SessionSnapshot>,
    event: SessionEvent,
) -> Effect {
    let effect = controller.write().handle(event);
    let next = controller.write().render();
    snapshot.set(next);
    effect
}

#[component]
pub fn GeneratorView() -> Element {
    let ctx = use_context::<AppContext>();
    let clock: Clock = ctx.clock();
    let problems = ctx.problems();

    let controller = use_signal(|| ctx.new_session());
    let snapshot = use_signal(|| controller.peek().snapshot());

    let dispatch_intent = use_callback(move |intent: GeneratorIntent| {
        let mut inputs = snapshot.peek().inputs.clone();
        let event = match intent {
            GeneratorIntent::SetPremise(premise) => {
                inputs.premise = premise;
                SessionEvent::InputsChanged(inputs)
            }
            GeneratorIntent::SelectCategory(category) => {
                inputs.category = category;
                SessionEvent::InputsChanged(inputs)
            }
            GeneratorIntent::SelectAge(age) => {
                inputs.age_category = age;
                SessionEvent::InputsChanged(inputs)
            }
            GeneratorIntent::Generate => SessionEvent::GenerateTriggered {
                request: inputs,
                now: clock.now(),
            },
            GeneratorIntent::ToggleSolution => SessionEvent::ToggleSolution,
        };

        if let Effect::Fetch(request) = dispatch(controller, snapshot, event) {
            let problems = problems.clone();
            tracing::debug!(
                premise = %request.premise,
                category = %request.category,
                "spawning problem fetch"
            );
            spawn(async move {
                let result = problems.generate(&request).await;
                dispatch(controller, snapshot, SessionEvent::FetchCompleted(result));
            });
        }
    });

    #[cfg(test)]
    use_hook(|| {
        if let Some(handles) = try_consume_context::<GeneratorTestHandles>() {
            handles.register(dispatch_intent, snapshot);
        }
    });

    let vm = map_generator_vm(&snapshot.read());

    rsx! {
        div { class: "page",
            h1 { "Math Problem Generator" }
            p {
                "Enter a premise (e.g., a name, topic, or idea) and select a math category. "
                "The AI will generate a creative math problem for you!"
            }

            div { class: "generator-form",
                label {
                    "Premise"
                    input {
                        r#type: "text",
                        value: "{vm.premise}",
                        oninput: move |evt| {
                            dispatch_intent.call(GeneratorIntent::SetPremise(evt.value()));
                        },
                    }
                }
                label {
                    "Category"
                    select {
                        value: "{vm.category.label()}",
                        onchange: move |evt| {
                            if let Ok(category) = evt.value().parse::<Category>() {
                                dispatch_intent.call(GeneratorIntent::SelectCategory(category));
                            }
                        },
                        for category in Category::ALL {
                            option {
                                value: "{category.label()}",
                                selected: category == vm.category,
                                "{category.label()}"
                            }
                        }
                    }
                }
                label {
                    "Age Category"
                    select {
                        value: "{vm.age_category.label()}",
                        onchange: move |evt| {
                            if let Ok(age) = evt.value().parse::<AgeCategory>() {
                                dispatch_intent.call(GeneratorIntent::SelectAge(age));
                            }
                        },
                        for age in AgeCategory::ALL {
                            option {
                                value: "{age.label()}",
                                selected: age == vm.age_category,
                                "{age.label()}"
                            }
                        }
                    }
                }
            }

            button {
                class: "btn",
                r#type: "button",
                disabled: vm.generate_disabled,
                onclick: move |_| dispatch_intent.call(GeneratorIntent::Generate),
                "{GENERATE_LABEL}"
            }

            ProblemPanel {
                vm: vm.clone(),
                on_toggle: move |()| dispatch_intent.call(GeneratorIntent::ToggleSolution),
            }
        }
    }
}

#[component]
fn ProblemPanel(vm: GeneratorVm, on_toggle: EventHandler<()>) -> Element {
    rsx! {
        if let Some(label) = vm.spinner_label {
            p { class: "spinner", "{label}" }
        }
        if let Some(warning) = vm.warning.as_ref() {
            div { class: "banner banner-warning", "{warning}" }
        }
        if let Some(error) = vm.error.as_ref() {
            div { class: "banner banner-error", "{error}" }
        }
        if let Some(notice) = vm.notice.as_ref() {
            div { class: "banner banner-notice", "{notice}" }
        }
        if let Some(problem_html) = vm.problem_html.as_ref() {
            section { class: "problem",
                h3 { "Problem:" }
                div { class: "problem-text", dangerous_inner_html: "{problem_html}" }

                if let Some(label) = vm.solution_toggle_label {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_toggle.call(()),
                        "{label}"
                    }
                }
                if let Some(solution_html) = vm.solution_html.as_ref() {
                    h3 { "Solution:" }
                    div { class: "solution-text", dangerous_inner_html: "{solution_html}" }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct GeneratorTestHandles {
    dispatch: std::rc::Rc<std::cell::RefCell<Option<Callback<GeneratorIntent>>>>,
    snapshot: std::rc::Rc<std::cell::RefCell<Option<Signal<SessionSnapshot>>>>,
}

#[cfg(test)]
impl GeneratorTestHandles {
    fn register(&self, dispatch: Callback<GeneratorIntent>, snapshot: Signal<SessionSnapshot>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.snapshot.borrow_mut() = Some(snapshot);
    }

    pub(crate) fn dispatch(&self) -> Callback<GeneratorIntent> {
        (*self.dispatch.borrow()).expect("generator dispatch registered")
    }

    pub(crate) fn snapshot(&self) -> Signal<SessionSnapshot> {
        (*self.snapshot.borrow()).expect("generator snapshot registered")
    }
}
