use premise_core::model::{AgeCategory, Category};
use services::SessionSnapshot;

use crate::vm::markdown_to_html;

pub const GENERATE_LABEL: &str = "Generate Math Problem";
pub const GENERATING_LABEL: &str = "Generating problem...";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorVm {
    pub premise: String,
    pub category: Category,
    pub age_category: AgeCategory,
    pub generate_disabled: bool,
    pub spinner_label: Option<&'static str>,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub problem_html: Option<String>,
    pub solution_toggle_label: Option<&'static str>,
    pub solution_html: Option<String>,
}

#[must_use]
pub fn map_generator_vm(snapshot: &SessionSnapshot) -> GeneratorVm {
    let solution_toggle_label = match (&snapshot.solution, snapshot.show_solution) {
        (None, _) => None,
        (Some(_), true) => Some("Hide Solution"),
        (Some(_), false) => Some("See Solution"),
    };
    let problem_html = snapshot.problem.as_deref().map(markdown_to_html);
    // No solution without a problem to attach it to.
    let solution_html = snapshot
        .solution
        .as_deref()
        .filter(|_| snapshot.show_solution && problem_html.is_some())
        .map(markdown_to_html);

    GeneratorVm {
        premise: snapshot.inputs.premise.clone(),
        category: snapshot.inputs.category,
        age_category: snapshot.inputs.age_category,
        generate_disabled: !snapshot.generate_enabled,
        spinner_label: snapshot.generating.then_some(GENERATING_LABEL),
        warning: snapshot.cooldown_message.clone(),
        error: snapshot.error_message.clone(),
        notice: snapshot.notice.clone(),
        solution_toggle_label: solution_toggle_label.filter(|_| problem_html.is_some()),
        problem_html,
        solution_html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            generate_enabled: true,
            ..SessionSnapshot::default()
        }
    }

    #[test]
    fn idle_session_has_nothing_to_show() {
        let vm = map_generator_vm(&snapshot());
        assert!(!vm.generate_disabled);
        assert_eq!(vm.spinner_label, None);
        assert_eq!(vm.problem_html, None);
        assert_eq!(vm.solution_toggle_label, None);
        assert_eq!(vm.premise, "Taylor Swift");
    }

    #[test]
    fn generating_disables_button_and_shows_spinner() {
        let vm = map_generator_vm(&SessionSnapshot {
            generating: true,
            generate_enabled: false,
            ..snapshot()
        });
        assert!(vm.generate_disabled);
        assert_eq!(vm.spinner_label, Some(GENERATING_LABEL));
    }

    #[test]
    fn hidden_solution_offers_see_solution() {
        let vm = map_generator_vm(&SessionSnapshot {
            problem: Some("What is **2+2**?".into()),
            solution: Some("It is 4.".into()),
            ..snapshot()
        });
        assert_eq!(vm.solution_toggle_label, Some("See Solution"));
        assert_eq!(vm.solution_html, None);
        assert!(vm.problem_html.unwrap().contains("<strong>2+2</strong>"));
    }

    #[test]
    fn shown_solution_offers_hide_solution() {
        let vm = map_generator_vm(&SessionSnapshot {
            problem: Some("P".into()),
            solution: Some("S".into()),
            show_solution: true,
            ..snapshot()
        });
        assert_eq!(vm.solution_toggle_label, Some("Hide Solution"));
        assert_eq!(vm.solution_html.as_deref(), Some("<p>S</p>\n"));
    }

    #[test]
    fn banners_pass_through() {
        let vm = map_generator_vm(&SessionSnapshot {
            cooldown_message: Some("Please wait 30 seconds".into()),
            error_message: Some("boom".into()),
            ..snapshot()
        });
        assert_eq!(vm.warning.as_deref(), Some("Please wait 30 seconds"));
        assert_eq!(vm.error.as_deref(), Some("boom"));
    }
}
