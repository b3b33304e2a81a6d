use crate::vm::{GENERATING_LABEL, map_generator_vm};

use super::generator::GeneratorIntent;
use super::test_harness::{setup_gated_harness, setup_generated_harness, setup_idle_harness};

#[tokio::test(flavor = "current_thread")]
async fn generator_view_smoke_renders_form() {
    let mut harness = setup_idle_harness();

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Math Problem Generator"), "missing title in {html}");
    assert!(html.contains("Generate Math Problem"), "missing button in {html}");
    assert!(html.contains("Taylor Swift"), "missing default premise in {html}");
    assert!(html.contains("Middle School"), "missing age option in {html}");
    assert!(!html.contains("Problem:"), "unexpected problem section in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn generator_view_smoke_renders_problem_and_solution() {
    let mut harness = setup_generated_harness(
        "Problem: Taylor sells 12 albums for $5 each.\nSolution: She earns 60 dollars.",
    )
    .await;

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Taylor sells 12 albums"), "missing problem in {html}");
    assert!(html.contains("Hide Solution"), "missing toggle in {html}");
    assert!(html.contains("She earns 60 dollars."), "missing solution in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn generator_view_smoke_hides_toggle_without_solution() {
    let mut harness = setup_generated_harness("Problem: How many guitars fit in a van?").await;

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("How many guitars"), "missing problem in {html}");
    assert!(!html.contains("Solution"), "unexpected solution toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn generator_intents_smoke_generate_then_cool_down() {
    let mut harness = setup_gated_harness(
        "Problem: Taylor plays 3 shows a night for 4 nights. How many shows?\nSolution: 12 shows.",
    );
    harness.rebuild();

    harness.dispatch(GeneratorIntent::SetPremise("Concert tour".into()));
    assert_eq!(harness.snapshot().inputs.premise, "Concert tour");

    harness.dispatch(GeneratorIntent::Generate);
    let snapshot = harness.snapshot();
    assert!(snapshot.generating);
    assert!(map_generator_vm(&snapshot).generate_disabled);
    let html = harness.render();
    assert!(html.contains(GENERATING_LABEL), "missing spinner in {html}");

    harness.release_fetch().await;
    let snapshot = harness.snapshot();
    assert!(!snapshot.generating);
    assert!(!map_generator_vm(&snapshot).generate_disabled);
    let html = harness.render();
    assert!(!html.contains(GENERATING_LABEL), "spinner still shown in {html}");
    assert!(html.contains("Taylor plays 3 shows"), "missing problem in {html}");
    assert!(html.contains("See Solution"), "missing toggle in {html}");

    // The clock is fixed, so the second trigger lands inside the cooldown window.
    harness.dispatch(GeneratorIntent::Generate);
    let cooldown = "Please wait 60 seconds before generating another problem.";
    let html = harness.render();
    assert!(html.contains(cooldown), "missing cooldown banner in {html}");
    assert!(!harness.snapshot().generating);
    assert!(html.contains("Taylor plays 3 shows"), "problem lost in {html}");

    harness.dispatch(GeneratorIntent::ToggleSolution);
    let html = harness.render();
    assert!(!html.contains(cooldown), "cooldown banner shown twice in {html}");
    assert!(html.contains("12 shows."), "missing solution in {html}");
    assert!(html.contains("Hide Solution"), "missing toggle in {html}");
}
