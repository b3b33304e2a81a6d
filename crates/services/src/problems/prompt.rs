use premise_core::model::ProblemRequest;

/// Render the user prompt for one generation request.
///
/// Pure template substitution; the premise is passed through as-is.
#[must_use]
pub fn build_prompt(request: &ProblemRequest) -> String {
    format!(
        "Generate a creative, high-quality {category} math problem for a {age} student based on the following premise: '{premise}'. \
         The problem should be engaging and context-rich, suitable for a learner. \
         After the problem, provide a clear, step-by-step solution.\n\n\
         Format all equations and math expressions using LaTeX in dollar signs (e.g., $x^2+1$ for inline, $$x^2+1$$ for display math) so they render correctly.\n\
         Format your response as:\nProblem: <problem statement>\nSolution: <solution>",
        category = request.category.label(),
        age = request.age_category.label(),
        premise = request.premise,
    )
}
