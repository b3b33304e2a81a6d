use serde::{Deserialize, Serialize};

use crate::model::{AgeCategory, Category};

/// The user's inputs captured when generation is triggered.
///
/// The premise is free text and intentionally not validated; an empty
/// premise is a valid request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProblemRequest {
    pub premise: String,
    pub category: Category,
    pub age_category: AgeCategory,
}

impl ProblemRequest {
    #[must_use]
    pub fn new(premise: impl Into<String>, category: Category, age_category: AgeCategory) -> Self {
        Self {
            premise: premise.into(),
            category,
            age_category,
        }
    }
}

impl Default for ProblemRequest {
    fn default() -> Self {
        Self::new("Taylor Swift", Category::default(), AgeCategory::default())
    }
}

/// A problem statement and its (optional) worked solution, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedProblem {
    pub problem: String,
    pub solution: Option<String>,
}

impl GeneratedProblem {
    #[must_use]
    pub fn new(problem: impl Into<String>, solution: Option<String>) -> Self {
        Self {
            problem: problem.into(),
            solution,
        }
    }

    /// True when a non-empty solution is present.
    #[must_use]
    pub fn has_solution(&self) -> bool {
        self.solution
            .as_deref()
            .is_some_and(|solution| !solution.trim().is_empty())
    }
}
