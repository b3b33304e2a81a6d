use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown age category: {0}")]
    UnknownAgeCategory(String),
}

//
// ─── MATH CATEGORY ────────────────────────────────────────────────────────────
//

/// Math topic the generated problem should exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Algebra,
    Geometry,
    Logarithms,
    Sequences,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Algebra,
        Category::Geometry,
        Category::Logarithms,
        Category::Sequences,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Algebra => "Algebra",
            Category::Geometry => "Geometry",
            Category::Logarithms => "Logarithms",
            Category::Sequences => "Sequences",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CategoryError::UnknownCategory(value.to_string()))
    }
}

//
// ─── AGE CATEGORY ─────────────────────────────────────────────────────────────
//

/// Learner level the problem is pitched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgeCategory {
    #[default]
    Elementary,
    MiddleSchool,
    HighSchool,
    College,
}

impl AgeCategory {
    pub const ALL: [AgeCategory; 4] = [
        AgeCategory::Elementary,
        AgeCategory::MiddleSchool,
        AgeCategory::HighSchool,
        AgeCategory::College,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AgeCategory::Elementary => "Elementary",
            AgeCategory::MiddleSchool => "Middle School",
            AgeCategory::HighSchool => "High School",
            AgeCategory::College => "College",
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeCategory {
    type Err = CategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        // Accept "middle-school" style CLI spellings as well as the labels.
        let normalized = trimmed.replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|age| age.label().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| CategoryError::UnknownAgeCategory(value.to_string()))
    }
}
