use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// `(?s)` so the problem text may span lines before the solution marker.
static RESPONSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Problem:(.*?)(?:Solution:|$)(.*)").expect("response pattern is valid")
});

/// Non-fatal notes about a completion that did not follow the requested format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseWarning {
    /// No `Problem:` marker; the whole completion is shown as the problem.
    MissingProblemMarker,
    /// `Problem:` present but no `Solution:` marker.
    MissingSolutionMarker,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MissingProblemMarker => {
                f.write_str("The response was not in the expected format; showing it as-is.")
            }
            ParseWarning::MissingSolutionMarker => {
                f.write_str("The response did not include a solution.")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedResponse {
    pub problem: String,
    pub solution: Option<String>,
    pub warning: Option<ParseWarning>,
}

/// Split a completion into problem and solution text.
#[must_use]
pub fn parse_response(content: &str) -> ParsedResponse {
    let content = content.trim();
    let Some(caps) = RESPONSE_PATTERN.captures(content) else {
        return ParsedResponse {
            problem: content.to_string(),
            solution: None,
            warning: Some(ParseWarning::MissingProblemMarker),
        };
    };

    let problem_group = caps.get(1).map_or("", |m| m.as_str());
    let solution_group = caps.get(2).map_or("", |m| m.as_str());
    // When the lazy group runs to the end, `$` matched instead of the marker.
    let has_solution_marker = caps.get(1).is_some_and(|m| m.end() < content.len());

    let solution = Some(solution_group.trim().to_string()).filter(|text| !text.is_empty());

    ParsedResponse {
        problem: problem_group.trim().to_string(),
        solution,
        warning: (!has_solution_marker).then_some(ParseWarning::MissingSolutionMarker),
    }
}
