use std::sync::LazyLock;

use regex::Regex;

// `$5 million$`: a single-dollar "math" span that is really a price followed by words.
static CURRENCY_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^$])\$(\d[\d,.]*\s+[A-Za-z](?:[^$]*[^\s$])?)\$")
        .expect("currency span pattern is valid")
});

// `$5 million dollars`: an unterminated dollar sign in front of an amount.
static CURRENCY_SIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^$])\$(\d[\d,.]*\s+[A-Za-z])").expect("currency sign pattern is valid")
});

/// Unwrap dollar amounts that the model wrote inside inline-math delimiters.
///
/// Heuristic: any single-dollar span whose body starts with a number, whitespace
/// and a letter is treated as prose, including real math such as `$3 x$`.
/// Display math (`$$…$$`) is left alone.
#[must_use]
pub fn sanitize_math_markup(text: &str) -> String {
    let unwrapped = CURRENCY_SPAN.replace_all(text, "${1}${2}");
    CURRENCY_SIGN.replace_all(&unwrapped, "${1}${2}").into_owned()
}
