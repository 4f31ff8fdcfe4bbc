use chrono::{DateTime, TimeZone};
use regex::Regex;
use std::fmt::Display;
use std::sync::OnceLock;

/// Longest prompt-derived stem kept in a generated filename, in characters.
pub const MAX_STEM_LENGTH: usize = 50;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("static pattern compiles"))
}

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-\s]+").expect("static pattern compiles"))
}

/// Filesystem-safe stem derived from a prompt.
///
/// Lowercases, drops everything but word characters, whitespace and `-`,
/// folds separator runs into `_`, and caps the result at
/// [`MAX_STEM_LENGTH`] characters without a trailing `_`.
pub fn prompt_stem(prompt: &str) -> String {
    let lowered = prompt.to_lowercase();
    let cleaned = disallowed_chars().replace_all(&lowered, "");
    let joined = separator_runs().replace_all(&cleaned, "_");

    if joined.chars().count() > MAX_STEM_LENGTH {
        let truncated: String = joined.chars().take(MAX_STEM_LENGTH).collect();
        truncated.trim_end_matches('_').to_string()
    } else {
        joined.into_owned()
    }
}

/// `<stem>_<YYYYMMDD_HHMMSS>_<generation_id>.png`
pub fn safe_filename<Tz>(prompt: &str, generation_id: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}_{}_{}.png",
        prompt_stem(prompt),
        timestamp.format(TIMESTAMP_FORMAT),
        generation_id
    )
}
