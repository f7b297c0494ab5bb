use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Canonical address shape: local part, `@`, domain, dot, TLD of two or
/// more letters.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

/// Returns every distinct address in the search space, in order of first
/// occurrence.
///
/// Comparison is exact; `A@example.com` and `a@example.com` are two entries.
pub fn find_emails(search_space: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    EMAIL_RE
        .find_iter(search_space)
        .map(|m| m.as_str())
        .filter(|email| seen.insert(*email))
        .map(str::to_string)
        .collect()
}

/// The first address in the search space, if any
pub fn first_email(search_space: &str) -> Option<String> {
    find_emails(search_space).into_iter().next()
}
