//! Broken-URL predicate and repair.
//!
//! New-style markdown editors escape `_`, `*` and `~` inside links; old-style renderers show the
//! backslash literally, so the copied URL is wrong. A URL is broken when it contains one of these
//! two-character escape sequences.

use crate::extract::extract_urls;

/// Characters the platform escapes, in the order repairs are applied.
pub const PROBLEM_CHARACTERS: [char; 3] = ['_', '*', '~'];

fn escaped(c: char) -> String {
    format!("\\{}", c)
}

/// Returns true iff `url` contains `\_`, `\*` or `\~`.
pub fn is_broken_url(url: &str) -> bool {
    PROBLEM_CHARACTERS
        .iter()
        .any(|&c| url.contains(escaped(c).as_str()))
}

/// One pass: replaces every `\<c>` with `<c>` for each problem character in declared order.
fn unescape_once(url: &str) -> String {
    PROBLEM_CHARACTERS
        .iter()
        .fold(url.to_string(), |fixed, &c| {
            fixed.replace(escaped(c).as_str(), &c.to_string())
        })
}

/// Undoes the markdown escaping of problem characters.
///
/// Passes repeat until no escape sequence is left, so a doubled backslash (`\\_`) collapses
/// fully and the result is a fixed point: `fix_broken_url(fix_broken_url(u)) == fix_broken_url(u)`.
pub fn fix_broken_url(url: &str) -> String {
    let mut fixed = unescape_once(url);
    while is_broken_url(&fixed) {
        fixed = unescape_once(&fixed);
    }
    fixed
}

pub fn fix_broken_urls(urls: &[String]) -> Vec<String> {
    urls.iter().map(|url| fix_broken_url(url)).collect()
}

/// Extracts URL candidates from `body` and keeps only the broken ones.
pub fn find_broken_urls(body: &str) -> Vec<String> {
    extract_urls(body)
        .into_iter()
        .filter(|url| is_broken_url(url))
        .collect()
}
