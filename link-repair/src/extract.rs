//! URL candidate extraction from raw comment markup.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// `[label](destination)`; non-greedy on both parts and single-line, so a `)` inside the
/// destination ends the match and the remainder stays in the text.
static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("markdown link regex"));

/// Scheme URLs, `www.` hosts, and bare `host.tld/` paths, captured in group 1. The prefix is the
/// start of text or any non-alphanumeric character, so a URL directly after an emphasis marker
/// (`_https://...`) still matches with its scheme. Backslashes are allowed in the body since
/// escape artifacts are exactly what we look for.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:^|[^a-z0-9])((?:[a-z][a-z0-9+.-]*://|www\.|[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,63}/)[^\s<>"\[\]]*)"#,
    )
    .expect("url regex")
});

/// Sentence punctuation that is never kept at the end of a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

/// Markdown emphasis markers (`*em*`, `**strong**`, `_em_`, `~~strike~~`).
const EMPHASIS_MARKERS: &[char] = &['*', '_', '~'];

/// Replaces every `[label](destination)` with `destination`, so a URL-looking label is never
/// taken for the link target.
pub fn unwrap_markdown_links(body: &str) -> Cow<'_, str> {
    MARKDOWN_LINK_RE.replace_all(body, "$2")
}

/// Drops trailing punctuation and closing parentheses that have no opening partner in the URL.
fn trim_url(candidate: &str) -> &str {
    let mut url = candidate;
    loop {
        let Some(last) = url.chars().last() else {
            return url;
        };
        let unbalanced_paren =
            last == ')' && url.matches(')').count() > url.matches('(').count();
        if TRAILING_PUNCTUATION.contains(&last) || unbalanced_paren {
            url = &url[..url.len() - last.len_utf8()];
        } else {
            return url;
        }
    }
}

/// Removes the closing half of an emphasis run that opened right before the URL, e.g. the
/// trailing `**` of `**https://x.org/a**`. Tries the full run, then shorter tails of it. A marker
/// preceded by a backslash is an escape inside the URL and stays.
fn strip_emphasis_closer<'a>(url: &'a str, opener: &str) -> &'a str {
    let mut run = opener;
    while !run.is_empty() {
        if let Some(rest) = url.strip_suffix(run) {
            if rest.is_empty() || rest.ends_with('\\') {
                return url;
            }
            return rest;
        }
        run = &run[1..];
    }
    url
}

/// Cleans one regex match: trailing punctuation, then an emphasis closer matching the markers
/// directly before `start`, then punctuation again (`**https://x.org/a**.`).
fn clean_candidate<'a>(text: &str, start: usize, candidate: &'a str) -> &'a str {
    let before = &text[..start];
    let opener = &before[before.trim_end_matches(EMPHASIS_MARKERS).len()..];
    let url = trim_url(candidate);
    if opener.is_empty() {
        return url;
    }
    trim_url(strip_emphasis_closer(url, opener))
}

/// Returns the unique URL-like substrings of `body` after markdown-link unwrapping, in the
/// order they first appear. Text without URLs yields an empty vector.
pub fn extract_urls(body: &str) -> Vec<String> {
    let text = unwrap_markdown_links(body);
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for caps in URL_RE.captures_iter(&text) {
        let Some(found) = caps.get(1) else {
            continue;
        };
        let url = clean_candidate(&text, found.start(), found.as_str());
        if url.is_empty() || url.ends_with("://") {
            continue;
        }
        if seen.insert(url.to_string()) {
            urls.push(url.to_string());
        }
    }

    urls
}
