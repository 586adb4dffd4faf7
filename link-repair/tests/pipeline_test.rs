//! End-to-end tests for the text pipeline: extract → detect → repair → compose.
//! BDD style: each test documents the scenario and expected outcome.

use link_repair::{
    compose_reply, extract_urls, find_broken_urls, fix_broken_url, fix_broken_urls, is_broken_url,
};

/// **Test: A broken label over a clean destination produces no broken URL.**
///
/// **Setup:** Body `[https://x/a\_b](https://x/c)`.
/// **Expected:** The only extracted URL is the destination `https://x/c`; nothing is broken.
#[test]
fn label_is_never_taken_for_destination() {
    let body = "[https://x/a\\_b](https://x/c)";
    assert_eq!(extract_urls(body), vec!["https://x/c"]);
    assert!(find_broken_urls(body).is_empty());
}

/// **Test: A broken destination hidden behind a clean label is found.**
#[test]
fn broken_destination_behind_clean_label_is_found() {
    let body = "[https://en.wikipedia.org/wiki/Snake_case](https://en.wikipedia.org/wiki/Snake\\_case)";
    assert_eq!(
        find_broken_urls(body),
        vec!["https://en.wikipedia.org/wiki/Snake\\_case"]
    );
}

/// **Test: Unwrapping yields B and never A for `[A](B)`.**
#[test]
fn markdown_unwrap_never_yields_label() {
    for (label, dest) in [
        ("https://label.org/a", "https://dest.org/b"),
        ("www.label.org", "https://dest.org/\\_x"),
        ("plain words", "https://dest.org/c"),
    ] {
        let urls = extract_urls(&format!("[{}]({})", label, dest));
        assert_eq!(urls, vec![dest.to_string()]);
    }
}

/// **Test: Snake_case scenario end to end.**
///
/// **Setup:** Body `See https://en.wikipedia.org/wiki/Snake\_case`.
/// **Expected:** Flagged as broken; repaired URL appears exactly once in the composed reply.
#[test]
fn snake_case_reply_contains_fixed_url_once() {
    let broken = find_broken_urls("See https://en.wikipedia.org/wiki/Snake\\_case");
    assert_eq!(broken, vec!["https://en.wikipedia.org/wiki/Snake\\_case"]);

    let fixed = fix_broken_urls(&broken);
    assert_eq!(fixed, vec!["https://en.wikipedia.org/wiki/Snake_case"]);

    let reply = compose_reply(&fixed);
    assert_eq!(
        reply.matches("https://en.wikipedia.org/wiki/Snake_case").count(),
        1
    );
    assert!(!reply.contains("Snake\\_case"));
}

/// **Test: Repeated broken URLs are reported once.**
#[test]
fn repeated_urls_are_unique() {
    let body = "https://x.org/a\\_b and again https://x.org/a\\_b";
    assert_eq!(find_broken_urls(body).len(), 1);
}

/// **Test: URLs without escapes are never broken and are unchanged by repair.**
#[test]
fn clean_urls_round_trip() {
    for url in [
        "https://en.wikipedia.org/wiki/Snake_case",
        "https://x.org/*star*",
        "https://x.org/~user/path",
        "https://x.org/back\\slash",
    ] {
        assert!(!is_broken_url(url));
        assert_eq!(fix_broken_url(url), url);
    }
}

/// **Test: Each escape artifact alone marks a URL broken, and repair is idempotent.**
#[test]
fn every_escape_is_detected_and_repair_is_idempotent() {
    for url in ["https://x.org/a\\_b", "https://x.org/a\\*b", "https://x.org/a\\~b"] {
        assert!(is_broken_url(url));
        let once = fix_broken_url(url);
        assert!(!is_broken_url(&once));
        assert_eq!(fix_broken_url(&once), once);
    }
}

/// **Test: Emphasis around a broken link does not leak into the repaired URL.**
///
/// **Setup:** Bold, italic, underscore-italic and strikethrough wrappers around broken links.
/// **Expected:** Each repaired URL is the bare link with the escape removed.
#[test]
fn emphasis_wrapped_links_repair_cleanly() {
    let body = "**https://x.org/a\\_b** _https://y.org/c\\_d_ ~~https://z.org/e\\*f~~ *https://w.org/g\\~h*";
    let fixed = fix_broken_urls(&find_broken_urls(body));
    assert_eq!(
        fixed,
        vec![
            "https://x.org/a_b",
            "https://y.org/c_d",
            "https://z.org/e*f",
            "https://w.org/g~h",
        ]
    );
}
