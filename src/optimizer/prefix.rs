//! Identifier namespacing rules.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// References to fragments starting with this are shared across icons and
/// must survive merging unprefixed.
pub const SHARED_FRAGMENT_PREFIX: &str = "icon-";

static URL_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"url\(\s*(['"]?)#([^'")\s]+)(['"]?)\s*\)"#).unwrap());

static SELECTOR_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.#])(-?[_a-zA-Z][_a-zA-Z0-9-]*)").unwrap());

/// Namespace a single identifier.
fn namespaced(name: &str, prefix: &str) -> String {
    format!("{prefix}__{name}")
}

/// Namespace the target of a fragment reference (without the `#`).
pub fn prefix_reference(target: &str, prefix: &str) -> String {
    if target.starts_with(SHARED_FRAGMENT_PREFIX) {
        target.to_string()
    } else {
        namespaced(target, prefix)
    }
}

/// Rewrite every `url(#target)` in an attribute value or declaration block.
pub fn prefix_urls<'a>(value: &'a str, prefix: &str) -> Cow<'a, str> {
    URL_REF.replace_all(value, |caps: &Captures| {
        format!(
            "url({}#{}{})",
            &caps[1],
            prefix_reference(&caps[2], prefix),
            &caps[3]
        )
    })
}

/// Namespace each token of a `class` attribute.
pub fn prefix_class_list(value: &str, prefix: &str) -> String {
    value
        .split_whitespace()
        .map(|class| namespaced(class, prefix))
        .collect::<Vec<_>>()
        .join(" ")
}

fn prefix_selectors<'a>(selectors: &'a str, prefix: &str) -> Cow<'a, str> {
    SELECTOR_NAME.replace_all(selectors, |caps: &Captures| {
        format!("{}{}", &caps[1], namespaced(&caps[2], prefix))
    })
}

/// Namespace `#id` and `.class` selectors and `url(#…)` references in a
/// stylesheet.
///
/// Text before a `{` is a selector list (unless it is an at-rule prelude);
/// everything else is declarations, where only `url()` references change.
pub fn prefix_css(css: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(css.len() + 32);
    let mut rest = css;

    while let Some(pos) = rest.find(|c: char| c == '{' || c == '}') {
        let (segment, tail) = rest.split_at(pos);
        let opens_block = tail.starts_with('{');

        if opens_block && !segment.trim_start().starts_with('@') {
            out.push_str(&prefix_selectors(segment, prefix));
        } else {
            out.push_str(&prefix_urls(segment, prefix));
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(&prefix_urls(rest, prefix));
    out
}
