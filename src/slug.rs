use std::sync::OnceLock;

use md5::{Digest, Md5};
use regex::Regex;

fn disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9 -]").expect("valid regex"))
}

fn spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" +").expect("valid regex"))
}

/// Turn a free-form title into a token safe for file names and URLs.
///
/// Keeps only `a-z`, `0-9`, space and `-` after lower-casing, trims, and joins
/// words with `_`. A title that reduces to nothing becomes `post<md5 hex>`,
/// so the result is never empty.
pub fn title_to_key(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept = disallowed().replace_all(&lowered, "");
    let key = spaces().replace_all(kept.trim(), "_").into_owned();

    if key.is_empty() {
        // Hash the original title, not the stripped one
        format!("post{:x}", Md5::digest(title.as_bytes()))
    } else {
        key
    }
}
