use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

/// Lowercases `text`, collapses every run of non-word characters into a
/// single `-` and trims hyphens from both ends.
pub fn slugify(text: &str) -> String {
    lazy_static! {
        static ref NON_WORD_REGEX: Regex = Regex::new(r"\W+").unwrap();
    }

    let lowered = text.to_lowercase();
    NON_WORD_REGEX.replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Slug used as an output file base name. Text that slugifies to nothing is
/// kept as written.
pub fn file_slug(text: &str) -> String {
    match slugify(text) {
        s if s.is_empty() => text.trim().to_string(),
        s => s,
    }
}

pub fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
