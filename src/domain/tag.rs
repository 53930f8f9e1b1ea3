//! Tag naming conventions inferred from existing repository tags

/// Prefix placed in front of a version to form a tag name
pub const VERSION_PREFIX: &str = "v";

/// Infer whether the repository prefixes version tags with `v`
///
/// Counts tags shaped like `v<digit>...` against bare `<digit>...` tags.
/// The `v` form wins ties, including the case of no tags at all.
pub fn infer_prefix<S: AsRef<str>>(tags: &[S]) -> &'static str {
    let mut prefixed = 0usize;
    let mut bare = 0usize;

    for tag in tags {
        let tag = tag.as_ref();
        if let Some(rest) = tag.strip_prefix(VERSION_PREFIX) {
            if rest.starts_with(|c: char| c.is_ascii_digit()) {
                prefixed += 1;
            }
        } else if tag.starts_with(|c: char| c.is_ascii_digit()) {
            bare += 1;
        }
    }

    if prefixed >= bare {
        VERSION_PREFIX
    } else {
        ""
    }
}

/// Build a tag name for `version` using the convention of `tags`
pub fn format_tag<S: AsRef<str>>(version: &str, tags: &[S]) -> String {
    let prefix = infer_prefix(tags);
    if prefix == VERSION_PREFIX && version.starts_with(VERSION_PREFIX) {
        return version.to_string();
    }
    format!("{}{}", prefix, version)
}

/// Version carried by a tag name (e.g. "v1.2.3" -> "1.2.3")
pub fn version_part(tag: &str) -> &str {
    tag.strip_prefix(VERSION_PREFIX).unwrap_or(tag)
}
