//! Prerelease label arithmetic for semantic versions
//!
//! Labels are dot-separated identifiers such as `rc.0` or `beta`.
//! See https://semver.org/#spec-item-9

/// Label attached to a release branch while it is being stabilised
pub const RELEASE_CANDIDATE: &str = "rc.0";

/// Next label in an iteration sequence
///
/// A single identifier gains a `.1` iteration (`beta` -> `beta.1`).
/// Otherwise the last identifier is treated as the iteration number and
/// incremented (`rc.9` -> `rc.10`). A last identifier without leading digits
/// counts as 0, so `alpha.beta` becomes `alpha.1` rather than failing.
pub fn next_iteration(label: &str) -> String {
    let mut parts: Vec<String> = label.split('.').map(str::to_string).collect();
    if parts.len() < 2 {
        return format!("{}.1", label);
    }

    if let Some(last) = parts.last_mut() {
        *last = next_number(last).to_string();
    }
    parts.join(".")
}

/// Leading digits plus one; a missing or unrepresentable number counts as 0
fn next_number(identifier: &str) -> u64 {
    let digits: String = identifier
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_add(1))
        .unwrap_or(1)
}
