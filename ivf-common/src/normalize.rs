//! Influencer name normalization
//!
//! The normalized name is the store's lookup key and the value fixtures are
//! matched against. Two names that differ only by case, punctuation or a
//! leading "Dr."/"Dr" honorific map to the same key.

/// Normalize a display name into its lookup key
///
/// Lower-cases, strips a leading `dr`/`dr.` honorific followed by whitespace,
/// turns every character outside `[a-z0-9]` into a space, collapses runs of
/// whitespace and trims. Never fails; degenerate input yields `""`.
///
/// The result is a fixed point: a honorific that only becomes visible once
/// punctuation is replaced (e.g. `"Dr. Dr. Smith"`) is stripped as well, so
/// `normalize_name(&normalize_name(x)) == normalize_name(x)`.
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let without_title = strip_honorific(&lowered);

    let spaced: String = without_title
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut key = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    while let Some(rest) = key.strip_prefix("dr ") {
        key = rest.to_string();
    }

    key
}

/// Strip one leading `dr` or `dr.` that is followed by whitespace
fn strip_honorific(lowered: &str) -> &str {
    if let Some(rest) = lowered.strip_prefix("dr") {
        let rest = rest.strip_prefix('.').unwrap_or(rest);
        if rest.starts_with(char::is_whitespace) {
            return rest.trim_start();
        }
    }
    lowered
}
