//! Lenient string-to-bool coercion shared by the probe and the resolver

/// Interpret common textual forms of "true"; everything else is false.
///
/// This never fails: server variables report `ON`/`OFF`, users write
/// `yes`/`true`/`1`, and unrecognized text is treated as off.
pub fn to_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "t" | "true" | "y" | "yes" | "on"
    )
}
