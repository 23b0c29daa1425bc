//! Attribute initializer overrides stored in an element's run state.
//!
//! The run state is a flat string of `Variable=<name>;Value=<value>;`
//! fragments. It is searched by substring, never tokenized, so values are
//! read verbatim up to the next `;`.

use indexmap::IndexMap;

/// Look up the override recorded for `name`, if any.
///
/// A value missing its terminating `;` runs to the end of the string.
///
/// # Examples
///
/// ```
/// use mopro_core::run_state::override_value;
///
/// let run_state = "Variable=size;Value=42;";
/// assert_eq!(override_value(run_state, "size"), Some("42"));
/// assert_eq!(override_value(run_state, "color"), None);
/// ```
pub fn override_value<'a>(run_state: &'a str, name: &str) -> Option<&'a str> {
    let key = format!("Variable={name};Value=");
    let start = run_state.find(&key)? + key.len();
    let rest = &run_state[start..];
    Some(rest.find(';').map_or(rest, |end| &rest[..end]))
}

/// Replace every attribute value that has a run-state override.
///
/// Attributes without an override keep their value. Order is preserved.
pub fn apply_overrides(run_state: &str, attributes: &mut IndexMap<String, String>) {
    if run_state.is_empty() {
        return;
    }
    for (name, value) in attributes.iter_mut() {
        if let Some(overridden) = override_value(run_state, name) {
            *value = overridden.to_string();
        }
    }
}
