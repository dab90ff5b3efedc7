//! Template filters for emitting PHP source.

use minijinja::Environment;

/// Quote `value` as a PHP single-quoted string literal.
///
/// Inside single quotes PHP only interprets `\\` and `\'`, so those are the
/// only characters escaped.
pub fn phpquote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if matches!(ch, '\\' | '\'') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

/// Register the PHP filters with a MiniJinja environment.
pub fn register_filters(env: &mut Environment) {
    env.add_filter("phpquote", |value: String| phpquote(&value));
}
