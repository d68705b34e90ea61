//! LaTeX escaping for user-supplied text and hyperlink targets.
//!
//! Both functions walk the input once and map each character independently,
//! so an escape sequence that has already been emitted is never re-escaped.

/// Replacement for a LaTeX special character, or `None` if it passes through.
fn latex_escape_for(c: char) -> Option<&'static str> {
    match c {
        '&' => Some(r"\&"),
        '%' => Some(r"\%"),
        '$' => Some(r"\$"),
        '#' => Some(r"\#"),
        '^' => Some(r"\textasciicircum{}"),
        '_' => Some(r"\_"),
        '{' => Some(r"\{"),
        '}' => Some(r"\}"),
        '~' => Some(r"\textasciitilde{}"),
        '\\' => Some(r"\textbackslash{}"),
        _ => None,
    }
}

/// Escapes free text for embedding in LaTeX body content.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match latex_escape_for(c) {
            Some(escaped) => out.push_str(escaped),
            None => out.push(c),
        }
    }
    out
}

/// Makes a URL safe to place inside `\href{...}`.
///
/// `%` and `#` use the backslash forms hyperref understands even when the
/// `\href` sits inside another command's argument. Braces, backslashes and
/// spaces are percent-encoded so the argument stays balanced.
pub fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.trim().chars() {
        match c {
            '%' => out.push_str(r"\%"),
            '#' => out.push_str(r"\#"),
            '{' => out.push_str("%7B"),
            '}' => out.push_str("%7D"),
            '\\' => out.push_str("%5C"),
            ' ' => out.push_str("%20"),
            _ => out.push(c),
        }
    }
    out
}

/// Prepends `https://` unless the value already carries an http(s) scheme.
pub fn normalize_profile_url(value: &str) -> String {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
