//! Page rendering helpers.
//!
//! DESIGN
//! ======
//! Pages are static HTML files compiled in with `include_str!`, with
//! `{{NAME}}` slots filled by plain string replacement. Every user-supplied
//! value goes through `escape_html` before it reaches a slot.

/// Escape a value for interpolation into HTML text or attribute content.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Fill a template's `{{NAME}}` slots. Values are inserted verbatim, so
/// anything user-supplied must already be escaped.
#[must_use]
pub fn render(template: &str, slots: &[(&str, &str)]) -> String {
    let mut page = template.to_owned();
    for (name, value) in slots {
        page = page.replace(&format!("{{{{{name}}}}}"), value);
    }
    page
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
