//! Minimal HTML string helpers.

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Joins the class names whose condition holds.
pub fn classes<'a>(parts: impl IntoIterator<Item = (&'a str, bool)>) -> String {
    let mut out = String::new();
    for (class, enabled) in parts {
        if !enabled || class.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(class);
    }
    out
}

/// `<div class="...">children</div>`; children are inserted verbatim.
pub fn div(class: &str, children: &str) -> String {
    format!("<div class=\"{}\">{children}</div>", escape(class))
}

pub fn text_div(class: &str, text: &str) -> String {
    div(class, &escape(text))
}
