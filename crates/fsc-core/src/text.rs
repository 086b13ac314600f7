//! Small text helpers shared by the HTML-producing crates.

/// Escape a string for interpolation into HTML text or a double-quoted
/// attribute.
pub fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_significant_characters() {
        assert_eq!(
            html_escape(r#"R&D <b>"quoted"</b> 'x'"#),
            "R&amp;D &lt;b&gt;&quot;quoted&quot;&lt;/b&gt; &#39;x&#39;"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_escape("Startup workforce by gender"), "Startup workforce by gender");
    }
}
