use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// An HTML page with `{{slot}}` placeholders, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("loading template {}", path.display()))?;

        debug!("Loaded template {} ({} bytes)", path.display(), source.len());
        Ok(Self { source })
    }

    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Substitute each `{{key}}` with its value in a single pass over the
    /// source, so text inside a value is never treated as a placeholder.
    /// Values are inserted as-is; callers escape anything user-supplied.
    /// Unknown placeholders are left alone.
    pub fn render(&self, slots: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                rest = &rest[open..];
                break;
            };

            let key = &after[..close];
            match slots.iter().find(|(k, _)| *k == key) {
                Some((_, value)) => out.push_str(value),
                None => out.push_str(&rest[open..open + 2 + close + 2]),
            }
            rest = &after[close + 2..];
        }

        out.push_str(rest);
        out
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
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
    fn render_fills_slots() {
        let t = Template::from_source("<ul>{{items}}</ul><p>{{updated}}</p>");
        let page = t.render(&[("items", "<li>a</li>"), ("updated", "now")]);
        assert_eq!(page, "<ul><li>a</li></ul><p>now</p>");
    }

    #[test]
    fn render_without_slots_is_verbatim() {
        let t = Template::from_source("<html>{{items}}</html>");
        assert_eq!(t.render(&[]), "<html>{{items}}</html>");
    }

    #[test]
    fn values_are_not_rescanned() {
        let t = Template::from_source("<ul>{{items}}</ul><p>{{updated}}</p>");
        let page = t.render(&[("items", "<li>remember {{updated}}</li>"), ("updated", "now")]);
        assert_eq!(page, "<ul><li>remember {{updated}}</li></ul><p>now</p>");
    }

    #[test]
    fn repeated_and_unterminated_placeholders() {
        let t = Template::from_source("{{a}}-{{a}}-{{b}}-{{a");
        assert_eq!(t.render(&[("a", "x")]), "x-x-{{b}}-{{a");
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&#34;x&#34;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn load_missing_file_fails() {
        let err = Template::load(Path::new("/nonexistent/dir/index.html")).unwrap_err();
        assert!(err.to_string().contains("index.html"));
    }
}
