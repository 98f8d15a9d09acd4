//! Sanitization of summary markup before it is rendered into a page.
//!
//! Summaries are treated as untrusted HTML: formatting tags survive,
//! scripts, event handlers and other active content are stripped. The
//! raw text is still what gets mirrored into the hidden download field.

/// Clean summary markup for insertion into an output container.
pub fn sanitize_summary(raw: &str) -> String {
    ammonia::Builder::default()
        .link_rel(Some("noopener noreferrer"))
        .clean(raw)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_and_basic_tags_survive() {
        assert_eq!(sanitize_summary("Done."), "Done.");
        assert_eq!(sanitize_summary("<b>hello</b>"), "<b>hello</b>");
    }

    #[test]
    fn scripts_are_removed() {
        let out = sanitize_summary("ok<script>alert(1)</script>");
        assert_eq!(out, "ok");
    }

    #[test]
    fn event_handlers_are_removed() {
        let out = sanitize_summary(r#"<img src="x.png" onerror="steal()">"#);
        assert!(!out.contains("onerror"));
    }
}
