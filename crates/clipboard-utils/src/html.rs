//! HTML serialization helpers: escaping and element classes.

/// Elements that never have content and are written self-closed.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are written without escaping.
pub const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

/// Elements whose first newline is swallowed by the parser.
pub const LEADING_NEWLINE_ELEMENTS: &[&str] = &["listing", "pre", "textarea"];

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

pub fn skips_leading_newline(name: &str) -> bool {
    LEADING_NEWLINE_ELEMENTS.contains(&name)
}

/// Append text content to `out`, escaping markup characters.
pub fn push_escaped_text(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

/// Append a double-quoted attribute value to `out` (without the quotes).
pub fn push_escaped_attr(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape_text(s: &str) -> String {
        let mut out = String::new();
        push_escaped_text(&mut out, s);
        out
    }

    fn escape_attr(s: &str) -> String {
        let mut out = String::new();
        push_escaped_attr(&mut out, s);
        out
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_text("it's \"fine\""), "it's \"fine\"");
        assert_eq!(escape_attr("say \"hello\""), "say &quot;hello&quot;");
        assert_eq!(escape_attr(" /> "), " /&gt; ");
        assert_eq!(escape_text("a\u{a0}b"), "a&nbsp;b");
    }

    #[test]
    fn test_element_classes() {
        assert!(is_void_element("img"));
        assert!(is_void_element("br"));
        assert!(!is_void_element("p"));
        assert!(is_raw_text_element("script"));
        assert!(is_raw_text_element("noscript"));
        assert!(!is_raw_text_element("div"));
        assert!(skips_leading_newline("pre"));
        assert!(!skips_leading_newline("p"));
    }
}
