//! HTML-to-text cleanup for feed content.

use std::borrow::Cow;

/// Strip tags, decode HTML entities (named and numeric), and collapse
/// whitespace. Feed titles and descriptions routinely arrive with markup
/// and entity soup; the output is plain display text.
pub fn strip_html(input: &str) -> String {
    let mut without_tags = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => without_tags.push(c),
            _ => {}
        }
    }

    let decoded: Cow<'_, str> = html_escape::decode_html_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap a string at `max` characters on a character boundary.
pub fn truncate_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags() {
        assert_eq!(strip_html("<p>Hello <b>world</b>!</p>"), "Hello world!");
    }

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(
            strip_html("Leaves &amp; Stems &#8217;re green"),
            "Leaves & Stems \u{2019}re green"
        );
        assert_eq!(strip_html("dry &#x2014; season &quot;burn&quot;"), "dry \u{2014} season \"burn\"");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(strip_html("a\n\n  b\t c"), "a b c");
        assert_eq!(strip_html("  &nbsp; spaced  "), "spaced");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("ab\u{2019}cd", 3), "ab\u{2019}");
        assert_eq!(truncate_chars("short", 300), "short");
    }
}
