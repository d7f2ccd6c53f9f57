/// Escape text for use in XML character data and attribute values.
pub(crate) fn escape_xml(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            // XML 1.0 forbids most C0 controls even when escaped.
            c if c.is_control() && !matches!(c, '\t' | '\n' | '\r') => {}
            c => s.push(c),
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_strips_controls() {
        assert_eq!(escape_xml(r#"A&B <"x">'"#), "A&amp;B &lt;&quot;x&quot;&gt;&apos;");
        assert_eq!(escape_xml("a\u{0}b"), "ab");
        assert_eq!(escape_xml("李四"), "李四");
    }
}
