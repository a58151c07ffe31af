/// Append `text` to `out`, escaping the characters significant in HTML
/// text and attribute values.
pub fn push_escaped(out: &mut String, text: &str) {
    let mut last = 0;
    for (i, ch) in text.char_indices() {
        let entity = match ch {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[last..i]);
        out.push_str(entity);
        last = i + 1;
    }
    out.push_str(&text[last..]);
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(escape_html("<a href=\"x\">&'</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_escape_leaves_other_text_alone() {
        assert_eq!(escape_html("hello wörld\n\t"), "hello wörld\n\t");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_already_escaped_is_escaped_again() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_push_escaped_appends() {
        let mut out = String::from("x=");
        push_escaped(&mut out, "1<2");
        assert_eq!(out, "x=1&lt;2");
    }
}
