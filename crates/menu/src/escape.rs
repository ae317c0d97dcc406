//! HTML escaping and attribute assembly helpers.

use std::fmt::Write;

/// HTML-escape a string for safe output.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Build an HTML attribute string from name/value pairs.
///
/// Every value is HTML-escaped. The result carries a leading space when any
/// attributes are present so it can be spliced directly after a tag name.
pub fn build_attrs<'a, I>(attrs: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut out = String::new();
    for (name, value) in attrs {
        // String concatenation through write! into a String cannot fail.
        let _ = write!(out, " {name}=\"{}\"", html_escape(&value));
    }
    out
}

/// Join class fragments into a single class attribute value.
///
/// Empty fragments are dropped so optional classes can be passed through
/// unconditionally.
pub fn class_attr<I, S>(classes: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for class in classes {
        let class = class.as_ref().trim();
        if class.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(class);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_special_chars() {
        assert_eq!(
            html_escape("<script>alert('xss')</script>"),
            "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_html_escape_ampersand() {
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_html_escape_plain_text() {
        assert_eq!(html_escape("hello world"), "hello world");
    }

    #[test]
    fn test_build_attrs_escapes_values() {
        let attrs = build_attrs([("href", "/a?x=1&y=2".to_string())]);
        assert_eq!(attrs, " href=\"/a?x=1&amp;y=2\"");
    }

    #[test]
    fn test_build_attrs_empty() {
        assert_eq!(build_attrs(std::iter::empty::<(&str, String)>()), "");
    }

    #[test]
    fn test_build_attrs_multiple() {
        let attrs = build_attrs([
            ("class", "level0 first".to_string()),
            ("target", "_blank".to_string()),
        ]);
        assert_eq!(attrs, " class=\"level0 first\" target=\"_blank\"");
    }

    #[test]
    fn test_class_attr_drops_empty_fragments() {
        assert_eq!(class_attr(["level0", "", "  ", "parent"]), "level0 parent");
    }

    #[test]
    fn test_class_attr_trims() {
        assert_eq!(class_attr([" first ", "last"]), "first last");
    }
}
