//! Namespace-insensitive tag and attribute matching.
//!
//! Tags coming out of a document may carry a namespace prefix (`tei:div`) or be written in
//! Clark notation (`{http://www.tei-c.org/ns/1.0}div`). The literal we compare against never
//! does. Because of that asymmetry, [`tag_matches`] is not commutative: always pass the value
//! read from the document first.

use crate::dom::Attributes;

/// Namespaces accepted in Clark notation.
pub const KNOWN_NAMESPACES: [&str; 2] = ["", "http://www.tei-c.org/ns/1.0"];

/// Compare a tag from the document against a literal tag, ignoring namespaces.
pub fn tag_matches(observed: &str, literal: &str) -> bool {
    if observed == literal {
        return true;
    }
    if observed
        .strip_suffix(literal)
        .is_some_and(|prefix| prefix.ends_with(':'))
    {
        return true;
    }
    observed
        .strip_prefix('{')
        .and_then(|rest| rest.split_once('}'))
        .is_some_and(|(ns, local)| local == literal && KNOWN_NAMESPACES.contains(&ns))
}

/// The local part of a tag: everything after the namespace prefix or Clark namespace.
pub fn local_name(tag: &str) -> &str {
    if let Some(rest) = tag.strip_prefix('{') {
        if let Some((_, local)) = rest.split_once('}') {
            return local;
        }
    }
    tag.rsplit_once(':').map_or(tag, |(_, local)| local)
}

/// Like `attrs.get(name)`, but `xml:id` and `{ns}id` are found when asking for `id`.
///
/// Returns the first matching attribute in document order.
pub fn find_attr<'a>(attrs: &'a Attributes, name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| tag_matches(key, name))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("div", "div", true)]
    #[case("tei:div", "div", true)]
    #[case("a:b:div", "div", true)]
    #[case("{http://www.tei-c.org/ns/1.0}div", "div", true)]
    #[case("{}div", "div", true)]
    #[case("{http://example.com/other}tei:div", "div", true)]
    #[case("{http://example.com/other}tei:pb", "b", false)]
    #[case("{http://example.com/other}div", "div", false)]
    #[case("divx", "div", false)]
    #[case("xdiv", "div", false)]
    #[case("div", "tei:div", false)]
    #[case("pb", "p", false)]
    fn test_tag_matches(#[case] observed: &str, #[case] literal: &str, #[case] expected: bool) {
        assert_eq!(tag_matches(observed, literal), expected);
    }

    #[test]
    fn test_tag_matches_is_not_commutative() {
        assert!(tag_matches("tei:div", "div"));
        assert!(!tag_matches("div", "tei:div"));
    }

    #[rstest]
    #[case("div", "div")]
    #[case("tei:div", "div")]
    #[case("{http://www.tei-c.org/ns/1.0}head", "head")]
    fn test_local_name(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(local_name(tag), expected);
    }

    #[test]
    fn test_find_attr_ignores_namespace() {
        let mut attrs = Attributes::new();
        attrs.insert("type".to_string(), "chapter".to_string());
        attrs.insert("xml:id".to_string(), "levanto1.2".to_string());

        assert_eq!(find_attr(&attrs, "id"), Some("levanto1.2"));
        assert_eq!(find_attr(&attrs, "type"), Some("chapter"));
        assert_eq!(find_attr(&attrs, "n"), None);
    }
}
