//! Text-level cleanup applied to TEI before it is parsed.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<choice>` with an `<orig>`, one or two `<reg type=…>`, and any whitespace in between.
static CHOICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?im)(<choice>)(?:\s|\n)*(<orig>.*?</orig>)(?:\s|\n)*",
        r#"(<reg type=(?:".*?"|'.*?')>.*?</reg>)(?:\s|\n)*"#,
        r#"(<reg type=(?:".*?"|'.*?')>.*?</reg>)?(?:\s|\n)*(</choice>)"#,
    ))
    .unwrap()
});

/// Condense every `<choice>` onto one line so the whitespace between its alternatives does not
/// end up in the text.
pub fn preprocess_xml(xml: &str) -> String {
    CHOICE
        .replace_all(xml, "${1}${2}${3}${4}${5}")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condenses_choice_whitespace() {
        let xml = "<p>a <choice>\n    <orig>xi</orig>\n    <reg type=\"spanish\">ji</reg>\n  </choice> b</p>";
        assert_eq!(
            preprocess_xml(xml),
            "<p>a <choice><orig>xi</orig><reg type=\"spanish\">ji</reg></choice> b</p>"
        );
    }

    #[test]
    fn test_two_regularizations() {
        let xml = concat!(
            "<CHOICE>\n<orig>qui</orig>\n<reg type='spanish'>ki</reg>\n",
            "<reg type=\"spacing\">q ui</reg>\n</CHOICE>"
        );
        assert_eq!(
            preprocess_xml(xml),
            "<CHOICE><orig>qui</orig><reg type='spanish'>ki</reg><reg type=\"spacing\">q ui</reg></CHOICE>"
        );
    }

    #[test]
    fn test_leaves_other_markup_alone() {
        let xml = "<choice>\n  <abbr>q~</abbr>\n  <expan>que</expan>\n</choice>";
        assert_eq!(preprocess_xml(xml), xml);
    }
}
