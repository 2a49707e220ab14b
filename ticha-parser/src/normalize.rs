//! Word normalization for dictionary keys.
//!
//! Transcribed words and FLEx headwords are spelled inconsistently: accents come and go,
//! editors insert letters in square brackets, and words get split across lines. Both sides of
//! a dictionary lookup are run through [`normalize`] so that they meet on a common key.
//!
//! The steps, in order:
//!
//! 1. fold accented letters to their base letter (see [`fold_accents`])
//! 2. remove all whitespace
//! 3. lowercase
//! 4. delete editorial insertions matching `\[\w+\]`
//! 5. strip punctuation: `, . [ ] ' ’ ? * -`
//!
//! Accent folding runs before punctuation stripping because `~` is used as a combining-accent
//! carrier (`q~`). The input is lowercased before the first fold so that uppercase accented
//! letters fold as well, and the fold runs once more at the end because the deletions in steps
//! 4 and 5 can bring a `q` next to a `~`. Together these make `normalize` idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static EDITORIAL_INSERTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\w+\]").unwrap());

const PUNCTUATION: [char; 9] = [',', '.', '[', ']', '\'', '?', '*', '\u{2019}', '-'];

const COMBINING_TILDE: char = '\u{0303}';

/// Normalize a word so it can be used as a dictionary key.
pub fn normalize(word: &str) -> String {
    let folded = fold_accents(&word.to_lowercase());
    let compact: String = folded.chars().filter(|c| !c.is_whitespace()).collect();
    let lowered = compact.to_lowercase();
    let without_insertions = EDITORIAL_INSERTION.replace_all(&lowered, "");
    let stripped: String = without_insertions
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect();
    fold_accents(&stripped)
}

/// Replace accented letters with their unaccented base letter.
///
/// `q` followed by combining tildes folds to `q`, and `q~` (with or without combining
/// tildes in between) folds to `que`. The long s `ſ` folds to `s`.
pub fn fold_accents(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars().peekable();
    while let Some(c) = chars.next() {
        if c == 'q' || c == 'Q' {
            while chars.peek() == Some(&COMBINING_TILDE) {
                chars.next();
            }
            if chars.peek() == Some(&'~') {
                chars.next();
                out.push_str(if c == 'q' { "que" } else { "Que" });
            } else {
                out.push(c);
            }
            continue;
        }
        match base_letter(c) {
            Some(base) => out.push(base),
            None => out.push(c),
        }
    }
    out
}

fn base_letter(c: char) -> Option<char> {
    let base = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'ǎ' | 'ā' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'ě' | 'ē' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ǐ' | 'ī' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ǒ' | 'ō' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ǔ' | 'ū' => 'u',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Ǎ' | 'Ā' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' | 'Ě' | 'Ē' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' | 'Ǐ' | 'Ī' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ǒ' | 'Ō' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' | 'Ǔ' | 'Ū' => 'U',
        'ſ' => 's',
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("tóbi", "tobi")]
    #[case("Tǒbi", "tobi")]
    #[case("ÉLA", "ela")]
    #[case("ſaca", "saca")]
    #[case("q~", "que")]
    #[case("q\u{0303}", "q")]
    #[case("q\u{0303}\u{0303}", "q")]
    #[case("q\u{0303}~", "que")]
    #[case("co  la\tni", "colani")]
    #[case("pe[n]ni", "peni")]
    #[case("ta-li, ya.", "taliya")]
    #[case("’hue?*", "hue")]
    #[case("[a-b]", "ab")]
    #[case("q-~", "que")]
    #[case("", "")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn test_fold_accents_leaves_plain_text_alone() {
        assert_eq!(fold_accents("xonaxi"), "xonaxi");
        assert_eq!(fold_accents("a~"), "a~");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(word in ".*") {
            let once = normalize(&word);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent_on_manuscript_alphabet(
            word in "[a-zA-Zq~\\[\\]ſáéíóúǎěǒǔãõ\u{0303} .,'?*-]{0,24}"
        ) {
            let once = normalize(&word);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
