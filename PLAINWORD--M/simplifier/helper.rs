use once_cell::sync::Lazy;
use regex::Regex;

static DELIMITER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Characters stripped when trimming: Unicode white space except NEL, plus the BOM.
fn is_trim_char(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{85}') || ch == '\u{feff}'
}

/// Trims leading and trailing white space (including U+FEFF).
#[must_use]
pub fn trim_blank(text: &str) -> &str {
    text.trim_matches(is_trim_char)
}

/// True when `text` is empty or made only of white space.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    trim_blank(text).is_empty()
}

/// Splits text on runs of `.`, `!` and `?`, keeping each run as its own
/// element, then drops blank elements.
///
/// `"Hi. Bye!"` yields `["Hi", ".", " Bye", "!"]`.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for run in DELIMITER_RUN.find_iter(text) {
        pieces.push(&text[last..run.start()]);
        pieces.push(run.as_str());
        last = run.end();
    }
    pieces.push(&text[last..]);
    pieces.retain(|piece| !is_blank(piece));
    pieces
}

/// Rewrites every `;` and `:` as `.`.
#[must_use]
pub fn normalize_punctuation(sentence: &str) -> String {
    sentence.replace([';', ':'], ".")
}

/// Number of characters [`normalize_punctuation`] rewrites.
#[must_use]
pub fn punctuation_rewrites(sentence: &str) -> usize {
    sentence.matches([';', ':']).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_delimiter_runs() {
        assert_eq!(
            split_sentences("Hi. Bye!"),
            vec!["Hi", ".", " Bye", "!"]
        );
        assert_eq!(split_sentences("Wait?!... ok"), vec!["Wait", "?!...", " ok"]);
    }

    #[test]
    fn split_drops_blank_segments() {
        assert_eq!(split_sentences(". . ."), vec![".", ".", "."]);
        assert_eq!(split_sentences("no punctuation"), vec!["no punctuation"]);
        assert!(split_sentences("  \n ").is_empty());
    }

    #[test]
    fn punctuation_is_normalized() {
        assert_eq!(normalize_punctuation("a; b: c"), "a. b. c");
        assert_eq!(punctuation_rewrites("a; b: c;"), 3);
        assert_eq!(normalize_punctuation("plain"), "plain");
    }

    #[test]
    fn trim_handles_bom_but_not_nel() {
        assert_eq!(trim_blank("\u{feff} text \u{a0}"), "text");
        assert_eq!(trim_blank("\u{85}x"), "\u{85}x");
        assert!(is_blank("\u{2003}\t\u{feff}"));
        assert!(!is_blank("\u{85}"));
    }
}
