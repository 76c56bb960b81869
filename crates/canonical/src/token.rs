use serde::{Deserialize, Serialize};
use unicode_categories::UnicodeCategories;
use unicode_segmentation::UnicodeSegmentation;

/// A word token with its UTF-8 byte offsets in the source text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive) in the source text.
    pub start: usize,
    /// Byte offset (exclusive) in the source text.
    pub end: usize,
}

/// Splits raw text into word tokens and records byte offsets.
///
/// Word boundaries follow Unicode UAX #29, then each word is split again at
/// punctuation characters UAX #29 keeps inside words (`fox.The`,
/// `note:important`, `it's`). Whitespace and punctuation are delimiters and
/// never appear in the output. An empty string yields no tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (offset, word) in text.unicode_word_indices() {
        let mut start = None;
        for (i, ch) in word.char_indices() {
            match (ch.is_punctuation(), start) {
                (true, Some(s)) => {
                    tokens.push(slice_token(word, offset, s, i));
                    start = None;
                }
                (false, None) => start = Some(i),
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push(slice_token(word, offset, s, word.len()));
        }
    }
    tokens
}

fn slice_token(word: &str, offset: usize, start: usize, end: usize) -> Token {
    Token {
        text: word[start..end].to_string(),
        start: offset + start,
        end: offset + end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert!(tokenize("?!, ...").is_empty());
    }

    #[test]
    fn punctuation_and_whitespace_are_delimiters() {
        let tokens = tokenize("Hello, world!  The quick-brown fox.");
        assert_eq!(
            texts(&tokens),
            vec!["Hello", "world", "The", "quick", "brown", "fox"]
        );
    }

    #[test]
    fn unicode_words_are_kept() {
        let tokens = tokenize("Café naïve Ελληνικά 東京");
        assert_eq!(texts(&tokens)[..3], ["Café", "naïve", "Ελληνικά"]);
        assert!(tokens.iter().all(|t| !t.text.trim().is_empty()));
    }

    #[test]
    fn punctuation_inside_words_splits() {
        assert_eq!(texts(&tokenize("brown fox.The end")), vec!["brown", "fox", "The", "end"]);
        assert_eq!(texts(&tokenize("note:important")), vec!["note", "important"]);
        assert_eq!(texts(&tokenize("a:b")), vec!["a", "b"]);
        assert_eq!(texts(&tokenize("e.g.")), vec!["e", "g"]);
        assert_eq!(texts(&tokenize("it's example.com")), vec!["it", "s", "example", "com"]);
    }

    #[test]
    fn numbers_with_separators_split_too() {
        assert_eq!(texts(&tokenize("3.14 1,000")), vec!["3", "14", "1", "000"]);
    }

    #[test]
    fn split_offsets_point_into_source() {
        let input = "say fox.The, note:important";
        let tokens = tokenize(input);
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[1].end, 7);
        assert_eq!(tokens[2].start, 8);
        assert_eq!(tokens[2].end, 11);
        for token in tokens {
            assert_eq!(&input[token.start..token.end], token.text);
        }
    }

    #[test]
    fn offsets_slice_back_to_token_text() {
        let input = " a\u{10348}b  c, déjà-vu ";
        for token in tokenize(input) {
            assert_eq!(&input[token.start..token.end], token.text);
        }
    }
}
