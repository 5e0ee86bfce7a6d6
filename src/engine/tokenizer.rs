//! Word segmentation over UTF-16 corpora.
//!
//! Engines receive text as UTF-16 code units and report misspellings as
//! code-unit ranges, so every offset here is counted in `u16`s.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// First code unit of the word.
    pub start: usize,
    /// One past the last code unit of the word.
    pub end: usize,
}

pub fn encode(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Decode UTF-16, replacing unpaired surrogates with U+FFFD.
///
/// The replacement character occupies a single code unit, same as the
/// surrogate it stands for, so offsets stay aligned with the input.
pub fn decode(corpus: &[u16]) -> String {
    char::decode_utf16(corpus.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Split a corpus into checkable words.
///
/// Segments follow Unicode word boundaries; segments without a letter
/// (numbers, punctuation, whitespace) are skipped.
pub fn words(corpus: &[u16]) -> Vec<Token> {
    let text = decode(corpus);
    let mut tokens = Vec::new();
    let mut offset = 0;

    for segment in text.split_word_bounds() {
        let len = segment.encode_utf16().count();
        if segment.chars().any(char::is_alphabetic) {
            tokens.push(Token {
                text: segment.to_string(),
                start: offset,
                end: offset + len,
            });
        }
        offset += len;
    }

    tokens
}

/// Byte offset in `text` of the given UTF-16 offset.
///
/// Offsets past the end clamp to `text.len()`; an offset that falls inside
/// a surrogate pair maps to the start of that character.
pub fn utf16_to_byte(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if next > offset {
            return byte;
        }
        units = next;
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_words_skip_punctuation_and_numbers() {
        let tokens = words(&encode("Hello, world! 42 times don't"));
        assert_eq!(texts(&tokens), vec!["Hello", "world", "times", "don't"]);
        assert_eq!((tokens[0].start, tokens[0].end), (0, 5));
        assert_eq!((tokens[1].start, tokens[1].end), (7, 12));
    }

    #[test]
    fn test_offsets_count_code_units() {
        // The emoji takes two UTF-16 code units.
        let tokens = words(&encode("😀 cafe"));
        assert_eq!(texts(&tokens), vec!["cafe"]);
        assert_eq!((tokens[0].start, tokens[0].end), (3, 7));
    }

    #[test]
    fn test_unpaired_surrogate_keeps_alignment() {
        let mut corpus = vec![0xD800];
        corpus.extend(encode(" word"));
        let tokens = words(&corpus);
        assert_eq!(texts(&tokens), vec!["word"]);
        assert_eq!((tokens[0].start, tokens[0].end), (2, 6));
    }

    #[test]
    fn test_utf16_to_byte() {
        let text = "é😀x";
        assert_eq!(utf16_to_byte(text, 0), 0);
        assert_eq!(utf16_to_byte(text, 1), 2);
        assert_eq!(utf16_to_byte(text, 3), 6);
        assert_eq!(utf16_to_byte(text, 10), text.len());
    }
}
