// splitter.rs - text file -> ordered sentence stream

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

/// A sentence ends at 。．！？!? optionally followed by one space.
static SENT_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[。．！？!?]\s?").unwrap());

/// Split one line into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENT_END.find_iter(text) {
        let seg = text[start..m.end()].trim();
        if !seg.is_empty() {
            sentences.push(seg.to_string());
        }
        start = m.end();
    }

    // Trailing text without a terminator still counts as a sentence
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Read a UTF-8 text file and return its sentences in document order.
pub fn stream_sentences(path: impl AsRef<Path>) -> std::io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut sentences = Vec::new();
    for line in reader.lines() {
        sentences.extend(split_sentences(&line?));
    }
    Ok(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_japanese_terminators() {
        let sentences = split_sentences("こんにちは。お元気ですか？今日は晴れです。");
        assert_eq!(
            sentences,
            vec!["こんにちは。", "お元気ですか？", "今日は晴れです。"]
        );
    }

    #[test]
    fn test_split_ascii_terminators() {
        let sentences = split_sentences("Hello! How are you? ");
        assert_eq!(sentences, vec!["Hello!", "How are you?"]);
    }

    #[test]
    fn test_trailing_text_without_terminator() {
        let sentences = split_sentences("一文目。終端なしの残り");
        assert_eq!(sentences, vec!["一文目。", "終端なしの残り"]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_stream_sentences_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "こんにちは。お元気ですか？").unwrap();
        writeln!(file, "今日は晴れです。").unwrap();

        let sentences = stream_sentences(file.path()).unwrap();
        assert_eq!(
            sentences,
            vec!["こんにちは。", "お元気ですか？", "今日は晴れです。"]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(stream_sentences("/no/such/file.txt").is_err());
    }
}
