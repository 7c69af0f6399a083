//! Markup stripping and text segmentation.
//!
//! Everything downstream consumes a [`Segments`] value rather than raw
//! markup, so tag stripping and splitting happen exactly once per pass.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence boundary regex"));

static PARAGRAPH_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph boundary regex"));

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Segmented view of a markup document: plain text plus ordered sentences,
/// paragraphs, and words (case preserved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    plain: String,
    sentences: Vec<String>,
    paragraphs: Vec<String>,
    words: Vec<String>,
}

impl Segments {
    /// Plain text with all `<tag>`-shaped substrings removed.
    #[must_use]
    pub fn plain(&self) -> &str {
        &self.plain
    }

    #[must_use]
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    #[must_use]
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    #[must_use]
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Character count of the plain text, as shown in editor footers.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.plain.chars().count()
    }
}

/// Split markup into plain text, sentences, paragraphs, and words.
///
/// Pure and total: empty input yields empty sequences and zero counts.
#[must_use]
pub fn segment(markup: &str) -> Segments {
    let plain = TAG.replace_all(markup, "").into_owned();

    let sentences = split_sentences(&plain).map(str::to_string).collect();

    let paragraphs = PARAGRAPH_BOUNDARY
        .split(&plain)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    let words = WORD
        .find_iter(&plain)
        .map(|m| m.as_str().to_string())
        .collect();

    Segments {
        plain,
        sentences,
        paragraphs,
        words,
    }
}

/// Sentence fragments of `text`, trimmed, empty fragments dropped.
pub(crate) fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// The first sentence of `text`, if it has one.
pub(crate) fn first_sentence(text: &str) -> Option<&str> {
    split_sentences(text).next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_splits_sentences_and_words() {
        let segments = segment("<p>Hello. World!</p>");
        assert_eq!(segments.plain(), "Hello. World!");
        assert_eq!(segments.sentence_count(), 2);
        assert_eq!(segments.word_count(), 2);
        assert_eq!(segments.sentences(), ["Hello", "World"]);
        assert_eq!(segments.words(), ["Hello", "World"]);
    }

    #[test]
    fn empty_input_yields_empty_segments() {
        let segments = segment("");
        assert_eq!(segments.plain(), "");
        assert_eq!(segments.sentence_count(), 0);
        assert_eq!(segments.paragraph_count(), 0);
        assert_eq!(segments.word_count(), 0);
        assert_eq!(segments.char_count(), 0);
    }

    #[test]
    fn markup_only_input_yields_empty_segments() {
        let segments = segment("<div><br/></div>");
        assert_eq!(segments.plain(), "");
        assert_eq!(segments.word_count(), 0);
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let segments = segment("First paragraph here.\n\nSecond one.\n   \nThird.");
        assert_eq!(
            segments.paragraphs(),
            ["First paragraph here.", "Second one.", "Third."]
        );
    }

    #[test]
    fn single_newline_does_not_split_paragraphs() {
        let segments = segment("One line.\nStill the same paragraph.");
        assert_eq!(segments.paragraph_count(), 1);
    }

    #[test]
    fn repeated_terminators_produce_one_boundary() {
        let segments = segment("Wait... what?! Really.");
        assert_eq!(segments.sentences(), ["Wait", "what", "Really"]);
    }

    #[test]
    fn words_preserve_case() {
        let segments = segment("The QUICK brown Fox");
        assert_eq!(segments.words(), ["The", "QUICK", "brown", "Fox"]);
    }

    #[test]
    fn first_sentence_of_paragraph() {
        assert_eq!(first_sentence("However, this. And that."), Some("However, this"));
        assert_eq!(first_sentence("   "), None);
    }
}
