//! Text normalization and tokenization

use crate::stopwords::is_stop_word;
use regex::Regex;
use std::sync::OnceLock;

static WORD_RE: OnceLock<Regex> = OnceLock::new();

/// Classification of a single whitespace-delimited token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Url,
    Mention,
    Hashtag,
    Word,
}

impl TokenKind {
    pub fn classify(token: &str) -> Self {
        let lower = token.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.")
        {
            return TokenKind::Url;
        }

        let mut chars = token.chars();
        let marker = chars.next();
        let handle_follows = chars.next().is_some_and(|c| c.is_alphanumeric() || c == '_');
        match marker {
            Some('@') if handle_follows => TokenKind::Mention,
            Some('#') if handle_follows => TokenKind::Hashtag,
            _ => TokenKind::Word,
        }
    }
}

/// Counts of entity tokens found in a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub mentions: usize,
    pub hashtags: usize,
    pub urls: usize,
}

/// Count URL, mention and hashtag tokens in `text`
pub fn count_entities(text: &str) -> EntityCounts {
    let mut counts = EntityCounts::default();
    for token in text.split_whitespace() {
        match TokenKind::classify(token) {
            TokenKind::Url => counts.urls += 1,
            TokenKind::Mention => counts.mentions += 1,
            TokenKind::Hashtag => counts.hashtags += 1,
            TokenKind::Word => {}
        }
    }
    counts
}

/// Collapse every whitespace run to one space and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical post text: URL, mention and hashtag tokens removed, whitespace
/// collapsed. Idempotent.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .filter(|t| TokenKind::classify(t) == TokenKind::Word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs of word characters longer than one character, case preserved
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> + '_ {
    let re = WORD_RE.get_or_init(|| Regex::new(r"\w+").unwrap());
    re.find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() > 1)
}

/// Pluggable tokenization used by the salience scorer
pub trait Tokenizer {
    fn tokens(&self, text: &str) -> Vec<String>;
}

/// The plain [`tokenize`] rule
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokens(&self, text: &str) -> Vec<String> {
        tokenize(text).map(str::to_string).collect()
    }
}

/// Term policy shared by salience scoring and per-bucket term counts:
/// lower-cased [`tokenize`] output with English stop words dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct TermTokenizer;

impl Tokenizer for TermTokenizer {
    fn tokens(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .map(str::to_lowercase)
            .filter(|t| !is_stop_word(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_entities() {
        let raw = "RT @alice check https://t.co/xyz out #rust   now";
        assert_eq!(normalize(raw), "RT check out now");
    }

    #[test]
    fn test_normalize_keeps_partial_matches() {
        let raw = "mail me@example.com about C# and a lone @ or #";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  a\n\n b\t\tc  "), "a b c");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n "), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "",
            "plain text",
            "@a @b #c http://x",
            "  RT @someone:  wow!!\nhttps://example.com/a?b=c ",
            "日本語 の テキスト #タグ @ユーザー",
            "www.example.org is gone but example.org stays",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
            assert!(once.len() <= s.len());
        }
    }

    #[test]
    fn test_classify_tokens() {
        assert_eq!(TokenKind::classify("https://t.co/a"), TokenKind::Url);
        assert_eq!(TokenKind::classify("HTTP://X"), TokenKind::Url);
        assert_eq!(TokenKind::classify("www.rust-lang.org"), TokenKind::Url);
        assert_eq!(TokenKind::classify("@bob:"), TokenKind::Mention);
        assert_eq!(TokenKind::classify("#tag"), TokenKind::Hashtag);
        assert_eq!(TokenKind::classify("@"), TokenKind::Word);
        assert_eq!(TokenKind::classify("#!"), TokenKind::Word);
        assert_eq!(TokenKind::classify("a@b"), TokenKind::Word);
    }

    #[test]
    fn test_count_entities() {
        let counts = count_entities("@a @b hi #x https://t.co/1 http://t.co/2");
        assert_eq!(
            counts,
            EntityCounts {
                mentions: 2,
                hashtags: 1,
                urls: 2
            }
        );
    }

    #[test]
    fn test_tokenize_min_length() {
        let tokens: Vec<&str> = tokenize("I am a Rust dev, x y zz!").collect();
        assert_eq!(tokens, vec!["am", "Rust", "dev", "zz"]);
        assert!(tokenize("a b c d").next().is_none());
    }

    #[test]
    fn test_tokenize_unicode() {
        let tokens: Vec<&str> = tokenize("café über ñ").collect();
        assert_eq!(tokens, vec!["café", "über"]);
    }

    #[test]
    fn test_word_tokenizer_owned() {
        let tokens = WordTokenizer.tokens("Hello, World");
        assert_eq!(tokens, vec!["Hello".to_string(), "World".to_string()]);
    }

    #[test]
    fn test_term_tokenizer_lowercases_and_drops_stop_words() {
        let tokens = TermTokenizer.tokens("The Rust compiler is FAST and the borrow checker");
        assert_eq!(tokens, vec!["rust", "compiler", "fast", "borrow", "checker"]);
    }
}
