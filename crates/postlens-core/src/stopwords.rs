//! English stop words

use std::collections::HashSet;
use std::sync::OnceLock;

static STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "could", "couldn", "did", "didn", "do", "does",
    "doesn", "doing", "don", "down", "during", "each", "else", "ever", "few", "for", "from",
    "further", "get", "got", "had", "hadn", "has", "hasn", "have", "haven", "having", "he",
    "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "if", "in",
    "into", "is", "isn", "it", "its", "itself", "just", "ll", "me", "might", "more", "most",
    "must", "mustn", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "re",
    "rt", "same", "shall", "shan", "she", "should", "shouldn", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "through", "to", "too", "under", "until", "up", "us", "ve", "very", "was",
    "wasn", "we", "were", "weren", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "won", "would", "wouldn", "you", "your", "yours", "yourself",
    "yourselves",
];

static STOP_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Whether a lower-cased token is an English stop word
pub fn is_stop_word(token: &str) -> bool {
    STOP_SET
        .get_or_init(|| STOP_WORDS.iter().copied().collect())
        .contains(token)
}
