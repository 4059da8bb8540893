//! Corpus-level statistics: sizes, frequent words, salient terms and entities

use crate::scorer::{SalienceScorer, TermScore};
use chrono::NaiveDate;
use postlens_core::temporal::TermCount;
use postlens_core::text::{tokenize, TokenKind};
use postlens_core::{Config, FeatureTable, Post};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Qualifying posts
    pub total_posts: usize,
    /// Mean normalized length in characters
    pub avg_length: f64,
    /// Mean token count
    pub avg_words: f64,
    /// Raw token frequency, case preserved
    pub top_words: Vec<TermCount>,
    pub top_terms: Vec<TermScore>,
    pub top_hashtags: Vec<TermCount>,
    pub top_mentions: Vec<TermCount>,
    pub posts_per_day: BTreeMap<NaiveDate, usize>,
}

/// Counts ordered by count descending, then term ascending
fn ranked_counts(counts: BTreeMap<String, usize>, n: usize) -> Vec<TermCount> {
    let mut ranked: Vec<TermCount> = counts
        .into_iter()
        .map(|(term, count)| TermCount { term, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// Entity names written inline, e.g. `#rust,` -> `rust`
fn inline_entities(text: &str, kind: TokenKind) -> Vec<String> {
    text.split_whitespace()
        .filter(|t| TokenKind::classify(t) == kind)
        .filter_map(|t| {
            let name: String = t[1..]
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            (!name.is_empty()).then_some(name)
        })
        .collect()
}

impl CorpusStats {
    /// Sizes, words and terms come from the qualifying rows of `table`;
    /// hashtags and mentions from every ingested post, preferring the
    /// archive's structured entities over the text.
    pub fn compute(posts: &[Post], table: &FeatureTable, config: &Config) -> Self {
        let texts = table.texts();
        let total_posts = texts.len();

        let mut word_freq: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_chars = 0usize;
        let mut total_words = 0usize;
        for text in &texts {
            total_chars += text.chars().count();
            for word in tokenize(text) {
                total_words += 1;
                *word_freq.entry(word.to_string()).or_default() += 1;
            }
        }
        let (avg_length, avg_words) = if total_posts == 0 {
            (0.0, 0.0)
        } else {
            (
                total_chars as f64 / total_posts as f64,
                total_words as f64 / total_posts as f64,
            )
        };

        let mut hashtags: BTreeMap<String, usize> = BTreeMap::new();
        let mut mentions: BTreeMap<String, usize> = BTreeMap::new();
        for post in posts {
            match post.entities() {
                Some(entities) => {
                    for tag in &entities.hashtags {
                        *hashtags.entry(tag.text.clone()).or_default() += 1;
                    }
                    for user in &entities.user_mentions {
                        *mentions.entry(user.screen_name.clone()).or_default() += 1;
                    }
                }
                None => {
                    for tag in inline_entities(post.raw_text(), TokenKind::Hashtag) {
                        *hashtags.entry(tag).or_default() += 1;
                    }
                    for user in inline_entities(post.raw_text(), TokenKind::Mention) {
                        *mentions.entry(user).or_default() += 1;
                    }
                }
            }
        }

        let mut posts_per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for r in &table.records {
            *posts_per_day.entry(r.date()).or_default() += 1;
        }

        let stats = Self {
            total_posts,
            avg_length,
            avg_words,
            top_words: ranked_counts(word_freq, config.top_words),
            top_terms: SalienceScorer::new().top_terms(&texts, config.top_terms),
            top_hashtags: ranked_counts(hashtags, config.top_entities),
            top_mentions: ranked_counts(mentions, config.top_entities),
            posts_per_day,
        };
        tracing::debug!(
            posts = stats.total_posts,
            days = stats.posts_per_day.len(),
            "computed corpus statistics"
        );
        stats
    }
}
