//! Per-post feature extraction and the corpus-level feature table

use crate::categories::{
    ActivityLevel, Complexity, DayType, EngagementCategory, HashtagCategory, LengthCategory,
    MentionCategory, PunctuationIntensity, Season, TimeCategory,
};
use crate::config::Config;
use crate::ingest::Diagnostics;
use crate::text::{collapse_whitespace, count_entities, normalize, tokenize};
use crate::types::{Post, PostKind};
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Fixed-schema feature row for one post.
///
/// Flat on purpose: one field per exported column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub text: String,

    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub weekday: u32,
    pub is_weekend: bool,
    pub day_type: DayType,
    pub season: Season,
    pub time_category: TimeCategory,

    pub char_count: usize,
    pub word_count: usize,
    pub mention_count: usize,
    pub hashtag_count: usize,
    pub url_count: usize,
    pub exclamation_count: usize,
    pub question_count: usize,

    pub tweet_type: PostKind,
    pub is_retweet: bool,
    pub is_reply: bool,
    pub is_original: bool,
    pub has_mention: bool,
    pub has_hashtag: bool,
    pub has_url: bool,

    pub engagement_score: usize,
    pub capital_letter_ratio: f64,
    pub unique_word_ratio: f64,

    pub tweet_length_category: LengthCategory,
    pub mention_category: MentionCategory,
    pub hashtag_category: HashtagCategory,
    pub engagement_category: EngagementCategory,
    pub punctuation_intensity: PunctuationIntensity,
    pub tweet_complexity: Complexity,

    /// Posts on the same calendar day
    pub tweet_frequency: usize,
    pub tweet_frequency_category: ActivityLevel,
    /// Posts in the same hour of day, across the corpus
    pub tweet_density: usize,
    pub tweet_density_category: ActivityLevel,
}

impl FeatureRecord {
    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    pub fn kind(&self) -> PostKind {
        self.tweet_type
    }
}

/// Extract the features of a single post.
///
/// Corpus-relative fields (`tweet_frequency`, `tweet_density` and their
/// bins) are computed as if the post were the whole corpus; use
/// [`FeatureTable::build`] for corpus-wide values.
pub fn extract(post: &Post) -> FeatureRecord {
    // idempotent
    let text = normalize(post.normalized_text());
    let raw = collapse_whitespace(post.raw_text());
    let at = post.created_at();

    let weekday = at.weekday().num_days_from_monday();
    let hour = at.hour();
    let month = at.month();

    let entities = count_entities(&raw);
    let char_count = text.chars().count();
    let exclamation_count = text.matches('!').count();
    let question_count = text.matches('?').count();

    let words: Vec<&str> = tokenize(&text).collect();
    let word_count = words.len();
    let unique_word_ratio = if word_count > 0 {
        words.iter().collect::<HashSet<_>>().len() as f64 / word_count as f64
    } else {
        0.0
    };
    let capital_letter_ratio = if char_count > 0 {
        text.chars().filter(|c| c.is_uppercase()).count() as f64 / char_count as f64
    } else {
        0.0
    };

    let kind = PostKind::from_text(&raw);
    let engagement_score = entities.mentions + entities.hashtags;

    FeatureRecord {
        id: post.id().to_string(),
        created_at: at,
        year: at.year(),
        month,
        day: at.day(),
        hour,
        minute: at.minute(),
        weekday,
        is_weekend: weekday >= 5,
        day_type: DayType::from_weekday(weekday),
        season: Season::from_month(month),
        time_category: TimeCategory::from_hour(hour),

        char_count,
        word_count,
        mention_count: entities.mentions,
        hashtag_count: entities.hashtags,
        url_count: entities.urls,
        exclamation_count,
        question_count,

        tweet_type: kind,
        is_retweet: kind == PostKind::Retweet,
        is_reply: kind == PostKind::Reply,
        is_original: kind == PostKind::Original,
        has_mention: entities.mentions > 0,
        has_hashtag: entities.hashtags > 0,
        has_url: entities.urls > 0,

        engagement_score,
        capital_letter_ratio,
        unique_word_ratio,

        tweet_length_category: LengthCategory::from_chars(char_count),
        mention_category: MentionCategory::from_count(entities.mentions),
        hashtag_category: HashtagCategory::from_count(entities.hashtags),
        engagement_category: EngagementCategory::from_score(engagement_score),
        punctuation_intensity: PunctuationIntensity::from_counts(exclamation_count, question_count),
        tweet_complexity: Complexity::from_text_stats(char_count, unique_word_ratio),

        tweet_frequency: 1,
        tweet_frequency_category: ActivityLevel::Low,
        tweet_density: 1,
        tweet_density_category: ActivityLevel::Low,

        text,
    }
}

/// Linear-interpolated quantile of an ascending slice; 0 for an empty one
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Feature records for every qualifying post of a corpus
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    pub records: Vec<FeatureRecord>,
}

impl FeatureTable {
    /// Extract every post, drop those at or below `config.min_text_length`,
    /// then fill in the corpus-relative columns.
    pub fn build(posts: &[Post], config: &Config, diagnostics: &mut Diagnostics) -> Self {
        let mut records = Vec::with_capacity(posts.len());
        for post in posts {
            if post.normalized_text().chars().count() <= config.min_text_length {
                diagnostics.below_min_length += 1;
                continue;
            }
            records.push(extract(post));
        }
        diagnostics.qualifying = records.len();

        if records.is_empty() {
            tracing::warn!(posts = posts.len(), "no post passed the length filter");
        }

        let mut table = Self { records };
        table.apply_corpus_features(config);
        table
    }

    /// Second pass over the finished records. Thresholds are recomputed from
    /// this table alone.
    pub fn apply_corpus_features(&mut self, config: &Config) {
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        let mut per_hour: BTreeMap<u32, usize> = BTreeMap::new();
        for r in &self.records {
            *per_day.entry(r.date()).or_default() += 1;
            *per_hour.entry(r.hour).or_default() += 1;
        }

        let mut hourly: Vec<f64> = per_hour.values().map(|&c| c as f64).collect();
        hourly.sort_by(|a, b| a.total_cmp(b));
        let q = config.density_quantiles;
        let (density_low, density_high) = (quantile(&hourly, q.low), quantile(&hourly, q.high));

        let freq = config.frequency_thresholds;
        for r in &mut self.records {
            r.tweet_frequency = per_day.get(&r.date()).copied().unwrap_or(0);
            r.tweet_frequency_category = ActivityLevel::from_edges(
                r.tweet_frequency as f64,
                freq.medium_above as f64,
                freq.high_above as f64,
            );
            r.tweet_density = per_hour.get(&r.hour).copied().unwrap_or(0);
            r.tweet_density_category =
                ActivityLevel::from_edges(r.tweet_density as f64, density_low, density_high);
        }

        tracing::debug!(
            days = per_day.len(),
            hours = per_hour.len(),
            density_low,
            density_high,
            "applied corpus features"
        );
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.text.as_str()).collect()
    }
}
