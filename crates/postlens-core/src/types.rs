//! Core types: raw input records and ingested posts

use crate::text::{collapse_whitespace, normalize};
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A record as handed over by the archive parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id_str: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub entities: Option<Entities>,
}

/// Structured entities attached to a record by the source platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<HashtagEntity>,
    #[serde(default)]
    pub user_mentions: Vec<MentionEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagEntity {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionEntity {
    pub screen_name: String,
}

/// Retweet / reply / original classification of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Original,
    Retweet,
    Reply,
}

impl PostKind {
    /// Classify from raw text: `RT @` prefix is a retweet, any other `@`
    /// prefix is a reply.
    pub fn from_text(raw: &str) -> Self {
        let text = raw.trim_start();
        if text.starts_with("RT @") {
            PostKind::Retweet
        } else if text.starts_with('@') {
            PostKind::Reply
        } else {
            PostKind::Original
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Original => "original",
            PostKind::Retweet => "retweet",
            PostKind::Reply => "reply",
        }
    }
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ingested post. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    id: String,
    created_at: DateTime<Utc>,
    raw_text: String,
    normalized_text: String,
    entities: Option<Entities>,
}

impl Post {
    /// Build a post; the timestamp is truncated to the minute.
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let normalized_text = normalize(&raw_text);
        let created_at = created_at
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(created_at);
        Self {
            id: id.into(),
            created_at,
            raw_text,
            normalized_text,
            entities: None,
        }
    }

    pub fn with_entities(mut self, entities: Entities) -> Self {
        self.entities = Some(entities);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    pub fn entities(&self) -> Option<&Entities> {
        self.entities.as_ref()
    }

    pub fn kind(&self) -> PostKind {
        PostKind::from_text(&collapse_whitespace(&self.raw_text))
    }
}
