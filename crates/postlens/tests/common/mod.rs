use chrono::{DateTime, TimeZone, Utc};
use postlens_core::{Post, RawRecord};
use std::path::{Path, PathBuf};

/// Six records: three qualifying posts in the week of 2024-01-01, one short
/// post, one without text and one with an unparseable timestamp
pub const ARCHIVE_JS: &str = r#"window.YTD.tweets.part0 = [
  {
    "tweet": {
      "id_str": "100",
      "created_at": "Mon Jan 01 09:15:00 +0000 2024",
      "full_text": "Spent the whole morning profiling the tokenizer and shaving allocations #rustlang",
      "entities": { "hashtags": [{ "text": "rustlang" }], "user_mentions": [] }
    }
  },
  {
    "tweet": {
      "id_str": "101",
      "created_at": "Wed Jan 03 20:00:00 +0000 2024",
      "full_text": "RT @ferris: Borrow checker errors are just the compiler teaching you ownership",
      "entities": { "hashtags": [], "user_mentions": [{ "screen_name": "ferris" }] }
    }
  },
  {
    "tweet": {
      "id_str": "102",
      "created_at": "Wed Jan 03 21:00:00 +0000 2024",
      "full_text": "@friend Thanks for the review, the tokenizer patch is merged and released now!"
    }
  },
  {
    "tweet": {
      "id_str": "103",
      "created_at": "Tue Jan 16 10:00:00 +0000 2024",
      "full_text": "hi"
    }
  },
  { "tweet": { "id_str": "104", "created_at": "Tue Jan 16 11:00:00 +0000 2024" } },
  { "tweet": { "id_str": "105", "created_at": "sometime last week", "full_text": "lost" } }
]
"#;

pub fn write_archive(dir: &Path) -> PathBuf {
    let path = dir.join("tweets.js");
    std::fs::write(&path, ARCHIVE_JS).unwrap();
    path
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn post(id: &str, created_at: DateTime<Utc>, text: &str) -> Post {
    Post::new(id, created_at, text)
}

pub fn raw(created_at: &str, text: &str) -> RawRecord {
    RawRecord {
        created_at: Some(created_at.to_string()),
        full_text: Some(text.to_string()),
        ..Default::default()
    }
}
