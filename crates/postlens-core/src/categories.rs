//! Categorical bins over numeric post features
//!
//! Every `from_*` constructor is total: each input value lands in exactly one
//! bin. Labels are stable snake_case strings used both in exports and in
//! summary tables.

use serde::{Deserialize, Serialize};

macro_rules! labels {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Part of the day, by UTC hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeCategory {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl TimeCategory {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeCategory::Night,
            6..=11 => TimeCategory::Morning,
            12..=17 => TimeCategory::Afternoon,
            _ => TimeCategory::Evening,
        }
    }
}

labels!(TimeCategory {
    Night => "night",
    Morning => "morning",
    Afternoon => "afternoon",
    Evening => "evening",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Quarter-based: Jan–Mar is winter.
    pub fn from_month(month: u32) -> Self {
        match month {
            0..=3 => Season::Winter,
            4..=6 => Season::Spring,
            7..=9 => Season::Summer,
            _ => Season::Autumn,
        }
    }
}

labels!(Season {
    Winter => "winter",
    Spring => "spring",
    Summer => "summer",
    Autumn => "autumn",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    /// `weekday` counts from Monday = 0
    pub fn from_weekday(weekday: u32) -> Self {
        if weekday >= 5 {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }
}

labels!(DayType {
    Weekday => "weekday",
    Weekend => "weekend",
});

/// Length bin over the character count, right-closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthCategory {
    Short,
    Medium,
    Long,
    VeryLong,
}

impl LengthCategory {
    pub fn from_chars(chars: usize) -> Self {
        match chars {
            0..=20 => LengthCategory::Short,
            21..=50 => LengthCategory::Medium,
            51..=100 => LengthCategory::Long,
            _ => LengthCategory::VeryLong,
        }
    }
}

labels!(LengthCategory {
    Short => "short",
    Medium => "medium",
    Long => "long",
    VeryLong => "very_long",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionCategory {
    None,
    Single,
    Double,
    Multiple,
}

impl MentionCategory {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => MentionCategory::None,
            1 => MentionCategory::Single,
            2 => MentionCategory::Double,
            _ => MentionCategory::Multiple,
        }
    }
}

labels!(MentionCategory {
    None => "none",
    Single => "single",
    Double => "double",
    Multiple => "multiple",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashtagCategory {
    None,
    Single,
    Multiple,
}

impl HashtagCategory {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => HashtagCategory::None,
            1 => HashtagCategory::Single,
            _ => HashtagCategory::Multiple,
        }
    }
}

labels!(HashtagCategory {
    None => "none",
    Single => "single",
    Multiple => "multiple",
});

/// Bin over `engagement_score` (mentions + hashtags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementCategory {
    None,
    Low,
    Medium,
    High,
}

impl EngagementCategory {
    pub fn from_score(score: usize) -> Self {
        match score {
            0 => EngagementCategory::None,
            1 => EngagementCategory::Low,
            2 => EngagementCategory::Medium,
            _ => EngagementCategory::High,
        }
    }
}

labels!(EngagementCategory {
    None => "none",
    Low => "low",
    Medium => "medium",
    High => "high",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunctuationIntensity {
    Low,
    High,
}

impl PunctuationIntensity {
    pub fn from_counts(exclamations: usize, questions: usize) -> Self {
        if exclamations + questions > 1 {
            PunctuationIntensity::High
        } else {
            PunctuationIntensity::Low
        }
    }
}

labels!(PunctuationIntensity {
    Low => "low",
    High => "high",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Complex,
}

impl Complexity {
    pub fn from_text_stats(chars: usize, unique_word_ratio: f64) -> Self {
        if chars > 50 && unique_word_ratio > 0.8 {
            Complexity::Complex
        } else {
            Complexity::Simple
        }
    }
}

labels!(Complexity {
    Simple => "simple",
    Complex => "complex",
});

/// Corpus-relative activity bin, used for per-day frequency and per-hour
/// density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    /// Right-closed bins: `(0, low]`, `(low, high]`, `(high, ∞)`.
    ///
    /// A value at or below zero is `Low`. When the two edges coincide the
    /// middle bin is empty.
    pub fn from_edges(value: f64, low: f64, high: f64) -> Self {
        if value <= low {
            ActivityLevel::Low
        } else if value <= high {
            ActivityLevel::Medium
        } else {
            ActivityLevel::High
        }
    }
}

labels!(ActivityLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});
