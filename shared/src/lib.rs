use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum_macros::{EnumIter, EnumString};

/// Body of `GET /api/health`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    pub model_loaded: bool,
    #[serde(default)]
    pub supported_emotions: Vec<String>,
}

/// Body of a successful `POST /api/predict`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionResult {
    pub emotion: String,
    pub confidence: f64,
    pub all_scores: BTreeMap<String, f64>,
}

/// Error body the service sends alongside a failed request.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Labels the classifier is trained on. The service does not keep a
/// consistent case (`happy` vs `Angry`), so parsing ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, strum_macros::Display, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Emotion {
    Angry,
    Happy,
    Other,
    Sad,
}

impl Emotion {
    pub fn emoji(self) -> &'static str {
        match self {
            Emotion::Angry => "😠",
            Emotion::Happy => "😊",
            Emotion::Other => "🤷",
            Emotion::Sad => "😢",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Emotion::Angry => "#FF6B6B",
            Emotion::Happy => "#FFD93D",
            Emotion::Other => "#95E1D3",
            Emotion::Sad => "#4ECDC4",
        }
    }
}

pub const FALLBACK_COLOR: &str = "#999";

/// Media types the uploader accepts. Anything else is rejected before it
/// reaches the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
pub enum ImageKind {
    #[strum(serialize = "image/jpeg")]
    Jpeg,
    #[strum(serialize = "image/png")]
    Png,
    #[strum(serialize = "image/gif")]
    Gif,
}

impl ImageKind {
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        Self::from_str(media_type).ok()
    }

    pub fn media_type(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
        }
    }
}

/// A fraction in `[0, 1]` shown as a percentage with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display)]
#[display(fmt = "{:.2}%", _0)]
pub struct Percent(pub f64);

impl Percent {
    pub fn from_fraction(fraction: f64) -> Self {
        Percent(fraction * 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Width for a CSS bar, clamped so a bad score never overflows its track.
    pub fn bar_width(self) -> f64 {
        self.0.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub label: String,
    pub emotion: Option<Emotion>,
    pub percent: Percent,
}

impl PredictionResult {
    pub fn emotion_label(&self) -> Option<Emotion> {
        self.emotion.parse().ok()
    }

    /// Headline figure. `confidence` is authoritative here even when the
    /// matching `all_scores` entry was rounded differently upstream.
    pub fn headline(&self) -> Percent {
        Percent::from_fraction(self.confidence)
    }

    pub fn score_rows(&self) -> Vec<ScoreRow> {
        self.all_scores
            .iter()
            .map(|(label, &score)| ScoreRow {
                label: label.clone(),
                emotion: label.parse().ok(),
                percent: Percent::from_fraction(score),
            })
            .collect()
    }
}
