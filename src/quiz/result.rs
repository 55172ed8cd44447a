use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const PASS_SCORE: u32 = 5;
pub const EXCELLENT_SCORE: u32 = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResultBand {
    Lost,
    Pass,
    Excellent,
}

impl ResultBand {
    /// Bands are fixed against a ten question quiz, whatever the session length.
    pub fn for_score(score: u32) -> ResultBand {
        if score < PASS_SCORE {
            ResultBand::Lost
        } else if score < EXCELLENT_SCORE {
            ResultBand::Pass
        } else {
            ResultBand::Excellent
        }
    }
}

/// Summary of a finished session, stored under `lastQuizScore`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: u32,
    pub max_score: u32,
    #[serde(rename = "date")]
    pub timestamp: String,
}

impl QuizResult {
    pub fn new(score: u32, max_score: u32) -> Self {
        QuizResult {
            score,
            max_score,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn band(&self) -> ResultBand {
        ResultBand::for_score(self.score)
    }

    pub fn taken_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
