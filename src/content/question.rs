use anyhow::{anyhow, Result};
use log::warn;
use serde::Deserialize;

use crate::quiz::definition::RawQuestion;

const MAX_CANDIDATES: usize = 4;

#[derive(Deserialize)]
pub struct WireQuestion {
    id: Option<i64>,
    question: Option<String>,
    #[serde(rename = "possibleAnsers", alias = "possibleAnswers")]
    possible_answers: Option<Vec<String>>,
    #[serde(rename = "correctAnswer")]
    correct_answer: Option<String>,
}

pub fn into_raw_question(wire: WireQuestion) -> Result<RawQuestion> {
    let id = wire.id.ok_or_else(|| anyhow!("missing id"))?;
    let question = wire
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| anyhow!("question {} has no text", id))?;
    let correct_answer_text = wire
        .correct_answer
        .ok_or_else(|| anyhow!("question {} has no correct answer", id))?;

    let mut candidates = wire.possible_answers.unwrap_or_default();
    if candidates.len() > MAX_CANDIDATES {
        warn!(
            "Question {} has {} candidates, keeping the first {}",
            id,
            candidates.len(),
            MAX_CANDIDATES
        );
        candidates.truncate(MAX_CANDIDATES);
    }

    Ok(RawQuestion {
        id,
        question,
        candidates,
        correct_answer_text,
    })
}
