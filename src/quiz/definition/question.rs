use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the four fixed answer positions of a question.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Slot {
    A,
    B,
    C,
    D,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::A, Slot::B, Slot::C, Slot::D];

    pub fn from_letter(letter: char) -> Option<Slot> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Slot::A),
            'B' => Some(Slot::B),
            'C' => Some(Slot::C),
            'D' => Some(Slot::D),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Slot::A => "A",
            Slot::B => "B",
            Slot::C => "C",
            Slot::D => "D",
        };
        f.write_str(letter)
    }
}

/// A question record as validated by the content gateway, before slots are assigned.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RawQuestion {
    pub id: i64,
    pub question: String,
    pub candidates: Vec<String>,
    pub correct_answer_text: String,
}

/// A question with its candidates laid out in labeled slots.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub answers: BTreeMap<Slot, String>,
    pub correct_slot: Slot,
    pub correct_answer_text: String,
}

impl Question {
    pub fn answer(&self, slot: Slot) -> Option<&str> {
        self.answers.get(&slot).map(String::as_str)
    }

    /// Present slots only, in A to D order.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.answers.iter().map(|(slot, text)| (*slot, text.as_str()))
    }

    pub fn is_correct(&self, slot: Slot) -> bool {
        self.correct_slot == slot
    }
}

impl From<RawQuestion> for Question {
    fn from(raw_question: RawQuestion) -> Self {
        let answers: BTreeMap<Slot, String> = Slot::ALL
            .iter()
            .copied()
            .zip(raw_question.candidates.into_iter())
            .collect();

        // Falls back to A when nothing matches, which leaves a wrong answer key.
        let correct_answer_text = &raw_question.correct_answer_text;
        let correct_slot = answers
            .iter()
            .find(|(_slot, text)| *text == correct_answer_text)
            .map(|(slot, _text)| *slot)
            .unwrap_or(Slot::A);

        Question {
            id: raw_question.id.to_string(),
            text: raw_question.question,
            answers,
            correct_slot,
            correct_answer_text: raw_question.correct_answer_text,
        }
    }
}
