use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;

use crate::content::{Character, ContentSource, Episode, GatewayError};
use crate::quiz::definition::RawQuestion;

pub fn raw_questions(count: usize) -> Vec<RawQuestion> {
    (0..count)
        .map(|i| RawQuestion {
            id: i as i64,
            question: format!("Question #{}", i),
            candidates: vec![
                "Aang".to_owned(),
                "Katara".to_owned(),
                "Sokka".to_owned(),
                "Toph".to_owned(),
            ],
            correct_answer_text: "Katara".to_owned(),
        })
        .collect()
}

pub struct MockContentSource {
    questions: Mutex<Result<Vec<RawQuestion>, GatewayError>>,
    characters: Vec<Character>,
    episodes: Vec<Episode>,
    gate: Option<Mutex<Receiver<()>>>,
    question_fetches: AtomicUsize,
}

impl MockContentSource {
    pub fn new(questions: Vec<RawQuestion>) -> Self {
        MockContentSource {
            questions: Mutex::new(Ok(questions)),
            characters: Vec::new(),
            episodes: Vec::new(),
            gate: None,
            question_fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        let source = MockContentSource::new(Vec::new());
        source.set_questions(Err(error));
        source
    }

    /// Question fetches block until the matching sender sends or hangs up.
    pub fn gated(questions: Vec<RawQuestion>, gate: Receiver<()>) -> Self {
        MockContentSource {
            gate: Some(Mutex::new(gate)),
            ..MockContentSource::new(questions)
        }
    }

    pub fn set_questions(&self, questions: Result<Vec<RawQuestion>, GatewayError>) {
        *self.questions.lock() = questions;
    }

    pub fn question_fetches(&self) -> usize {
        self.question_fetches.load(Ordering::SeqCst)
    }
}

impl ContentSource for MockContentSource {
    fn fetch_questions(&self) -> Result<Vec<RawQuestion>, GatewayError> {
        if let Some(gate) = &self.gate {
            gate.lock().recv().ok();
        }
        self.question_fetches.fetch_add(1, Ordering::SeqCst);
        self.questions.lock().clone()
    }

    fn fetch_characters(&self) -> Result<Vec<Character>, GatewayError> {
        Ok(self.characters.clone())
    }

    fn fetch_episodes(&self) -> Result<Vec<Episode>, GatewayError> {
        Ok(self.episodes.clone())
    }
}
