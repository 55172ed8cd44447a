use crate::quiz::definition::{Question, Slot};
use crate::quiz::result::{QuizResult, ResultBand};

pub mod console;
#[cfg(test)]
pub mod mock;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    QuizLoading,
    QuizReady(usize),
    QuestionBegins {
        question: Question,
        number: usize,
        total: usize,
        score: u32,
    },
    GuessCorrect(Slot),
    GuessIncorrect(Slot, Question),
    AnswerReveal(Question, Slot),
    QuizResults(QuizResult, ResultBand),
    LoadFailed(String),
    NothingFound,
}

pub trait QuizOutput: Clone {
    fn say(&self, message: &Message);
}
