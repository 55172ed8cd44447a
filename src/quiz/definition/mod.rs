use rand::seq::SliceRandom;
use rand::Rng;

pub mod question;

pub use question::{Question, RawQuestion, Slot};

#[cfg(test)]
mod tests;

/// The full normalized question set a session draws its sample from.
#[derive(Debug, Default)]
pub struct QuizDefinition {
    questions: Vec<Question>,
}

impl QuizDefinition {
    pub fn new(raw_questions: Vec<RawQuestion>) -> QuizDefinition {
        QuizDefinition {
            questions: normalize(raw_questions),
        }
    }

    pub fn get_questions(&self) -> &Vec<Question> {
        &self.questions
    }

    /// Picks up to `count` distinct questions and shuffles their order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Question> {
        let mut questions: Vec<Question> = self
            .questions
            .choose_multiple(rng, count)
            .cloned()
            .collect();
        questions.shuffle(rng);
        questions
    }
}

pub fn normalize(raw_questions: Vec<RawQuestion>) -> Vec<Question> {
    raw_questions.into_iter().map(Question::from).collect()
}
