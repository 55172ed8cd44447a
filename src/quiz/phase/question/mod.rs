use crate::output::{Message, QuizOutput};
use crate::quiz::definition::{Question, Slot};
use crate::quiz::State;


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Selection {
    Correct,
    Incorrect,
    Ignored,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotState {
    Neutral,
    Correct,
    Incorrect,
}

/// How an answer button looks. Everything is neutral until an answer is locked in.
pub fn slot_state(slot: Slot, answer_locked: bool, selected: Option<Slot>, correct: Slot) -> SlotState {
    if !answer_locked {
        SlotState::Neutral
    } else if slot == correct {
        SlotState::Correct
    } else if selected == Some(slot) {
        SlotState::Incorrect
    } else {
        SlotState::Neutral
    }
}

pub struct QuestionState<O> {
    question: Question,
    number: usize,
    total: usize,
    score: u32,
    selected: Option<Slot>,
    output: O,
}

impl<O: QuizOutput> QuestionState<O> {
    /// `number` is 1-based; `score` is the session score when the question is shown.
    pub fn new(question: Question, number: usize, total: usize, score: u32, output: O) -> Self {
        QuestionState {
            question,
            number,
            total,
            score,
            selected: None,
            output,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn selected(&self) -> Option<Slot> {
        self.selected
    }

    pub fn is_locked(&self) -> bool {
        self.selected.is_some()
    }

    pub fn select(&mut self, slot: Slot) -> Selection {
        if self.is_locked() {
            return Selection::Ignored;
        }
        self.selected = Some(slot);

        let selection = if self.question.is_correct(slot) {
            self.output.say(&Message::GuessCorrect(slot));
            Selection::Correct
        } else {
            self.output
                .say(&Message::GuessIncorrect(slot, self.question.clone()));
            Selection::Incorrect
        };
        self.output
            .say(&Message::AnswerReveal(self.question.clone(), slot));
        selection
    }

    pub fn slot_state(&self, slot: Slot) -> SlotState {
        slot_state(
            slot,
            self.is_locked(),
            self.selected,
            self.question.correct_slot,
        )
    }
}

impl<O: QuizOutput> State for QuestionState<O> {
    fn on_begin(&mut self) {
        self.output.say(&Message::QuestionBegins {
            question: self.question.clone(),
            number: self.number,
            total: self.total,
            score: self.score,
        });
    }

    fn on_tick(&mut self) {}

    fn on_end(&mut self) {}

    fn is_over(&self) -> bool {
        false
    }
}
