use crate::output::{Message, QuizOutput};
use crate::quiz::State;

/// Questions are in hand; the first one is shown on the next tick.
pub struct ReadyState<O> {
    question_count: usize,
    output: O,
}

impl<O> ReadyState<O> {
    pub fn new(question_count: usize, output: O) -> Self {
        ReadyState {
            question_count,
            output,
        }
    }
}

impl<O: QuizOutput> State for ReadyState<O> {
    fn on_begin(&mut self) {
        self.output.say(&Message::QuizReady(self.question_count));
    }

    fn on_tick(&mut self) {}

    fn on_end(&mut self) {}

    fn is_over(&self) -> bool {
        true
    }
}
