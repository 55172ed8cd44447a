use std::sync::Arc;

use crate::content::ContentSource;
use crate::loader::{self, LoadError, LoadHandle};
use crate::output::{Message, QuizOutput};
use crate::quiz::definition::Question;
use crate::quiz::State;


pub struct LoadingState<O> {
    load_handle: LoadHandle,
    outcome: Option<Result<Vec<Question>, LoadError>>,
    output: O,
}

impl<O: QuizOutput> LoadingState<O> {
    pub fn new(source: Arc<dyn ContentSource>, question_count: usize, output: O) -> Self {
        LoadingState {
            load_handle: loader::load_questions(source, question_count),
            outcome: None,
            output,
        }
    }

    pub fn take_outcome(&mut self) -> Option<Result<Vec<Question>, LoadError>> {
        self.outcome.take()
    }
}

impl<O: QuizOutput> State for LoadingState<O> {
    fn on_begin(&mut self) {
        self.output.say(&Message::QuizLoading);
    }

    fn on_tick(&mut self) {
        if self.outcome.is_none() {
            self.outcome = self.load_handle.try_take();
        }
    }

    fn on_end(&mut self) {}

    fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}
