use crate::loader::LoadError;
use crate::output::{Message, QuizOutput};
use crate::quiz::State;


/// Waits for the player to retry after a failed load.
pub struct FailedState<O> {
    error: LoadError,
    output: O,
}

impl<O> FailedState<O> {
    pub fn new(error: LoadError, output: O) -> Self {
        FailedState { error, output }
    }

    pub fn error(&self) -> &LoadError {
        &self.error
    }
}

impl<O: QuizOutput> State for FailedState<O> {
    fn on_begin(&mut self) {
        let message = match &self.error {
            LoadError::Empty => Message::NothingFound,
            LoadError::Network(e) => Message::LoadFailed(e.to_string()),
        };
        self.output.say(&message);
    }

    fn on_tick(&mut self) {}

    fn on_end(&mut self) {}

    fn is_over(&self) -> bool {
        false
    }
}
