use log::{info, warn};
use std::sync::Arc;

use crate::cache::{self, KeyValueStore, LAST_QUIZ_RESULT_KEY};
use crate::output::{Message, QuizOutput};
use crate::quiz::result::QuizResult;
use crate::quiz::State;


pub struct ResultsState<O> {
    result: QuizResult,
    store: Arc<dyn KeyValueStore>,
    output: O,
}

impl<O> ResultsState<O> {
    pub fn new(result: QuizResult, store: Arc<dyn KeyValueStore>, output: O) -> Self {
        ResultsState {
            result,
            store,
            output,
        }
    }

    pub fn result(&self) -> &QuizResult {
        &self.result
    }
}

impl<O: QuizOutput> State for ResultsState<O> {
    fn on_begin(&mut self) {
        match cache::save_json(self.store.as_ref(), LAST_QUIZ_RESULT_KEY, &self.result) {
            Ok(()) => info!(
                "Saved quiz result {}/{}",
                self.result.score, self.result.max_score
            ),
            Err(e) => warn!("Could not save quiz result: {:#}", e),
        }
        self.output.say(&Message::QuizResults(
            self.result.clone(),
            self.result.band(),
        ));
    }

    fn on_tick(&mut self) {}

    fn on_end(&mut self) {}

    fn is_over(&self) -> bool {
        false
    }
}
