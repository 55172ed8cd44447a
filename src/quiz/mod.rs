use anyhow::{anyhow, Result};
use log::info;
use std::sync::Arc;

use self::definition::*;
use self::phase::*;
use self::result::QuizResult;
use crate::cache::KeyValueStore;
use crate::content::ContentSource;
use crate::loader::LoadError;
use crate::output::QuizOutput;

pub mod definition;
mod phase;
pub mod result;
pub mod settings;

pub use self::phase::{slot_state, Selection, SlotState};
pub use self::settings::Settings;


trait State {
    fn on_begin(&mut self);
    fn on_tick(&mut self);
    fn on_end(&mut self);
    fn is_over(&self) -> bool;
}

enum Phase<O> {
    Loading(LoadingState<O>),
    Failed(FailedState<O>),
    Ready(ReadyState<O>),
    Question(QuestionState<O>),
    Results(ResultsState<O>),
}

impl<O: QuizOutput> Phase<O> {
    fn get_state(&mut self) -> &mut dyn State {
        match self {
            Phase::Loading(s) => s,
            Phase::Failed(s) => s,
            Phase::Ready(s) => s,
            Phase::Question(s) => s,
            Phase::Results(s) => s,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Phase::Loading(_) => "loading",
            Phase::Failed(_) => "error",
            Phase::Ready(_) => "ready",
            Phase::Question(s) if s.is_locked() => "revealed",
            Phase::Question(_) => "answering",
            Phase::Results(_) => "finished",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Status {
    Loading,
    Error(LoadError),
    Ready,
    Answering,
    Revealed,
    Finished,
}

/// One run through a sampled set of questions.
pub struct Quiz<O: QuizOutput> {
    settings: Settings,
    source: Arc<dyn ContentSource>,
    store: Arc<dyn KeyValueStore>,
    output: O,
    current_phase: Phase<O>,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    finished: bool,
}

impl<O: QuizOutput> Quiz<O> {
    pub fn new(
        settings: Settings,
        source: Arc<dyn ContentSource>,
        store: Arc<dyn KeyValueStore>,
        output: O,
    ) -> Quiz<O> {
        let loading = LoadingState::new(
            Arc::clone(&source),
            settings.question_count,
            output.clone(),
        );
        let mut quiz = Quiz {
            settings,
            source,
            store,
            output,
            current_phase: Phase::Loading(loading),
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            finished: false,
        };
        info!("Entering quiz phase: {}", quiz.current_phase.name());
        quiz.current_phase.get_state().on_begin();
        quiz
    }

    pub fn status(&self) -> Status {
        match &self.current_phase {
            Phase::Loading(_) => Status::Loading,
            Phase::Failed(s) => Status::Error(s.error().clone()),
            Phase::Ready(_) => Status::Ready,
            Phase::Question(s) if s.is_locked() => Status::Revealed,
            Phase::Question(_) => Status::Answering,
            Phase::Results(_) => Status::Finished,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.current_phase {
            Phase::Question(s) => Some(s.question()),
            _ => None,
        }
    }

    pub fn selected_slot(&self) -> Option<Slot> {
        match &self.current_phase {
            Phase::Question(s) => s.selected(),
            _ => None,
        }
    }

    pub fn is_answer_locked(&self) -> bool {
        match &self.current_phase {
            Phase::Question(s) => s.is_locked(),
            _ => false,
        }
    }

    /// Present slots of the current question with how each should be drawn.
    pub fn answer_board(&self) -> Vec<(Slot, String, SlotState)> {
        match &self.current_phase {
            Phase::Question(s) => s
                .question()
                .slots()
                .map(|(slot, text)| (slot, text.to_owned(), s.slot_state(slot)))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn last_result(&self) -> Option<&QuizResult> {
        match &self.current_phase {
            Phase::Results(s) => Some(s.result()),
            _ => None,
        }
    }

    fn set_current_phase(&mut self, phase: Phase<O>) {
        self.current_phase.get_state().on_end();
        self.current_phase = phase;
        info!("Entering quiz phase: {}", self.current_phase.name());
        self.current_phase.get_state().on_begin();
    }

    pub fn tick(&mut self) {
        let state = self.current_phase.get_state();
        state.on_tick();
        if state.is_over() {
            self.advance();
        }
    }

    pub fn select(&mut self, slot: Slot) -> Result<Selection> {
        match &mut self.current_phase {
            Phase::Question(question_state) => {
                let selection = question_state.select(slot);
                if selection == Selection::Correct {
                    self.score += 1;
                }
                Ok(selection)
            }
            _ => Err(anyhow!("There is no question to answer")),
        }
    }

    /// Moves past a revealed question, finishing the quiz after the last one.
    pub fn next(&mut self) -> Result<()> {
        match &self.current_phase {
            Phase::Question(s) if s.is_locked() => {
                if self.current_index + 1 < self.questions.len() {
                    self.current_index += 1;
                    self.begin_question();
                } else {
                    self.finish();
                }
                Ok(())
            }
            Phase::Question(_) => Err(anyhow!("Pick an answer before moving on")),
            _ => Err(anyhow!("There is no question to move past")),
        }
    }

    pub fn restart(&mut self) -> Result<()> {
        match &self.current_phase {
            Phase::Results(_) => {
                self.current_index = 0;
                self.score = 0;
                self.finished = false;
                self.questions.clear();
                self.begin_loading();
                Ok(())
            }
            _ => Err(anyhow!("The quiz can only be restarted once it is over")),
        }
    }

    pub fn retry(&mut self) -> Result<()> {
        match &self.current_phase {
            Phase::Failed(_) => {
                self.begin_loading();
                Ok(())
            }
            _ => Err(anyhow!("There is no failed load to retry")),
        }
    }

    fn advance(&mut self) {
        match &mut self.current_phase {
            Phase::Loading(loading_state) => match loading_state.take_outcome() {
                Some(Ok(questions)) => {
                    self.questions = questions;
                    self.current_index = 0;
                    let state = ReadyState::new(self.questions.len(), self.output.clone());
                    self.set_current_phase(Phase::Ready(state));
                }
                Some(Err(e)) => {
                    let state = FailedState::new(e, self.output.clone());
                    self.set_current_phase(Phase::Failed(state));
                }
                None => (),
            },
            Phase::Ready(_) => self.begin_question(),
            Phase::Failed(_) | Phase::Question(_) | Phase::Results(_) => (),
        }
    }

    fn begin_loading(&mut self) {
        let state = LoadingState::new(
            Arc::clone(&self.source),
            self.settings.question_count,
            self.output.clone(),
        );
        self.set_current_phase(Phase::Loading(state));
    }

    fn begin_question(&mut self) {
        if let Some(question) = self.questions.get(self.current_index).cloned() {
            let state = QuestionState::new(
                question,
                self.current_index + 1,
                self.questions.len(),
                self.score,
                self.output.clone(),
            );
            self.set_current_phase(Phase::Question(state));
        } else {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        let result = QuizResult::new(self.score, self.questions.len() as u32);
        let state = ResultsState::new(result, Arc::clone(&self.store), self.output.clone());
        self.set_current_phase(Phase::Results(state));
    }
}
