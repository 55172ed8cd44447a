use log::{debug, info};
use parking_lot::Mutex;
use rand::thread_rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

use crate::content::{ContentSource, GatewayError};
use crate::quiz::definition::{Question, QuizDefinition};

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LoadError {
    #[error(transparent)]
    Network(#[from] GatewayError),
    #[error("no quiz questions found")]
    Empty,
}

#[derive(Debug)]
enum LoadState {
    InProgress,
    Done(Result<Vec<Question>, LoadError>),
}

/// Receiving end of a background question load. Dropping it abandons the load.
pub struct LoadHandle {
    slot: Arc<Mutex<LoadState>>,
    alive: Arc<AtomicBool>,
}

impl LoadHandle {
    /// Returns the outcome once, as soon as the worker has published it.
    pub fn try_take(&self) -> Option<Result<Vec<Question>, LoadError>> {
        let mut slot = self.slot.lock();
        match std::mem::replace(&mut *slot, LoadState::InProgress) {
            LoadState::InProgress => None,
            LoadState::Done(outcome) => Some(outcome),
        }
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        let _slot = self.slot.lock();
        self.alive.store(false, Ordering::SeqCst);
    }
}

pub fn load_questions(source: Arc<dyn ContentSource>, count: usize) -> LoadHandle {
    spawn_load(source, count).0
}

fn spawn_load(source: Arc<dyn ContentSource>, count: usize) -> (LoadHandle, JoinHandle<()>) {
    let slot = Arc::new(Mutex::new(LoadState::InProgress));
    let alive = Arc::new(AtomicBool::new(true));

    let worker_slot = Arc::clone(&slot);
    let worker_alive = Arc::clone(&alive);
    let worker = thread::spawn(move || {
        let outcome = fetch_sample(source.as_ref(), count);
        let mut slot = worker_slot.lock();
        if worker_alive.load(Ordering::SeqCst) {
            *slot = LoadState::Done(outcome);
        } else {
            debug!("Discarding question load for a closed quiz");
        }
    });

    (LoadHandle { slot, alive }, worker)
}

/// Fetches every question, normalizes them and draws a shuffled sample of at most `count`.
pub fn fetch_sample(source: &dyn ContentSource, count: usize) -> Result<Vec<Question>, LoadError> {
    let definition = QuizDefinition::new(source.fetch_questions()?);
    let questions = definition.sample(&mut thread_rng(), count);
    if questions.is_empty() {
        return Err(LoadError::Empty);
    }
    info!(
        "Loaded {} questions, playing {}",
        definition.get_questions().len(),
        questions.len()
    );
    Ok(questions)
}
