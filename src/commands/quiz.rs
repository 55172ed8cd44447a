use anyhow::Result;
use std::sync::Arc;
use std::thread;

use crate::app::theme;
use crate::cache::KeyValueStore;
use crate::commands::prompt;
use crate::content::ContentSource;
use crate::output::console::ConsoleOutput;
use crate::quiz::definition::Slot;
use crate::quiz::{Quiz, SlotState, Status};
use crate::settings::Settings;

/// Slots the player may pick: the present ones, or all four for an empty question.
pub fn choices(present: &[Slot]) -> Vec<Slot> {
    if present.is_empty() {
        Slot::ALL.to_vec()
    } else {
        present.to_vec()
    }
}

pub fn parse_choice(input: &str, allowed: &[Slot]) -> Option<Slot> {
    let mut chars = input.trim().chars();
    let slot = match (chars.next(), chars.next()) {
        (Some(letter), None) => Slot::from_letter(letter)?,
        _ => return None,
    };
    if allowed.contains(&slot) {
        Some(slot)
    } else {
        None
    }
}

fn is_quit(input: &str) -> bool {
    input.eq_ignore_ascii_case("q")
}

fn print_board<O: crate::output::QuizOutput>(quiz: &Quiz<O>) {
    for (slot, text, state) in quiz.answer_board() {
        let mark = match state {
            SlotState::Correct => " ✅",
            SlotState::Incorrect => " ❌",
            SlotState::Neutral => "",
        };
        println!("  {}) {}{}", slot, text, mark);
    }
}

fn replay_prompt<O: crate::output::QuizOutput>(quiz: &Quiz<O>) -> String {
    match quiz.last_result() {
        Some(result) => format!(
            "You scored {} / {}. Play again? [y/N] ",
            result.score, result.max_score
        ),
        None => "Play again? [y/N] ".to_owned(),
    }
}

pub fn play(
    settings: &Settings,
    source: Arc<dyn ContentSource>,
    store: Arc<dyn KeyValueStore>,
) -> Result<()> {
    let output = ConsoleOutput::new(theme::load_theme(store.as_ref()));
    let mut quiz = Quiz::new(settings.quiz.clone(), source, store, output);

    loop {
        match quiz.status() {
            Status::Loading | Status::Ready => {
                quiz.tick();
                thread::sleep(settings.quiz.tick_interval);
            }
            Status::Answering => {
                let present: Vec<Slot> = quiz
                    .current_question()
                    .map(|q| q.slots().map(|(slot, _)| slot).collect())
                    .unwrap_or_default();
                let allowed = choices(&present);
                let letters: Vec<String> = allowed.iter().map(Slot::to_string).collect();
                let input = match prompt(&format!("Your answer ({}, q to quit): ", letters.join("/")))? {
                    Some(input) => input,
                    None => return Ok(()),
                };
                if is_quit(&input) {
                    return Ok(());
                }
                match parse_choice(&input, &allowed) {
                    Some(slot) => {
                        quiz.select(slot)?;
                        print_board(&quiz);
                    }
                    None => println!("Pick one of {}.", letters.join(", ")),
                }
            }
            Status::Revealed => match prompt("")? {
                Some(input) if is_quit(&input) => return Ok(()),
                Some(_) => quiz.next()?,
                None => return Ok(()),
            },
            Status::Finished => match prompt(&replay_prompt(&quiz))? {
                Some(input) if input.eq_ignore_ascii_case("y") => quiz.restart()?,
                _ => return Ok(()),
            },
            Status::Error(_) => match prompt("Try again? [y/N] ")? {
                Some(input) if input.eq_ignore_ascii_case("y") => quiz.retry()?,
                _ => return Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_present_slots_only() {
        let allowed = choices(&[Slot::A, Slot::B]);
        assert_eq!(parse_choice("b", &allowed), Some(Slot::B));
        assert_eq!(parse_choice(" A ", &allowed), Some(Slot::A));
        assert_eq!(parse_choice("C", &allowed), None);
        assert_eq!(parse_choice("AB", &allowed), None);
        assert_eq!(parse_choice("", &allowed), None);
    }

    #[test]
    fn empty_question_allows_every_slot() {
        let allowed = choices(&[]);
        assert_eq!(allowed, Slot::ALL.to_vec());
        assert_eq!(parse_choice("d", &allowed), Some(Slot::D));
    }
}
