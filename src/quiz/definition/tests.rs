use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use super::*;

fn raw(id: i64, candidates: &[&str], correct: &str) -> RawQuestion {
    RawQuestion {
        id,
        question: format!("question {}", id),
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
        correct_answer_text: correct.to_owned(),
    }
}

#[test]
fn places_candidates_in_slot_order() {
    let question: Question = raw(1, &["Aang", "Katara", "Sokka", "Toph"], "Sokka").into();
    assert_eq!(question.answer(Slot::A), Some("Aang"));
    assert_eq!(question.answer(Slot::B), Some("Katara"));
    assert_eq!(question.answer(Slot::C), Some("Sokka"));
    assert_eq!(question.answer(Slot::D), Some("Toph"));
    assert_eq!(question.correct_slot, Slot::C);
    assert_eq!(question.id, "1");
}

#[test]
fn correct_slot_holds_correct_answer_text() {
    let questions = vec![
        raw(1, &["Appa", "Momo"], "Appa"),
        raw(2, &["Zuko", "Iroh", "Azula"], "Azula"),
        raw(3, &["Ba Sing Se", "Omashu", "Kyoshi", "Gaoling"], "Gaoling"),
    ];
    for question in normalize(questions) {
        assert_eq!(
            question.answer(question.correct_slot),
            Some(question.correct_answer_text.as_str())
        );
    }
}

#[test]
fn first_matching_slot_wins() {
    let question: Question = raw(1, &["Momo", "Appa", "Appa"], "Appa").into();
    assert_eq!(question.correct_slot, Slot::B);
}

#[test]
fn matching_is_exact() {
    let question: Question = raw(1, &["appa", "Appa "], "Appa").into();
    assert_eq!(question.correct_slot, Slot::A);
    let question: Question = raw(2, &["appa", "Appa "], "Appa ").into();
    assert_eq!(question.correct_slot, Slot::B);
}

#[test]
fn unmatched_answer_falls_back_to_slot_a() {
    let question: Question = raw(7, &["Fire", "Water", "Earth"], "Air").into();
    assert_eq!(question.correct_slot, Slot::A);
    assert_eq!(question.answer(Slot::A), Some("Fire"));
    assert_eq!(question.correct_answer_text, "Air");
}

#[test]
fn missing_candidates_leave_slots_absent() {
    let question: Question = raw(1, &[], "anything").into();
    assert!(question.answers.is_empty());
    assert_eq!(question.correct_slot, Slot::A);
    assert_eq!(question.slots().count(), 0);
}

#[test]
fn two_candidate_questions_resolve_to_b() {
    let questions = normalize(vec![
        raw(1, &["Fire Nation", "Water Tribe"], "Water Tribe"),
        raw(2, &["Sozin", "Roku"], "Roku"),
        raw(3, &["Yue", "Suki"], "Suki"),
    ]);
    assert_eq!(questions.len(), 3);
    for question in &questions {
        assert_eq!(question.correct_slot, Slot::B);
        assert!(question.answer(Slot::C).is_none());
        assert!(question.answer(Slot::D).is_none());
    }
}

#[test]
fn normalization_preserves_order_and_length() {
    let raw_questions: Vec<RawQuestion> = (0..25).map(|i| raw(i, &["x", "y"], "y")).collect();
    let questions = normalize(raw_questions.clone());
    assert_eq!(questions.len(), raw_questions.len());
    for (raw_question, question) in raw_questions.iter().zip(questions.iter()) {
        assert_eq!(question.id, raw_question.id.to_string());
        assert_eq!(question.text, raw_question.question);
    }
}

#[test]
fn sample_is_capped_and_without_replacement() {
    let definition = QuizDefinition::new((0..30).map(|i| raw(i, &["x"], "x")).collect());
    let mut rng = StdRng::seed_from_u64(99);
    let sample = definition.sample(&mut rng, 10);
    assert_eq!(sample.len(), 10);
    let ids: HashSet<&str> = sample.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), 10);
}

#[test]
fn sample_of_small_set_takes_everything() {
    let definition = QuizDefinition::new((0..4).map(|i| raw(i, &["x"], "x")).collect());
    let mut rng = StdRng::seed_from_u64(3);
    let sample = definition.sample(&mut rng, 10);
    assert_eq!(sample.len(), 4);
    let ids: HashSet<&str> = sample.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), 4);
}
