use crate::app::Theme;
use crate::output::{Message, QuizOutput};
use crate::quiz::definition::Question;
use crate::quiz::result::ResultBand;

const RESET: &str = "\x1b[0m";

#[derive(Clone, Debug)]
pub struct ConsoleOutput {
    theme: Theme,
}

impl ConsoleOutput {
    pub fn new(theme: Theme) -> Self {
        ConsoleOutput { theme }
    }

    fn accent(&self, text: &str) -> String {
        format!("{}{}{}", self.theme.accent(), text, RESET)
    }

    fn describe_answers(question: &Question) -> String {
        question
            .slots()
            .map(|(slot, text)| format!("  {}) {}", slot, text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn interpret_message(&self, message: &Message) -> String {
        use Message::*;
        match message {
            QuizLoading => "Loading questions...".into(),
            QuizReady(count) => format!("{} questions are ready. Good luck!", count),
            QuestionBegins {
                question,
                number,
                total,
                score,
            } => format!(
                "{}\n{}\n{}",
                self.accent(&format!("Question {}/{} (score {})", number, total, score)),
                question.text,
                Self::describe_answers(question)
            ),
            GuessCorrect(slot) => format!("✅ {} is correct!", slot),
            GuessIncorrect(slot, question) => format!(
                "❌ {} is wrong. The answer was {}) {}.",
                slot,
                question.correct_slot,
                question
                    .answer(question.correct_slot)
                    .unwrap_or(&question.correct_answer_text)
            ),
            AnswerReveal(_, _) => "Press enter for the next question.".into(),
            QuizResults(result, band) => {
                let verdict = match band {
                    ResultBand::Lost => "You lost! Try again!",
                    ResultBand::Pass => "Well done! A pass.",
                    ResultBand::Excellent => "Fantastic! You are a true Avatar expert!",
                };
                format!(
                    "{}\n{}",
                    self.accent(&format!("Your score: {} / {}", result.score, result.max_score)),
                    verdict
                )
            }
            LoadFailed(error) => format!("Could not load questions: {}", error),
            NothingFound => "No questions found.".into(),
        }
    }
}

impl QuizOutput for ConsoleOutput {
    fn say(&self, message: &Message) {
        println!("{}", self.interpret_message(message));
    }
}
