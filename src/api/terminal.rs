use std::io::Write;

use tracing::warn;

use crate::{
    api::presenter::Presenter,
    models::{
        event::QuizEvent,
        question::{QuestionRecord, QuestionSet},
        session::{Phase, ScreenId, SubmissionStatus},
    },
    service::validation::escape_html,
};

/// Plain text presenter for a line based terminal session.
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!("Failed to flush terminal: {}", e);
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_screen(&mut self, screen: ScreenId) {
        let (title, hint) = match screen {
            ScreenId::Start => (
                "TRIVIA",
                "Type your name to start, '/again' to reload questions or '/quit' to leave.",
            ),
            ScreenId::QuestionSelection => ("PICK A QUESTION", "Type the number of the current question."),
            ScreenId::Question => ("QUESTION", "Type 'go' to reveal, then A-D to answer, 'next' to continue."),
            ScreenId::Result => ("RESULTS", "Type 'save' to post your score or 'again' to play again."),
        };

        self.line("");
        self.line(&format!("=== {} ===", title));
        self.line(hint);
        self.flush();
    }

    fn render_selection_screen(&mut self, questions: &QuestionSet, current_index: usize) {
        for (index, question) in questions.iter().enumerate() {
            let marker = if index < current_index {
                "[done]"
            } else if index == current_index {
                "[ >> ]"
            } else {
                "[lock]"
            };

            self.line(&format!(
                "{} {}. QUESTION {} - {}",
                marker,
                index + 1,
                question.id,
                question.points
            ));
        }
        self.flush();
    }

    fn render_question(&mut self, question: &QuestionRecord, revealed: bool) {
        self.line(&format!(
            "QUESTION {} ({} points)",
            question.id, question.points
        ));

        if !revealed {
            self.flush();
            return;
        }

        self.line(&question.question);
        for option in &question.options {
            let letter = question.option_letter(option).unwrap_or('?');
            self.line(&format!("  {}) {}", letter, option));
        }
        self.flush();
    }

    fn mark_answer(&mut self, selected: &str, correct: bool, correct_value: &str) {
        if correct {
            self.line(&format!("Correct! '{}' is right.", selected));
        } else {
            self.line(&format!(
                "Wrong, you picked '{}'. The right answer was '{}'.",
                selected, correct_value
            ));
        }
        self.flush();
    }

    fn render_result(&mut self, score: u64, name: &str) {
        self.line(&format!("Final score: {}", format_score(score)));
        self.line(&format!("Good job, {}!", name));
        self.flush();
    }

    fn render_submission(&mut self, status: &SubmissionStatus) {
        match status {
            SubmissionStatus::Idle => return,
            SubmissionStatus::InFlight => self.line("Saving your score..."),
            SubmissionStatus::Succeeded => self.line("Score saved to the ranking!"),
            SubmissionStatus::Failed(_) => {
                self.line("Your score could not be saved. Type 'save' to try again.")
            }
        }
        self.flush();
    }

    fn show_notice(&mut self, message: &str) {
        self.line(&format!("! {}", message));
        self.flush();
    }
}

/// Groups thousands with commas, `1234567` becomes `1,234,567`.
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

/// Maps one line of terminal input to an event for the current phase.
/// On the start screen every line is a name except `/again` and `/quit`.
/// `None` means the line means nothing right now.
pub fn parse_command(
    line: &str,
    phase: &Phase,
    question: Option<&QuestionRecord>,
) -> Option<QuizEvent> {
    let input = line.trim();
    let command = input.to_lowercase();

    if command == "/quit" {
        return Some(QuizEvent::Quit);
    }

    // The start screen takes any plain line as a name
    if let Phase::NotStarted = phase {
        return match command.as_str() {
            "/again" => Some(QuizEvent::PlayAgain),
            _ => Some(QuizEvent::NameSubmitted(line.to_string())),
        };
    }

    if command == "quit" || command == "exit" {
        return Some(QuizEvent::Quit);
    }

    match phase {
        Phase::NotStarted => None,
        Phase::Selecting => input
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .map(|n| QuizEvent::QuestionSelected(n - 1)),
        Phase::Answering { .. } => {
            if command == "go" {
                return Some(QuizEvent::Reveal);
            }

            let question = question?;
            let mut chars = input.chars();
            if let (Some(letter), None) = (chars.next(), chars.next()) {
                if let Some(option) = question.option_by_letter(letter) {
                    return Some(QuizEvent::AnswerSelected(option.to_string()));
                }
            }

            // Options are stored escaped, so typed text is compared the same way
            Some(QuizEvent::AnswerSelected(escape_html(input)))
        }
        Phase::Reviewing { .. } => match command.as_str() {
            "" | "next" => Some(QuizEvent::Next),
            _ => None,
        },
        Phase::Finished { .. } => match command.as_str() {
            "save" => Some(QuizEvent::SubmitScore),
            "again" => Some(QuizEvent::PlayAgain),
            _ => None,
        },
    }
}
