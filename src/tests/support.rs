#![cfg(test)]

use serde_json::{Value, json};

use crate::{
    api::presenter::Presenter,
    models::{
        question::{QuestionRecord, QuestionSet},
        session::{ScreenId, SubmissionStatus},
    },
};

pub fn question(id: i64, options: [&str; 4], answer: &str, points: f64) -> Value {
    json!({
        "id": id,
        "question": format!("Question number {}?", id),
        "options": options,
        "answer": answer,
        "points": points,
    })
}

/// Scenario from the product brief: two questions worth 100 and 200.
pub fn two_questions() -> Vec<Value> {
    vec![
        question(1, ["a", "b", "c", "d"], "b", 100.0),
        question(2, ["e", "f", "g", "h"], "g", 200.0),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Screen(ScreenId),
    Selection { count: usize, current_index: usize },
    Question { id: i64, revealed: bool },
    Mark {
        selected: String,
        correct: bool,
        correct_value: String,
    },
    Result { score: u64, name: String },
    Submission(SubmissionStatus),
    Notice(String),
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<Call>,
}

impl RecordingPresenter {
    pub fn notices(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Notice(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_screen(&self) -> Option<ScreenId> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Screen(screen) => Some(*screen),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn show_screen(&mut self, screen: ScreenId) {
        self.calls.push(Call::Screen(screen));
    }

    fn render_selection_screen(&mut self, questions: &QuestionSet, current_index: usize) {
        self.calls.push(Call::Selection {
            count: questions.len(),
            current_index,
        });
    }

    fn render_question(&mut self, question: &QuestionRecord, revealed: bool) {
        self.calls.push(Call::Question {
            id: question.id,
            revealed,
        });
    }

    fn mark_answer(&mut self, selected: &str, correct: bool, correct_value: &str) {
        self.calls.push(Call::Mark {
            selected: selected.into(),
            correct,
            correct_value: correct_value.into(),
        });
    }

    fn render_result(&mut self, score: u64, name: &str) {
        self.calls.push(Call::Result {
            score,
            name: name.into(),
        });
    }

    fn render_submission(&mut self, status: &SubmissionStatus) {
        self.calls.push(Call::Submission(status.clone()));
    }

    fn show_notice(&mut self, message: &str) {
        self.calls.push(Call::Notice(message.into()));
    }
}
