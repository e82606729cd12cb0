use serde_json::Value;
use uuid::Uuid;

use crate::models::error::{QuestionLoadError, SubmissionError};

/// Everything that can drive the quiz forward, user input and background
/// completions alike.
#[derive(Debug)]
pub enum QuizEvent {
    NameSubmitted(String),
    QuestionSelected(usize),
    Reveal,
    AnswerSelected(String),
    Next,
    SubmitScore,
    PlayAgain,
    Quit,
    QuestionsLoaded {
        ticket: Uuid,
        result: Result<Vec<Value>, QuestionLoadError>,
    },
    SubmissionFinished {
        session_id: Uuid,
        result: Result<(), SubmissionError>,
    },
}

/// Background work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadQuestions {
        ticket: Uuid,
    },
    SubmitScore {
        session_id: Uuid,
        name: String,
        score: u64,
    },
}
