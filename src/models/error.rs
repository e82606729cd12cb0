use reqwest::StatusCode;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationError;

#[derive(Debug, Error)]
pub enum QuestionLoadError {
    #[error("Http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Api error: {0} - {1}")]
    Api(StatusCode, String),

    #[error("Failed to read question file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Question payload is not a JSON array")]
    NotAnArray,

    #[error("No valid questions in payload")]
    NoValidQuestions,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Api error: {0} - {1}")]
    Api(StatusCode, String),
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Invalid player name: {0}")]
    InputValidation(ValidationError),

    #[error("Question load failed: {0}")]
    QuestionLoad(#[from] QuestionLoadError),

    #[error("Question load failed earlier: {0}")]
    LoadFailed(String),

    #[error("Questions are still loading")]
    NotReady,

    #[error("Question {index} is locked, current question is {current}")]
    QuestionLocked { index: usize, current: usize },

    #[error("Answer is not one of the options: {0}")]
    UnknownOption(String),

    #[error("Cannot {action} while {phase}")]
    IllegalTransition {
        action: &'static str,
        phase: &'static str,
    },

    #[error("A score submission is already in flight")]
    SubmissionInFlight,

    #[error("Score has already been submitted")]
    AlreadySubmitted,
}

impl From<ValidationError> for QuizError {
    fn from(value: ValidationError) -> Self {
        QuizError::InputValidation(value)
    }
}

impl QuizError {
    /// Logs the error and returns the message shown to the player.
    pub fn notice(&self) -> String {
        match self {
            QuizError::InputValidation(e) => {
                warn!("Rejected player name: {}", e.code);
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Please enter a valid name to start.".into())
            }
            QuizError::QuestionLoad(e) => {
                error!("Failed to load questions: {}", e);
                String::from("The game questions could not be loaded.")
            }
            QuizError::LoadFailed(cause) => {
                error!("Start blocked by failed question load: {}", cause);
                String::from("The game questions could not be loaded.")
            }
            QuizError::NotReady => {
                warn!("Start requested before questions finished loading");
                String::from("Questions are still loading, try again in a moment.")
            }
            QuizError::QuestionLocked { index, current } => {
                warn!("Locked question {} selected, current is {}", index, current);
                format!("Question {} is not available.", index + 1)
            }
            QuizError::UnknownOption(value) => {
                warn!("Unknown option submitted: {}", value);
                String::from("Pick one of the listed options.")
            }
            QuizError::IllegalTransition { action, phase } => {
                warn!("Illegal transition: {} while {}", action, phase);
                format!("You cannot {} right now.", action)
            }
            QuizError::SubmissionInFlight => {
                warn!("Duplicate score submission blocked");
                String::from("Saving your score...")
            }
            QuizError::AlreadySubmitted => {
                warn!("Score resubmission blocked");
                String::from("Your score is already saved.")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}
