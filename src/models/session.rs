use core::fmt;

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScreenId {
    Start,
    QuestionSelection,
    Question,
    Result,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenId::Start => write!(f, "startScreen"),
            ScreenId::QuestionSelection => write!(f, "questionSelectionScreen"),
            ScreenId::Question => write!(f, "questionScreen"),
            ScreenId::Result => write!(f, "resultScreen"),
        }
    }
}

/// Outcome of grading a single answer, kept so a presenter can mark the
/// chosen option and the correct one without re-deriving anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerVerdict {
    pub selected: String,
    pub correct: bool,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalResult {
    pub player_name: String,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    NotStarted,
    Selecting,
    Answering { index: usize, revealed: bool },
    Reviewing { index: usize, verdict: AnswerVerdict },
    Finished { result: FinalResult },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::NotStarted => "not started",
            Phase::Selecting => "selecting",
            Phase::Answering { .. } => "answering",
            Phase::Reviewing { .. } => "reviewing",
            Phase::Finished { .. } => "finished",
        }
    }

    pub fn screen(&self) -> ScreenId {
        match self {
            Phase::NotStarted => ScreenId::Start,
            Phase::Selecting => ScreenId::QuestionSelection,
            Phase::Answering { .. } | Phase::Reviewing { .. } => ScreenId::Question,
            Phase::Finished { .. } => ScreenId::Result,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Pending(Uuid),
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionStatus {
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: Uuid,
    pub current_index: usize,
    pub score: f64,
    pub player_name: String,
    pub selected_answer: Option<String>,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            current_index: 0,
            score: 0.0,
            player_name: String::new(),
            selected_answer: None,
        }
    }

    /// Score as it leaves the machine: never negative, never fractional.
    pub fn final_score(&self) -> u64 {
        clamp_score(self.score)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

pub fn clamp_score(score: f64) -> u64 {
    if !score.is_finite() || score <= 0.0 {
        return 0;
    }
    score.floor() as u64
}
