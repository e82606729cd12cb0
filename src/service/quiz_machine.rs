use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    models::{
        error::{QuestionLoadError, QuizError, SubmissionError},
        event::{Effect, QuizEvent},
        question::{QuestionRecord, QuestionSet},
        session::{AnswerVerdict, FinalResult, GameSession, LoadStatus, Phase, SubmissionStatus},
    },
    service::validation::{filter_questions, validate_name},
};

/// Owns one play-through. Every mutation goes through the operations below,
/// and a failed operation leaves the machine as it was.
#[derive(Debug, Clone)]
pub struct QuizMachine {
    phase: Phase,
    session: GameSession,
    questions: QuestionSet,
    load: LoadStatus,
    submission: SubmissionStatus,
}

impl QuizMachine {
    /// Creates a machine together with the question load it waits on.
    pub fn new() -> (Self, Effect) {
        let ticket = Uuid::new_v4();
        let machine = Self {
            phase: Phase::NotStarted,
            session: GameSession::new(),
            questions: QuestionSet::default(),
            load: LoadStatus::Pending(ticket),
            submission: SubmissionStatus::Idle,
        };

        (machine, Effect::LoadQuestions { ticket })
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load
    }

    pub fn submission_status(&self) -> &SubmissionStatus {
        &self.submission
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        match &self.phase {
            Phase::Answering { index, .. } | Phase::Reviewing { index, .. } => {
                self.questions.get(*index)
            }
            _ => None,
        }
    }

    pub fn handle(&mut self, event: QuizEvent) -> Result<Vec<Effect>, QuizError> {
        match event {
            QuizEvent::NameSubmitted(name) => self.start(&name).map(|_| vec![]),
            QuizEvent::QuestionSelected(index) => self.select_question(index).map(|_| vec![]),
            QuizEvent::Reveal => self.reveal().map(|_| vec![]),
            QuizEvent::AnswerSelected(value) => self.submit_answer(&value).map(|_| vec![]),
            QuizEvent::Next => self.advance().map(|_| vec![]),
            QuizEvent::SubmitScore => self.request_submission().map(|effect| vec![effect]),
            QuizEvent::PlayAgain => Ok(vec![self.reset()]),
            QuizEvent::Quit => Ok(vec![]),
            QuizEvent::QuestionsLoaded { ticket, result } => {
                self.questions_loaded(ticket, result).map(|_| vec![])
            }
            QuizEvent::SubmissionFinished { session_id, result } => {
                self.submission_finished(session_id, result);
                Ok(vec![])
            }
        }
    }

    pub fn start(&mut self, raw_name: &str) -> Result<(), QuizError> {
        self.expect_phase("start a game", matches!(self.phase, Phase::NotStarted))?;
        let name = validate_name(raw_name)?;

        match &self.load {
            LoadStatus::Loaded => {}
            LoadStatus::Pending(_) => return Err(QuizError::NotReady),
            LoadStatus::Failed(cause) => return Err(QuizError::LoadFailed(cause.clone())),
        }

        self.session.player_name = name;
        self.session.current_index = 0;
        self.session.score = 0.0;
        self.session.selected_answer = None;
        self.phase = Phase::Selecting;

        info!(
            "Session {} started for {}",
            self.session.id, self.session.player_name
        );
        Ok(())
    }

    /// Builds the question set from an untrusted list. Returns how many
    /// records survived.
    pub fn load_questions(&mut self, raw_list: &[Value]) -> Result<usize, QuizError> {
        self.expect_phase("load questions", matches!(self.phase, Phase::NotStarted))?;

        let records = filter_questions(raw_list);
        if records.is_empty() {
            let err = QuestionLoadError::NoValidQuestions;
            self.questions = QuestionSet::default();
            self.load = LoadStatus::Failed(err.to_string());
            return Err(err.into());
        }

        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id) {
                warn!("Duplicate question id {} in question source", record.id);
            }
        }

        let dropped = raw_list.len() - records.len();
        info!(
            "Loaded {} questions ({} dropped)",
            records.len(),
            dropped
        );

        let count = records.len();
        self.questions = QuestionSet::new(records);
        self.load = LoadStatus::Loaded;
        Ok(count)
    }

    /// Completion of a background load. Results for a superseded ticket are
    /// ignored.
    pub fn questions_loaded(
        &mut self,
        ticket: Uuid,
        result: Result<Vec<Value>, QuestionLoadError>,
    ) -> Result<(), QuizError> {
        if self.load != LoadStatus::Pending(ticket) {
            debug!("Ignoring stale question load {}", ticket);
            return Ok(());
        }

        match result {
            Ok(raw_list) => self.load_questions(&raw_list).map(|_| ()),
            Err(e) => {
                self.questions = QuestionSet::default();
                self.load = LoadStatus::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn select_question(&mut self, index: usize) -> Result<(), QuizError> {
        self.expect_phase("select a question", matches!(self.phase, Phase::Selecting))?;

        let current = self.session.current_index;
        if index != current || self.questions.get(index).is_none() {
            return Err(QuizError::QuestionLocked { index, current });
        }

        self.session.selected_answer = None;
        self.phase = Phase::Answering {
            index,
            revealed: false,
        };
        Ok(())
    }

    pub fn reveal(&mut self) -> Result<(), QuizError> {
        match &mut self.phase {
            Phase::Answering { revealed, .. } => {
                *revealed = true;
                Ok(())
            }
            phase => Err(QuizError::IllegalTransition {
                action: "reveal the question",
                phase: phase.name(),
            }),
        }
    }

    /// First answer wins: once an answer is recorded for the question,
    /// further submissions change nothing. The question must be revealed.
    pub fn submit_answer(&mut self, value: &str) -> Result<(), QuizError> {
        let index = match &self.phase {
            Phase::Reviewing { .. } => {
                debug!("Answer already recorded, ignoring {}", value);
                return Ok(());
            }
            Phase::Answering {
                revealed: false, ..
            } => {
                return Err(QuizError::IllegalTransition {
                    action: "answer a hidden question",
                    phase: self.phase.name(),
                });
            }
            Phase::Answering { index, .. } => *index,
            phase => {
                return Err(QuizError::IllegalTransition {
                    action: "answer",
                    phase: phase.name(),
                });
            }
        };

        if self.session.selected_answer.is_some() {
            return Ok(());
        }

        let Some(question) = self.questions.get(index) else {
            return Err(QuizError::QuestionLocked {
                index,
                current: self.session.current_index,
            });
        };

        if !question.has_option(value) {
            return Err(QuizError::UnknownOption(value.to_string()));
        }

        let correct = question.is_correct(value);
        if correct {
            self.session.score += question.points;
        }

        let verdict = AnswerVerdict {
            selected: value.to_string(),
            correct,
            correct_answer: question.answer.clone(),
        };

        debug!(
            "Question {} answered, correct: {}, score: {}",
            question.id, correct, self.session.score
        );

        self.session.selected_answer = Some(value.to_string());
        self.phase = Phase::Reviewing { index, verdict };
        Ok(())
    }

    pub fn advance(&mut self) -> Result<(), QuizError> {
        self.expect_phase("go to the next question", matches!(self.phase, Phase::Reviewing { .. }))?;

        self.session.current_index += 1;
        if self.session.current_index < self.questions.len() {
            self.phase = Phase::Selecting;
            return Ok(());
        }

        let result = FinalResult {
            player_name: self.session.player_name.clone(),
            score: self.session.final_score(),
        };

        info!(
            "Session {} finished with score {}",
            self.session.id, result.score
        );

        self.phase = Phase::Finished { result };
        Ok(())
    }

    /// Throws the current session away and asks for a fresh load, so edits
    /// to the question source show up in the next game.
    pub fn reset(&mut self) -> Effect {
        let ticket = Uuid::new_v4();

        self.phase = Phase::NotStarted;
        self.session = GameSession::new();
        self.questions = QuestionSet::default();
        self.load = LoadStatus::Pending(ticket);
        self.submission = SubmissionStatus::Idle;

        debug!("Reset to session {}", self.session.id);
        Effect::LoadQuestions { ticket }
    }

    pub fn request_submission(&mut self) -> Result<Effect, QuizError> {
        let Phase::Finished { result } = &self.phase else {
            return Err(QuizError::IllegalTransition {
                action: "save the score",
                phase: self.phase.name(),
            });
        };

        match self.submission {
            SubmissionStatus::InFlight => return Err(QuizError::SubmissionInFlight),
            SubmissionStatus::Succeeded => return Err(QuizError::AlreadySubmitted),
            SubmissionStatus::Idle | SubmissionStatus::Failed(_) => {}
        }

        let effect = Effect::SubmitScore {
            session_id: self.session.id,
            name: result.player_name.clone(),
            score: result.score,
        };

        self.submission = SubmissionStatus::InFlight;
        Ok(effect)
    }

    pub fn submission_finished(&mut self, session_id: Uuid, result: Result<(), SubmissionError>) {
        if session_id != self.session.id || self.submission != SubmissionStatus::InFlight {
            debug!("Ignoring submission result for session {}", session_id);
            return;
        }

        self.submission = match result {
            Ok(_) => {
                info!("Score saved for session {}", session_id);
                SubmissionStatus::Succeeded
            }
            Err(e) => {
                error!("Failed to submit score for session {}: {}", session_id, e);
                SubmissionStatus::Failed(e.to_string())
            }
        };
    }

    fn expect_phase(&self, action: &'static str, allowed: bool) -> Result<(), QuizError> {
        if allowed {
            return Ok(());
        }

        Err(QuizError::IllegalTransition {
            action,
            phase: self.phase.name(),
        })
    }
}
