use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::service::validation::{validate_answer_in_options, validate_non_blank, validate_options};

pub const OPTION_COUNT: usize = 4;

/// Question record as authored in the JSON source, before any checks.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_answer_in_options"))]
pub struct RawQuestion {
    #[validate(range(min = 1, message = "Question id must be a positive integer"))]
    pub id: i64,
    #[validate(custom(function = "validate_non_blank"))]
    pub question: String,
    #[validate(custom(function = "validate_options"))]
    pub options: Vec<String>,
    #[validate(custom(function = "validate_non_blank"))]
    pub answer: String,
    #[validate(range(min = 0.0, message = "Points cannot be negative"))]
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRecord {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub points: f64,
}

impl QuestionRecord {
    pub fn is_correct(&self, value: &str) -> bool {
        self.answer == value
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }

    /// Letter shown next to an option, `A` for the first one.
    pub fn option_letter(&self, value: &str) -> Option<char> {
        self.options
            .iter()
            .position(|o| o == value)
            .filter(|idx| *idx < OPTION_COUNT)
            .map(|idx| (b'A' + idx as u8) as char)
    }

    pub fn option_by_letter(&self, letter: char) -> Option<&str> {
        let idx = (letter.to_ascii_uppercase() as u32).checked_sub('A' as u32)? as usize;
        if idx >= OPTION_COUNT {
            return None;
        }
        self.options.get(idx).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionSet {
    questions: Vec<QuestionRecord>,
}

impl QuestionSet {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.questions.iter()
    }
}
