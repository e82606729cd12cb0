use serde_json::Value;
use tracing::{debug, warn};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::question::{OPTION_COUNT, QuestionRecord, RawQuestion};

pub const MAX_NAME_LENGTH: usize = 50;

/// Format validation errors into a single log friendly message
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let msg = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} validation failed", field));
            messages.push(msg);
        }
    }

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join(", ")
    }
}

/// Escape text so a renderer that trusts it as markup shows it literally.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '-' | '_' | '.')
        // Latin-1 supplement and Latin Extended-A/B letters
        || (('\u{00C0}'..='\u{024F}').contains(&c) && c.is_alphabetic())
}

/// Validate player name: 1-50 chars after trimming, letters (accented Latin
/// included), digits, whitespace, hyphens, underscores and periods.
/// Returns the trimmed, escaped name.
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(ValidationError::new("empty")
            .with_message("Please enter your name to start.".into()));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new("too long")
            .with_message("Name must be at most 50 characters.".into()));
    }

    if !name.chars().all(is_name_char) {
        return Err(ValidationError::new("invalid characters").with_message(
            "Name can only contain letters, numbers, spaces, hyphens, underscores and periods."
                .into(),
        ));
    }

    Ok(escape_html(name))
}

pub fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Text cannot be empty".into()));
    }

    Ok(())
}

pub fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    if options.len() != OPTION_COUNT {
        return Err(ValidationError::new("option_count")
            .with_message("Question must have exactly 4 options".into()));
    }

    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(ValidationError::new("blank_option")
            .with_message("Options cannot be empty".into()));
    }

    Ok(())
}

pub fn validate_answer_in_options(question: &RawQuestion) -> Result<(), ValidationError> {
    if !question.options.contains(&question.answer) {
        return Err(ValidationError::new("answer_not_in_options")
            .with_message("Answer must be one of the options".into()));
    }

    Ok(())
}

/// Shape and content check of one untrusted record. The error is a
/// description of why the record was rejected.
pub fn parse_question(raw: &Value) -> Result<RawQuestion, String> {
    let question: RawQuestion =
        serde_json::from_value(raw.clone()).map_err(|e| format!("malformed record: {}", e))?;

    match question.validate() {
        Ok(_) => Ok(question),
        Err(e) => Err(format_validation_errors(&e)),
    }
}

pub fn validate_question(raw: &Value) -> bool {
    match parse_question(raw) {
        Ok(_) => true,
        Err(reason) => {
            debug!("Question failed validation: {}", reason);
            false
        }
    }
}

pub fn sanitize_question(record: RawQuestion) -> QuestionRecord {
    QuestionRecord {
        id: record.id,
        question: escape_html(&record.question),
        options: record.options.iter().map(|o| escape_html(o)).collect(),
        answer: escape_html(&record.answer),
        points: record.points,
    }
}

/// Validate and sanitize a raw list, dropping every record that fails.
pub fn filter_questions(raw_list: &[Value]) -> Vec<QuestionRecord> {
    raw_list
        .iter()
        .enumerate()
        .filter_map(|(position, raw)| match parse_question(raw) {
            Ok(question) => Some(sanitize_question(question)),
            Err(reason) => {
                warn!("Dropping question at position {}: {}", position, reason);
                None
            }
        })
        .collect()
}
