use crate::models::{
    question::{QuestionRecord, QuestionSet},
    session::{ScreenId, SubmissionStatus},
};

/// Rendering side of the quiz. The machine never reads anything back from
/// it; user actions come back as events.
pub trait Presenter {
    fn show_screen(&mut self, screen: ScreenId);

    fn render_selection_screen(&mut self, questions: &QuestionSet, current_index: usize);

    /// `revealed == false` shows only the question number and its points.
    fn render_question(&mut self, question: &QuestionRecord, revealed: bool);

    fn mark_answer(&mut self, selected: &str, correct: bool, correct_value: &str);

    fn render_result(&mut self, score: u64, name: &str);

    fn render_submission(&mut self, status: &SubmissionStatus);

    fn show_notice(&mut self, message: &str);
}
