use tracing::debug;

use crate::{
    api::presenter::Presenter,
    models::session::Phase,
    service::quiz_machine::QuizMachine,
};

/// Draws whatever the machine currently holds. Calling it twice in a row
/// draws the same thing twice.
pub fn project<P: Presenter>(machine: &QuizMachine, presenter: &mut P) {
    let phase = machine.phase();
    debug!("Projecting {} while {}", phase.screen(), phase.name());
    presenter.show_screen(phase.screen());

    match phase {
        Phase::NotStarted => {}
        Phase::Selecting => {
            presenter.render_selection_screen(machine.questions(), machine.session().current_index)
        }
        Phase::Answering { index, revealed } => {
            if let Some(question) = machine.questions().get(*index) {
                presenter.render_question(question, *revealed);
            }
        }
        Phase::Reviewing { index, verdict } => {
            if let Some(question) = machine.questions().get(*index) {
                presenter.render_question(question, true);
            }
            presenter.mark_answer(&verdict.selected, verdict.correct, &verdict.correct_answer);
        }
        Phase::Finished { result } => {
            presenter.render_result(result.score, &result.player_name);
            presenter.render_submission(machine.submission_status());
        }
    }
}
