pub mod presenter;
pub mod question_source;
pub mod score_client;
pub mod terminal;
