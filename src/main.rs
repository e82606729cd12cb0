use dotenvy::dotenv;
use reqwest::Client;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api::{question_source::QuestionSource, score_client::ScoreClient, terminal::TerminalPresenter},
    config::app_config::AppConfig,
    models::error::AppError,
    service::runtime::{QuizRuntime, spawn_line_reader},
};

mod api;
mod config;
mod models;
mod service;
mod tests;

#[tokio::main]
async fn main() {
    // Initialize .env
    dotenv().ok();

    // Initialize logging, kept off stdout so it does not mix with the game
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        error!("Quiz failed to start: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let source = QuestionSource::new(config.quiz.question_source.clone());
    let score_client = ScoreClient::new(
        config.quiz.submit_endpoint.clone(),
        config.quiz.form_name.clone(),
    );

    info!(
        "Using question source {:?}, submitting to {}",
        source, config.quiz.submit_endpoint
    );

    let presenter = TerminalPresenter::new(std::io::stdout());
    let runtime = QuizRuntime::new(presenter, Client::new(), source, score_client);

    spawn_line_reader(tokio::io::stdin(), runtime.sender());
    runtime.run().await;

    Ok(())
}
