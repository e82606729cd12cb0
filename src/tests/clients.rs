#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use axum::{
        Form, Json, Router,
        extract::State,
        http::StatusCode,
        routing::{get, post},
    };
    use reqwest::Client;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::{
        api::{question_source::QuestionSource, score_client::ScoreClient},
        models::error::{QuestionLoadError, SubmissionError},
        tests::support::two_questions,
    };

    type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", address)
    }

    async fn record_form(
        State(received): State<Received>,
        Form(form): Form<HashMap<String, String>>,
    ) -> StatusCode {
        received.lock().unwrap().push(form);
        StatusCode::OK
    }

    fn temp_file(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("questions-{}.json", Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn source_kind_follows_location() {
        assert_eq!(
            QuestionSource::new("https://quiz.test/questions.json"),
            QuestionSource::Http("https://quiz.test/questions.json".into())
        );
        assert_eq!(
            QuestionSource::new("questions.json"),
            QuestionSource::File("questions.json".into())
        );
    }

    #[tokio::test]
    async fn fetches_array_over_http() {
        let router = Router::new().route(
            "/questions.json",
            get(|| async { Json(Value::Array(two_questions())) }),
        );
        let base = spawn_server(router).await;

        let source = QuestionSource::new(format!("{}/questions.json", base));
        let records = source.fetch(&Client::new()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], 1);
    }

    #[tokio::test]
    async fn object_payload_is_not_an_array() {
        let router = Router::new().route(
            "/questions.json",
            get(|| async { Json(json!({"questions": []})) }),
        );
        let base = spawn_server(router).await;

        let source = QuestionSource::new(format!("{}/questions.json", base));
        let err = source.fetch(&Client::new()).await.unwrap_err();
        assert!(matches!(err, QuestionLoadError::NotAnArray));
    }

    #[tokio::test]
    async fn http_error_status_fails_the_load() {
        let router = Router::new().route(
            "/questions.json",
            get(|| async { (StatusCode::NOT_FOUND, "gone") }),
        );
        let base = spawn_server(router).await;

        let source = QuestionSource::new(format!("{}/questions.json", base));
        let err = source.fetch(&Client::new()).await.unwrap_err();
        match err {
            QuestionLoadError::Api(status, body) => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(body, "gone");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn reads_questions_from_file() {
        let path = temp_file(&Value::Array(two_questions()).to_string());
        let source = QuestionSource::File(path.clone());

        let records = source.fetch(&Client::new()).await.unwrap();
        assert_eq!(records.len(), 2);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn file_errors_are_reported() {
        let missing = QuestionSource::File(std::env::temp_dir().join("does-not-exist.json"));
        assert!(matches!(
            missing.fetch(&Client::new()).await,
            Err(QuestionLoadError::Io(_))
        ));

        let path = temp_file("[{ not json");
        let broken = QuestionSource::File(path.clone());
        assert!(matches!(
            broken.fetch(&Client::new()).await,
            Err(QuestionLoadError::Json(_))
        ));
        std::fs::remove_file(path).unwrap();

        let path = temp_file("\"just a string\"");
        let scalar = QuestionSource::File(path.clone());
        assert!(matches!(
            scalar.fetch(&Client::new()).await,
            Err(QuestionLoadError::NotAnArray)
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn posts_score_as_form() {
        let received: Received = Arc::default();
        let router = Router::new()
            .route("/", post(record_form))
            .with_state(received.clone());
        let base = spawn_server(router).await;

        let client = ScoreClient::new(format!("{}/", base), Some("ranking".into()));
        client
            .submit_score(&Client::new(), "Ana", 1500)
            .await
            .unwrap();

        let forms = received.lock().unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0]["nombre"], "Ana");
        assert_eq!(forms[0]["puntaje"], "1500");
        assert_eq!(forms[0]["form-name"], "ranking");
    }

    #[tokio::test]
    async fn form_name_is_optional() {
        let received: Received = Arc::default();
        let router = Router::new()
            .route("/", post(record_form))
            .with_state(received.clone());
        let base = spawn_server(router).await;

        let client = ScoreClient::new(format!("{}/", base), None);
        client
            .submit_score(&Client::new(), "Jos&eacute;", 0)
            .await
            .unwrap();

        let forms = received.lock().unwrap();
        assert_eq!(forms[0].len(), 2);
        assert_eq!(forms[0]["nombre"], "Jos&eacute;");
        assert_eq!(forms[0]["puntaje"], "0");
    }

    #[tokio::test]
    async fn endpoint_failure_is_a_submission_error() {
        let router = Router::new().route(
            "/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_server(router).await;

        let client = ScoreClient::new(format!("{}/", base), None);
        let err = client
            .submit_score(&Client::new(), "Ana", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Api(status, _) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_submission_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client = ScoreClient::new(format!("http://{}/", address), None);
        let err = client
            .submit_score(&Client::new(), "Ana", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Http(_)));
    }
}
