use reqwest::Client;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
};
use tracing::{debug, error, info};

use crate::{
    api::{
        presenter::Presenter, question_source::QuestionSource, score_client::ScoreClient,
        terminal::parse_command,
    },
    models::event::{Effect, QuizEvent},
    service::{quiz_machine::QuizMachine, render::project},
};

#[derive(Debug)]
pub enum Message {
    Input(String),
    Event(QuizEvent),
}

/// Single consumer event loop. Messages are handled one at a time; slow work
/// runs in spawned tasks that report back through the same channel.
pub struct QuizRuntime<P: Presenter> {
    machine: QuizMachine,
    presenter: P,
    client: Client,
    source: QuestionSource,
    score_client: ScoreClient,
    pending: Vec<Effect>,
    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,
}

impl<P: Presenter> QuizRuntime<P> {
    pub fn new(
        presenter: P,
        client: Client,
        source: QuestionSource,
        score_client: ScoreClient,
    ) -> Self {
        let (machine, initial_load) = QuizMachine::new();
        let (tx, rx) = unbounded_channel();

        Self {
            machine,
            presenter,
            client,
            source,
            score_client,
            pending: vec![initial_load],
            tx,
            rx,
        }
    }

    pub fn sender(&self) -> UnboundedSender<Message> {
        self.tx.clone()
    }

    pub fn machine(&self) -> &QuizMachine {
        &self.machine
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub async fn run(mut self) -> P {
        self.start();
        while self.step().await {}
        info!("Quiz closed");
        self.presenter
    }

    /// Kicks off the initial question load and draws the start screen.
    pub fn start(&mut self) {
        for effect in std::mem::take(&mut self.pending) {
            self.execute(effect);
        }
        project(&self.machine, &mut self.presenter);
    }

    /// Waits for one message and handles it. Returns false once the session
    /// should end.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(message) => self.dispatch(message),
            None => false,
        }
    }

    fn dispatch(&mut self, message: Message) -> bool {
        let event = match message {
            Message::Event(event) => event,
            Message::Input(line) => {
                match parse_command(&line, self.machine.phase(), self.machine.current_question()) {
                    Some(event) => event,
                    None => {
                        self.presenter.show_notice("That does not do anything here.");
                        return true;
                    }
                }
            }
        };

        if let QuizEvent::Quit = event {
            return false;
        }

        debug!("Handling event: {:?}", event);
        match self.machine.handle(event) {
            Ok(effects) => {
                for effect in effects {
                    self.execute(effect);
                }
                project(&self.machine, &mut self.presenter);
            }
            Err(e) => self.presenter.show_notice(&e.notice()),
        }

        true
    }

    fn execute(&self, effect: Effect) {
        let tx = self.tx.clone();
        let client = self.client.clone();

        match effect {
            Effect::LoadQuestions { ticket } => {
                let source = self.source.clone();
                tokio::spawn(async move {
                    let result = source.fetch(&client).await;
                    let _ = tx.send(Message::Event(QuizEvent::QuestionsLoaded { ticket, result }));
                });
            }
            Effect::SubmitScore {
                session_id,
                name,
                score,
            } => {
                let score_client = self.score_client.clone();
                tokio::spawn(async move {
                    let result = score_client.submit_score(&client, &name, score).await;
                    let _ = tx.send(Message::Event(QuizEvent::SubmissionFinished {
                        session_id,
                        result,
                    }));
                });
            }
        }
    }
}

/// Forwards every line of `reader` as input. End of input quits the quiz.
pub fn spawn_line_reader<R>(reader: R, tx: UnboundedSender<Message>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(Message::Input(line)).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    let _ = tx.send(Message::Event(QuizEvent::Quit));
                    break;
                }
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    let _ = tx.send(Message::Event(QuizEvent::Quit));
                    break;
                }
            }
        }
    })
}
