//! Stand-in for the remote prediction service.
//!
//! Serves `POST /predict` on an ephemeral port, records every JSON body it
//! receives and answers with a scripted list of replies (cycled by request
//! number).

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use parking_lot::Mutex;

use airproyect::{ClientConfig, Language, PredictionClient};

#[derive(Clone, Debug)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn label(label: &str) -> Self {
        Self::raw(200, &serde_json::json!({ "prediccion": label }).to_string())
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self::raw(status, r#"{"error":"boom"}"#)
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

struct ServiceState {
    replies: Vec<Reply>,
    hits: AtomicUsize,
    bodies: Mutex<Vec<serde_json::Value>>,
}

pub struct MockService {
    pub base_url: String,
    state: web::Data<ServiceState>,
    handle: ServerHandle,
}

impl MockService {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<serde_json::Value> {
        self.state.bodies.lock().clone()
    }

    pub fn client(&self) -> PredictionClient {
        client_for(&self.base_url, Duration::from_secs(5), Language::Es)
    }

    pub fn client_with(&self, timeout: Duration, language: Language) -> PredictionClient {
        client_for(&self.base_url, timeout, language)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

pub fn client_for(base_url: &str, timeout: Duration, language: Language) -> PredictionClient {
    let config = ClientConfig::new(base_url)
        .unwrap()
        .with_timeout(timeout)
        .with_language(language);
    PredictionClient::new(&config).unwrap()
}

async fn predict(
    state: web::Data<ServiceState>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    let n = state.hits.fetch_add(1, Ordering::SeqCst);
    state.bodies.lock().push(body.into_inner());

    let reply = state.replies[n % state.replies.len()].clone();
    if let Some(delay) = reply.delay {
        actix_web::rt::time::sleep(delay).await;
    }
    HttpResponse::build(StatusCode::from_u16(reply.status).unwrap())
        .content_type("application/json")
        .body(reply.body)
}

/// Must be called from inside an actix runtime (`#[actix_web::test]`).
pub fn spawn(replies: Vec<Reply>) -> MockService {
    assert!(!replies.is_empty());
    let state = web::Data::new(ServiceState {
        replies,
        hits: AtomicUsize::new(0),
        bodies: Mutex::new(Vec::new()),
    });

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/predict", web::post().to(predict))
    })
    .workers(1)
    .listen(listener)
    .unwrap()
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    MockService {
        base_url: format!("http://127.0.0.1:{port}"),
        state,
        handle,
    }
}

/// A base URL nothing listens on.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
