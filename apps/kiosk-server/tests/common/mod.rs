//! Shared fixtures for the kiosk-server integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use kiosk_db::{Database, DbConfig};
use kiosk_server::{build_router, AppState, MailError, MailSendClient};

pub const FROM_EMAIL: &str = "no-reply@cafe.test";

/// How the recording client answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailOutcome {
    Accept,
    Decline,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub content: String,
}

/// Mail client that remembers every call and answers with a fixed outcome.
pub struct RecordingMailClient {
    outcome: MailOutcome,
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailClient {
    pub fn new(outcome: MailOutcome) -> Arc<Self> {
        Arc::new(RecordingMailClient {
            outcome,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSendClient for RecordingMailClient {
    async fn send(
        &self,
        from_email: &str,
        to_email: &str,
        subject: &str,
        content: &str,
    ) -> Result<bool, MailError> {
        self.sent.lock().unwrap().push(SentMail {
            from: from_email.to_string(),
            to: to_email.to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
        });

        match self.outcome {
            MailOutcome::Accept => Ok(true),
            MailOutcome::Decline => Ok(false),
            MailOutcome::Fail => Err(MailError::Transport("connection refused".to_string())),
        }
    }
}

/// App over a fresh in-memory database.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: Database,
    pub mail: Arc<RecordingMailClient>,
}

impl TestApp {
    pub async fn new(outcome: MailOutcome) -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mail = RecordingMailClient::new(outcome);
        let client: Arc<dyn MailSendClient> = mail.clone();
        let state = AppState::new(db.clone(), client, FROM_EMAIL);

        TestApp {
            router: build_router(state.clone()),
            state,
            db,
            mail,
        }
    }

    /// Sends a request and returns the status and raw body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    /// Sends a JSON body and parses the JSON reply.
    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, bytes) = self.request(Method::POST, uri, Some(body.to_string())).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, bytes) = self.request(Method::GET, uri, None).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
