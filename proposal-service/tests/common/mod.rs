#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use proposal_service::config::{MongoConfig, ProposalConfig, StoreBackend, StoreConfig};
use proposal_service::services::{InMemoryStore, ProposalStore};
use proposal_service::startup::{build_router, AppState, Application};
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn test_config(backend: StoreBackend, database: &str) -> ProposalConfig {
    ProposalConfig {
        common: CoreConfig { port: 0 },
        mongodb: MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: database.to_string(),
        },
        store: StoreConfig { backend },
    }
}

pub fn sample_proposal() -> Value {
    json!({
        "partner_name": "Emma Johnson",
        "proposer_name": "Michael Smith",
        "message": "Will you marry me? You've made these past 5 years the best of my life.",
        "our_story": [
            {"date": "June 15, 2019", "event": "First met at Central Park"},
            {"date": "July 4, 2019", "event": "First date at Riverside Cafe"},
            {"date": "December 24, 2019", "event": "First said 'I love you'"}
        ]
    })
}

pub fn router_over(store: Arc<dyn ProposalStore>) -> Router {
    build_router(AppState {
        config: test_config(StoreBackend::Memory, "unused"),
        store,
    })
}

/// Router wired to an in-memory store, driven with `oneshot`.
pub struct TestRouter {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

impl TestRouter {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }

    pub fn with_store(store: Arc<InMemoryStore>) -> Self {
        Self {
            router: router_over(store.clone()),
            store,
        }
    }

    /// Router over any store; `store` stays an empty in-memory one.
    pub fn over(backend: Arc<dyn ProposalStore>) -> Self {
        Self {
            router: router_over(backend),
            store: Arc::new(InMemoryStore::new()),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Create the sample proposal and return its id.
    pub async fn create_sample(&self) -> String {
        let (status, body) = self.post_json("/api/proposals", &sample_proposal()).await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", body);
        body["proposal_id"]
            .as_str()
            .expect("proposal_id missing")
            .to_string()
    }

    pub async fn respond(
        &self,
        proposal_id: &str,
        response: &str,
        message: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut body = json!({
            "proposal_id": proposal_id,
            "response": response,
        });
        if let Some(message) = message {
            body["message"] = json!(message);
        }
        self.post_json(&format!("/api/proposals/{}/respond", proposal_id), &body)
            .await
    }
}

/// A real server on a random port, for tests that go over TCP.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn ProposalStore>,
}

impl TestApp {
    pub async fn spawn(config: ProposalConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
        }
    }

    pub async fn spawn_in_memory() -> Self {
        Self::spawn(test_config(StoreBackend::Memory, "unused")).await
    }
}
