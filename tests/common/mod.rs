#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use dealership_inventory::clients::{MemoryBlobStore, MemoryRecordStore, RecordStore};
use dealership_inventory::config::EnvironmentConfig;
use dealership_inventory::routes::create_app;
use dealership_inventory::services::{LeadMailer, LeadNotification, MailError};
use dealership_inventory::state::AppState;

/// Inventory node keyed by stock number; `Z9` is malformed
pub fn inventory() -> Value {
    json!({
        "A1": {
            "StockNum": "A1", "Sold": false, "ModelYear": 2020, "Make": "Toyota",
            "Model": "Camry", "Price": "23075", "Odometer": 45210, "Condition": "Used",
            "VIN": "T7H29FE0DGK025802", "ExtColor": ["Black", "#454545"]
        },
        "B2": {
            "StockNum": "B2", "Sold": false, "ModelYear": 2018, "Make": "Honda",
            "Model": "Civic", "Price": "9999", "Odometer": 80000
        },
        "C3": {
            "StockNum": "C3", "Sold": true, "ModelYear": 2020, "Make": "Toyota",
            "Model": "RAV4", "Price": "1000"
        },
        "D4": {
            "StockNum": "D4", "Sold": false, "ModelYear": 2019, "Make": "Ford",
            "Model": "F-150", "Price": "500", "Drivetrain": "4WD"
        },
        "E5": { "Make": "Subaru" },
        "Z9": "not a vehicle"
    })
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<LeadNotification>>,
}

#[async_trait]
impl LeadMailer for RecordingMailer {
    async fn send_lead(&self, notification: &LeadNotification) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

pub struct FailingMailer;

#[async_trait]
impl LeadMailer for FailingMailer {
    async fn send_lead(&self, _notification: &LeadNotification) -> Result<(), MailError> {
        let err = "not-an-address".parse::<lettre::Address>().unwrap_err();
        Err(MailError::Address(err))
    }
}

pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
}

pub struct TestAppBuilder {
    records: MemoryRecordStore,
    blobs: MemoryBlobStore,
    mailer: Option<Arc<dyn LeadMailer>>,
    config: EnvironmentConfig,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        let mut config = EnvironmentConfig::default();
        config.rate_limit_requests = 1_000;
        Self {
            records: MemoryRecordStore::with_node("inventory", inventory()),
            blobs: MemoryBlobStore::new(),
            mailer: None,
            config,
        }
    }

    pub fn records(mut self, records: MemoryRecordStore) -> Self {
        self.records = records;
        self
    }

    pub fn blobs(mut self, blobs: MemoryBlobStore) -> Self {
        self.blobs = blobs;
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn LeadMailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn rate_limit(mut self, requests: u32) -> Self {
        self.config.rate_limit_requests = requests;
        self
    }

    pub fn build(self) -> TestApp {
        let recording = Arc::new(RecordingMailer::default());
        let mailer = self
            .mailer
            .unwrap_or_else(|| recording.clone() as Arc<dyn LeadMailer>);
        let state = AppState::new(
            self.config,
            Arc::new(self.records),
            Arc::new(self.blobs),
            mailer,
            None,
        );

        TestApp {
            router: create_app(state),
            mailer: recording,
        }
    }
}

pub async fn store_with_metadata(metadata: Value) -> MemoryRecordStore {
    let store = MemoryRecordStore::with_node("inventory", inventory());
    store.set("inventory_metadata", &metadata).await.unwrap();
    store
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, bytes.to_vec())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, _, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, _, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, _, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

/// Stock numbers of a `data` array, in order
pub fn stock_nums(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["StockNum"].as_str().unwrap().to_string())
        .collect()
}
