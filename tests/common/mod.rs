//! Shared helpers: small test stories, in-memory publishers and a fake form service.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use story_form::error::AuthoringError;
use story_form::models::{Section, SingleChoice};
use story_form::publish::{ClientError, FormId, FormPublisher, Request};
use story_form::story::{MixedRadix, PageIds, Scene, SingleScene, WorldState};

// ============================================================
// World states
// ============================================================

/// One boolean flag: two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag(pub bool);

impl WorldState for Flag {
    fn count() -> usize {
        2
    }

    fn encode(&self) -> usize {
        usize::from(self.0)
    }

    fn all() -> impl Iterator<Item = Self> {
        [false, true].into_iter().map(Flag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lamp {
    Off,
    Dim,
    Bright,
}

const LAMPS: [Lamp; 3] = [Lamp::Off, Lamp::Dim, Lamp::Bright];

/// Two independent fields: a key (2 values) and a lamp (3 values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explorer {
    pub has_key: bool,
    pub lamp: Lamp,
}

const EXPLORER: MixedRadix<2> = MixedRadix::new([2, 3]);

impl WorldState for Explorer {
    fn count() -> usize {
        EXPLORER.count()
    }

    fn encode(&self) -> usize {
        let lamp = LAMPS.iter().position(|l| *l == self.lamp).unwrap_or(0);
        EXPLORER.encode([usize::from(self.has_key), lamp])
    }

    fn all() -> impl Iterator<Item = Self> {
        EXPLORER.codes().map(|code| {
            let [key, lamp] = EXPLORER.decode(code);
            Explorer {
                has_key: key == 1,
                lamp: LAMPS[lamp],
            }
        })
    }
}

/// Claims three states but encodes two of them to the same code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colliding(pub u8);

impl WorldState for Colliding {
    fn count() -> usize {
        3
    }

    fn encode(&self) -> usize {
        usize::from(self.0.min(1))
    }

    fn all() -> impl Iterator<Item = Self> {
        (0..3).map(Colliding)
    }
}

/// Claims four states but only enumerates two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Short(pub bool);

impl WorldState for Short {
    fn count() -> usize {
        4
    }

    fn encode(&self) -> usize {
        usize::from(self.0)
    }

    fn all() -> impl Iterator<Item = Self> {
        [false, true].into_iter().map(Short)
    }
}

/// Two floors, 0 and 1. Nothing stops a scene from building `Floor(2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Floor(pub u8);

impl WorldState for Floor {
    fn count() -> usize {
        2
    }

    fn encode(&self) -> usize {
        usize::from(self.0)
    }

    fn all() -> impl Iterator<Item = Self> {
        (0..2).map(Floor)
    }
}

// ============================================================
// Scenes over `Flag`: A and B vary with the flag, Z is single.
// ============================================================

pub struct SceneA;
pub struct SceneB;
pub struct SceneC;
pub struct SceneZ;

impl Scene<Flag> for SceneA {
    fn generate_section(&self, ws: &Flag, ids: &PageIds<Flag>) -> Result<Section, AuthoringError> {
        Section::new(ids.scene::<Self>(ws)?, "A", format!("flag is {}", ws.0)).with_item(
            SingleChoice::new("Next?", "")
                .navigate("To B", ids.scene::<SceneB>(ws)?)
                .navigate("Toggle", ids.scene::<SceneA>(&Flag(!ws.0))?),
        )
    }
}

impl Scene<Flag> for SceneB {
    fn generate_section(&self, ws: &Flag, ids: &PageIds<Flag>) -> Result<Section, AuthoringError> {
        Section::new(ids.scene::<Self>(ws)?, "B", "").with_item(
            SingleChoice::new("Next?", "")
                .navigate("Back", ids.scene::<SceneA>(ws)?)
                .navigate("Finish", ids.single::<SceneZ>()?),
        )
    }
}

impl Scene<Flag> for SceneC {
    fn generate_section(&self, ws: &Flag, ids: &PageIds<Flag>) -> Result<Section, AuthoringError> {
        Section::new(ids.scene::<Self>(ws)?, "C", "")
            .with_item(SingleChoice::new("Done?", "").submit("Yes"))
    }
}

impl SingleScene<Flag> for SceneZ {
    fn generate_section(&self, ids: &PageIds<Flag>) -> Result<Section, AuthoringError> {
        Section::new(ids.single::<Self>()?, "Z", "The end").with_item(
            SingleChoice::new("Again?", "")
                .navigate("Restart", ids.scene::<SceneA>(&Flag(false))?)
                .submit("Submit"),
        )
    }
}

/// Links to a page id outside the story.
pub struct Dangling;

impl SingleScene<Flag> for Dangling {
    fn generate_section(&self, ids: &PageIds<Flag>) -> Result<Section, AuthoringError> {
        let outside = story_form::models::PageId(ids.len() + 10);
        Section::new(ids.single::<Self>()?, "Dangling", "")
            .with_item(SingleChoice::new("Go", "").navigate("Nowhere", outside))
    }
}

/// Claims another scene's page id.
pub struct Impostor;

impl Scene<Flag> for Impostor {
    fn generate_section(&self, ws: &Flag, ids: &PageIds<Flag>) -> Result<Section, AuthoringError> {
        Section::new(ids.scene::<SceneC>(ws)?, "Impostor", "")
            .with_item(SingleChoice::new("Go", "").submit("Done"))
    }
}

// ============================================================
// Scenes over `Floor`: the stairs climb one floor too many.
// ============================================================

pub struct Stairs;
pub struct Landing;

impl Scene<Floor> for Stairs {
    fn generate_section(&self, ws: &Floor, ids: &PageIds<Floor>) -> Result<Section, AuthoringError> {
        Section::new(ids.scene::<Self>(ws)?, "Stairs", "").with_item(
            SingleChoice::new("Climb?", "")
                .navigate("Up", ids.scene::<Self>(&Floor(ws.0 + 1))?)
                .navigate("Rest", ids.scene::<Landing>(ws)?),
        )
    }
}

impl Scene<Floor> for Landing {
    fn generate_section(&self, ws: &Floor, ids: &PageIds<Floor>) -> Result<Section, AuthoringError> {
        Section::new(ids.scene::<Self>(ws)?, "Landing", "")
            .with_item(SingleChoice::new("Done?", "").submit("Yes"))
    }
}

// ============================================================
// Publishers
// ============================================================

/// One call made against a publisher.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(String),
    Batch(FormId, Vec<Value>),
}

/// Records every call and accepts all of them.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    calls: Mutex<Vec<Call>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Requests of every batch, in call order.
    pub fn batches(&self) -> Vec<Vec<Value>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Batch(_, requests) => Some(requests),
                Call::Create(_) => None,
            })
            .collect()
    }
}

fn to_values(requests: &[Request]) -> Vec<Value> {
    requests
        .iter()
        .map(|r| serde_json::to_value(r).expect("request serializes"))
        .collect()
}

#[async_trait]
impl FormPublisher for RecordingPublisher {
    async fn create(&self, title: &str) -> Result<FormId, ClientError> {
        self.calls.lock().unwrap().push(Call::Create(title.to_string()));
        Ok(FormId("form-1".to_string()))
    }

    async fn batch_update(&self, form_id: &FormId, requests: &[Request]) -> Result<(), ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Batch(form_id.clone(), to_values(requests)));
        Ok(())
    }
}

/// Accepts calls until the `fail_at`-th one (0 = create), which it rejects.
#[derive(Debug)]
pub struct FailingPublisher {
    fail_at: usize,
    calls: Mutex<usize>,
}

impl FailingPublisher {
    pub fn failing_at(fail_at: usize) -> Self {
        Self {
            fail_at,
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn next(&self) -> Result<(), ClientError> {
        let mut calls = self.calls.lock().unwrap();
        let index = *calls;
        *calls += 1;
        if index == self.fail_at {
            Err(ClientError::BadRequest("rejected".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FormPublisher for FailingPublisher {
    async fn create(&self, _title: &str) -> Result<FormId, ClientError> {
        self.next()?;
        Ok(FormId("form-2".to_string()))
    }

    async fn batch_update(&self, _form_id: &FormId, _requests: &[Request]) -> Result<(), ClientError> {
        self.next()
    }
}

// ============================================================
// Fake form service
// ============================================================

/// A request received by the fake service.
#[derive(Debug, Clone)]
pub struct Received {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct FakeFormService {
    received: Arc<Mutex<Vec<Received>>>,
    /// Status and body returned by every batchUpdate call instead of success.
    batch_failure: Option<(StatusCode, String)>,
}

impl FakeFormService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_batches(status: StatusCode, body: &str) -> Self {
        Self {
            received: Arc::default(),
            batch_failure: Some((status, body.to_string())),
        }
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    /// Serve on an ephemeral local port and return the API base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/v1/forms", post(create_form))
            .route("/v1/forms/{target}", post(batch_update))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake service");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake service stopped");
        });

        format!("http://{}/v1", addr)
    }

    fn record(&self, path: String, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.received.lock().unwrap().push(Received {
            path,
            authorization,
            body,
        });
    }
}

async fn create_form(
    State(service): State<FakeFormService>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    service.record("/forms".to_string(), &headers, body);
    Json(json!({ "formId": "fake-form", "info": { "title": "ignored" } }))
}

async fn batch_update(
    State(service): State<FakeFormService>,
    Path(target): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if !target.ends_with(":batchUpdate") {
        return Err((StatusCode::NOT_FOUND, format!("no route {}", target)));
    }
    service.record(format!("/forms/{}", target), &headers, body);
    match &service.batch_failure {
        Some(failure) => Err(failure.clone()),
        None => Ok(Json(json!({ "replies": [] }))),
    }
}
