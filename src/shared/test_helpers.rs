#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use chrono::Utc;
#[cfg(test)]
use fake::faker::lorem::en::Sentence;
#[cfg(test)]
use fake::faker::name::en::Name;
#[cfg(test)]
use fake::Fake;
#[cfg(test)]
use tokio::sync::mpsc;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::assistant::services::{GenerateRequest, ModelGateway};
#[cfg(test)]
use crate::features::reports::dtos::CreateReportInput;
#[cfg(test)]
use crate::features::reports::models::{
    Activity, ActivityKind, DangerLevel, Location, Report, Reporter, RoadType, Status,
};
#[cfg(test)]
use crate::features::workers::models::{Worker, WorkerStatus};

/// Install a test subscriber so `RUST_LOG=debug cargo test` shows the
/// store's tracing output. Safe to call from every test; only the first
/// call installs.
#[cfg(test)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Valid submission input for the given address
#[cfg(test)]
pub fn create_input(address: impl Into<String>) -> CreateReportInput {
    CreateReportInput {
        address: address.into(),
        lat: 18.6295,
        lng: 73.8213,
        reporter_id: "demo-citizen-1".to_string(),
        reporter_name: "Demo Citizen".to_string(),
        description: Sentence(3..8).fake(),
        citizen_notes: None,
        photo_url: None,
        severity: DangerLevel::Medium,
        contains_water: false,
        road_type: Some(RoadType::Residential),
    }
}

/// Freshly-submitted report at the given address
#[cfg(test)]
pub fn sample_report(address: impl Into<String>) -> Report {
    let reporter_name: String = Name().fake();
    Report {
        id: format!("rpt-{}", Uuid::new_v4()),
        location: Location {
            address: address.into(),
            lat: 18.6295,
            lng: 73.8213,
        },
        created_at: Utc::now(),
        reporter: Reporter {
            id: "demo-citizen-1".to_string(),
            name: reporter_name.clone(),
        },
        photo_url: None,
        description: Sentence(3..8).fake(),
        citizen_notes: None,
        upvotes: 1,
        danger_score: 5.0,
        danger_level: DangerLevel::Medium,
        contains_water: false,
        road_type: RoadType::Residential,
        status: Status::Submitted,
        worker: None,
        priority: None,
        activity_log: vec![Activity::now(
            ActivityKind::Creation,
            format!("Report created by {}", reporter_name),
        )],
        internal_notes: Vec::new(),
    }
}

/// Active roster entry with the given display name
#[cfg(test)]
pub fn sample_worker(name: impl Into<String>) -> Worker {
    let name = name.into();
    Worker {
        id: format!("wrk-{}", Uuid::new_v4()),
        name,
        avatar_url: "https://example.com/avatar.png".to_string(),
        status: WorkerStatus::Active,
        join_date: Utc::now(),
    }
}

/// Canned model gateway recording the requests it receives
#[cfg(test)]
pub struct StubGateway {
    reply: String,
    stream_chunks: Vec<String>,
    failure: Option<String>,
    last: Mutex<Option<GenerateRequest>>,
}

#[cfg(test)]
impl StubGateway {
    /// Replies to every request with the same text
    pub fn replying(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self {
            stream_chunks: vec![reply.clone()],
            reply,
            failure: None,
            last: Mutex::new(None),
        }
    }

    /// Streams the given chunks (and replies with their concatenation)
    pub fn streaming(chunks: Vec<&str>) -> Self {
        Self {
            reply: chunks.concat(),
            stream_chunks: chunks.into_iter().map(String::from).collect(),
            failure: None,
            last: Mutex::new(None),
        }
    }

    /// Fails every request with an external-service error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: String::new(),
            stream_chunks: Vec::new(),
            failure: Some(message.into()),
            last: Mutex::new(None),
        }
    }

    /// The most recent request seen by the stub
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last.lock().unwrap().clone()
    }

    fn record(&self, request: &GenerateRequest) {
        *self.last.lock().unwrap() = Some(request.clone());
    }
}

#[cfg(test)]
#[async_trait]
impl ModelGateway for StubGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        self.record(&request);
        match &self.failure {
            Some(message) => Err(AppError::ExternalService(message.clone())),
            None => Ok(self.reply.clone()),
        }
    }

    async fn generate_stream(&self, request: GenerateRequest) -> Result<mpsc::Receiver<String>> {
        self.record(&request);
        if let Some(message) = &self.failure {
            return Err(AppError::ExternalService(message.clone()));
        }

        let (tx, rx) = mpsc::channel(8);
        let chunks = self.stream_chunks.clone();
        tokio::spawn(async move {
            for chunk in chunks {
                if tx.send(chunk).await.is_err() {
                    break;
                }
            }
        });
        Ok(rx)
    }
}
