use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use minijinja::Value;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::core::error::Result;
use crate::features::assistant::dtos::ChatMessage;
use crate::features::assistant::services::{GenerateRequest, ModelGateway};
use crate::features::reports::models::Report;
use crate::shared::prompts::render_template;

/// Dashboard Q&A assistant over the current report snapshot.
///
/// The system prompt embeds a trimmed JSON projection of the reports, so the
/// conversation is grounded in the data on screen. History is held for the
/// lifetime of the chat; a new snapshot means a new chat.
pub struct AssistantChat {
    gateway: Arc<dyn ModelGateway>,
    system_prompt: String,
    history: Arc<Mutex<Vec<ChatMessage>>>,
}

impl AssistantChat {
    /// Open a chat grounded in the given snapshot, optionally resuming
    /// prior history
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        reports: &[Report],
        history: Vec<ChatMessage>,
    ) -> Result<Self> {
        let system_prompt = build_system_prompt(reports)?;
        Ok(Self {
            gateway,
            system_prompt,
            history: Arc::new(Mutex::new(history)),
        })
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        self.history.lock().expect("chat history lock").clone()
    }

    fn request_with(&self, text: &str) -> GenerateRequest {
        let mut history = self.history.lock().expect("chat history lock");
        history.push(ChatMessage::user(text));
        GenerateRequest {
            system: Some(self.system_prompt.clone()),
            messages: history.clone(),
            ..GenerateRequest::default()
        }
    }

    /// Send a message and wait for the full reply
    pub async fn send_message(&self, text: &str) -> Result<String> {
        let request = self.request_with(text);
        let reply = self.gateway.generate(request).await?;

        self.history
            .lock()
            .expect("chat history lock")
            .push(ChatMessage::model(reply.clone()));
        Ok(reply)
    }

    /// Send a message and stream the reply as typing chunks.
    ///
    /// The full reply is appended to the history once the stream drains.
    pub async fn send_message_stream(&self, text: &str) -> Result<ReceiverStream<String>> {
        let request = self.request_with(text);
        let mut chunks = self.gateway.generate_stream(request).await?;

        let (tx, rx) = mpsc::channel(32);
        let history = Arc::clone(&self.history);

        tokio::spawn(async move {
            let mut full_reply = String::new();
            while let Some(chunk) = chunks.recv().await {
                full_reply.push_str(&chunk);
                if tx.send(chunk).await.is_err() {
                    break; // consumer gone; still record what we saw
                }
            }
            if !full_reply.is_empty() {
                history
                    .lock()
                    .expect("chat history lock")
                    .push(ChatMessage::model(full_reply));
            }
        });

        Ok(ReceiverStream::new(rx))
    }
}

/// Render the system prompt around a trimmed projection of the reports.
///
/// Only the fields the assistant needs are sent, with 8-char ids, to keep
/// the context small.
fn build_system_prompt(reports: &[Report]) -> Result<String> {
    let projection: Vec<serde_json::Value> = reports
        .iter()
        .map(|r| {
            json!({
                "id": r.id.chars().take(8).collect::<String>(),
                "status": r.status.to_string(),
                "dangerLevel": r.danger_level.to_string(),
                "worker": r.worker.as_deref().unwrap_or("Unassigned"),
                "address": r.location.address,
                "roadType": r.road_type.to_string(),
            })
        })
        .collect();

    let reports_json = serde_json::to_string_pretty(&projection)
        .unwrap_or_else(|_| "[]".to_string());

    let mut ctx = HashMap::new();
    ctx.insert("reports_json", Value::from(reports_json));
    Ok(render_template("assistant_system.jinja", &ctx)?)
}
