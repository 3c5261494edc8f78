use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::core::config::ModelConfig;
use crate::core::error::{AppError, Result};
use crate::features::assistant::dtos::{ChatMessage, ChatRole};

/// Image bytes sent inline with a generation request
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// One generation request against the hosted model API
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub image: Option<InlineImage>,
    /// Ask the model for a bare JSON object instead of prose
    pub json_response: bool,
    pub temperature: Option<f32>,
}

impl GenerateRequest {
    /// Single-turn prompt with no system instruction
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            ..Self::default()
        }
    }
}

/// Boundary to the hosted vision/language model.
///
/// The model integration itself lives on the other side of this trait; the
/// core never depends on it succeeding. Implementations make exactly one
/// attempt per call: there is no retry policy.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Run a request to completion and return the full response text
    async fn generate(&self, request: GenerateRequest) -> Result<String>;

    /// Run a request and stream response text incrementally, as the chunks
    /// arrive from the model
    async fn generate_stream(&self, request: GenerateRequest) -> Result<mpsc::Receiver<String>>;
}

// ===== Wire format (generateContent-style REST API) =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireInlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireInlineData {
    mime_type: String,
    /// Base64-encoded image bytes
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: Option<WireContent>,
}

impl WireResponse {
    /// Concatenated text of the first candidate's parts
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn to_wire_request(request: &GenerateRequest, default_temperature: f32) -> WireRequest {
    let system_instruction = request.system.as_ref().map(|text| WireContent {
        role: None,
        parts: vec![WirePart {
            text: Some(text.clone()),
            inline_data: None,
        }],
    });

    let mut contents: Vec<WireContent> = request
        .messages
        .iter()
        .map(|message| WireContent {
            role: Some(
                match message.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                }
                .to_string(),
            ),
            parts: vec![WirePart {
                text: Some(message.text.clone()),
                inline_data: None,
            }],
        })
        .collect();

    // Inline image rides with the last user turn
    if let Some(image) = &request.image {
        let part = WirePart {
            text: None,
            inline_data: Some(WireInlineData {
                mime_type: image.mime_type.clone(),
                data: BASE64.encode(&image.data),
            }),
        };
        match contents.last_mut() {
            Some(content) => content.parts.push(part),
            None => contents.push(WireContent {
                role: Some("user".to_string()),
                parts: vec![part],
            }),
        }
    }

    WireRequest {
        system_instruction,
        contents,
        generation_config: Some(WireGenerationConfig {
            temperature: request.temperature.or(Some(default_temperature)),
            response_mime_type: request.json_response.then_some("application/json"),
        }),
    }
}

// ===== HTTP implementation =====

/// reqwest-backed gateway to the hosted model API
pub struct HttpModelGateway {
    client: reqwest::Client,
    config: ModelConfig,
}

impl HttpModelGateway {
    pub fn new(config: ModelConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("FixFirstCore/1.0 (pothole-management)")
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        if !config.is_enabled() {
            tracing::warn!("Model API key not configured; assistant features are disabled");
        }

        Ok(Self { client, config })
    }

    /// Fails synchronously when the credential is missing: the assistant is
    /// simply disabled, no request leaves the process
    fn api_key(&self) -> Result<&str> {
        self.config.api_key.as_deref().ok_or_else(|| {
            AppError::ExternalService(
                "AI service is unavailable. API key is not configured.".to_string(),
            )
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url, self.config.model_name, method
        )
    }
}

#[async_trait]
impl ModelGateway for HttpModelGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let api_key = self.api_key()?;
        let body = to_wire_request(&request, self.config.temperature);

        let response = self
            .client
            .post(self.endpoint("generateContent"))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Model request failed: {:?}", e);
                AppError::ExternalService(format!("Model request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Model API returned status: {}", status);
            return Err(AppError::ExternalService(format!(
                "Model API returned status {}",
                status
            )));
        }

        let wire: WireResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode model response: {:?}", e);
            AppError::ExternalService(format!("Failed to decode model response: {}", e))
        })?;

        let text = wire.text();
        if text.trim().is_empty() {
            return Err(AppError::ModelResponse(
                "Received an empty response from the model".to_string(),
            ));
        }

        Ok(text)
    }

    async fn generate_stream(&self, request: GenerateRequest) -> Result<mpsc::Receiver<String>> {
        let api_key = self.api_key()?;
        let body = to_wire_request(&request, self.config.temperature);

        let response = self
            .client
            .post(format!("{}?alt=sse", self.endpoint("streamGenerateContent")))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Model stream request failed: {:?}", e);
                AppError::ExternalService(format!("Model stream request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalService(format!(
                "Model API returned status {}",
                status
            )));
        }

        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = stream.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        tracing::warn!("Model stream interrupted: {}", e);
                        break;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // SSE events are newline-delimited; keep the trailing partial line
                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim().to_string();
                    buffer.drain(..=newline);

                    let Some(data) = line.strip_prefix("data:") else {
                        continue;
                    };
                    let data = data.trim();
                    if data.is_empty() || data == "[DONE]" {
                        continue;
                    }

                    match serde_json::from_str::<WireResponse>(data) {
                        Ok(wire) => {
                            let delta = wire.text();
                            if !delta.is_empty() && tx.send(delta).await.is_err() {
                                return; // receiver dropped
                            }
                        }
                        Err(e) => {
                            tracing::debug!("Skipping undecodable stream event: {}", e);
                        }
                    }
                }
            }
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn disabled_config() -> ModelConfig {
        ModelConfig {
            api_key: None,
            base_url: "https://example.invalid/v1beta".to_string(),
            model_name: "test-model".to_string(),
            temperature: 0.4,
            request_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_missing_credential_fails_before_any_io() {
        tokio_test::block_on(async {
            let gateway = HttpModelGateway::new(disabled_config()).unwrap();

            let result = gateway.generate(GenerateRequest::from_prompt("hello")).await;
            assert!(matches!(result, Err(AppError::ExternalService(_))));

            let result = gateway
                .generate_stream(GenerateRequest::from_prompt("hello"))
                .await;
            assert!(matches!(result, Err(AppError::ExternalService(_))));
        });
    }

    #[test]
    fn test_wire_request_shape() {
        let request = GenerateRequest {
            system: Some("You are a triage assistant.".to_string()),
            messages: vec![ChatMessage::user("Classify this")],
            image: Some(InlineImage {
                mime_type: "image/png".to_string(),
                data: vec![1, 2, 3],
            }),
            json_response: true,
            temperature: None,
        };

        let wire = to_wire_request(&request, 0.4);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "You are a triage assistant."
        );
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Classify this");
        // Image rides with the last user turn, base64-encoded
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["data"],
            BASE64.encode([1u8, 2, 3])
        );
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_wire_response_concatenates_first_candidate() {
        let wire: WireResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(wire.text(), "Hello world");

        let empty: WireResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(empty.text(), "");
    }
}
