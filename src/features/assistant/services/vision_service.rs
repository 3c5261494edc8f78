use std::collections::HashMap;
use std::sync::Arc;

use minijinja::Value;

use crate::core::error::{AppError, Result};
use crate::features::assistant::dtos::ImageAnalysis;
use crate::features::assistant::services::{GenerateRequest, InlineImage, ModelGateway};
use crate::shared::llm::{parse_with_fallback, LlmResponse};
use crate::shared::prompts::render_template;

/// Classifies submitted road photos through the vision model.
///
/// Used by the citizen submission flow to pre-fill severity, water presence,
/// and a description before the report is created.
pub struct VisionService {
    gateway: Arc<dyn ModelGateway>,
}

impl VisionService {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Classify a road photo. `context` carries optional reporter-provided
    /// text that helps the model disambiguate the image.
    pub async fn analyze_image(
        &self,
        image: &[u8],
        mime_type: &str,
        context: Option<&str>,
    ) -> Result<ImageAnalysis> {
        let mut ctx = HashMap::new();
        ctx.insert("schema", Value::from(ImageAnalysis::json_schema_string()));
        ctx.insert("context", Value::from(context.unwrap_or_default()));
        let prompt = render_template("classify_image.jinja", &ctx)?;

        let request = GenerateRequest {
            image: Some(InlineImage {
                mime_type: mime_type.to_string(),
                data: image.to_vec(),
            }),
            json_response: true,
            ..GenerateRequest::from_prompt(prompt)
        };

        let text = self.gateway.generate(request).await?;

        let analysis: ImageAnalysis = parse_with_fallback(&text);
        if !analysis.is_success() {
            return Err(AppError::ModelResponse(
                analysis
                    .error_message()
                    .unwrap_or("Model returned an invalid classification")
                    .to_string(),
            ));
        }

        tracing::info!(
            "Image classified: pothole={}, severity={}",
            analysis.is_pothole,
            analysis.severity
        );

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::DangerLevel;
    use crate::shared::test_helpers::StubGateway;

    #[tokio::test]
    async fn test_analyze_image_parses_model_json() {
        let gateway = Arc::new(StubGateway::replying(
            r#"{"is_pothole": true, "severity": "High", "contains_water": true,
                "description": "Deep pothole holding water."}"#,
        ));
        let service = VisionService::new(gateway.clone());

        let analysis = service
            .analyze_image(&[0u8; 16], "image/png", Some("near the school"))
            .await
            .unwrap();

        assert!(analysis.is_pothole);
        assert_eq!(analysis.severity, DangerLevel::High);
        assert!(analysis.contains_water);

        // The rendered prompt carried the schema and the reporter context
        let request = gateway.last_request().unwrap();
        assert!(request.json_response);
        assert!(request.messages[0].text.contains("is_pothole"));
        assert!(request.messages[0].text.contains("near the school"));
        assert_eq!(request.image.as_ref().unwrap().mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_analyze_image_fenced_output_still_parses() {
        let gateway = Arc::new(StubGateway::replying(
            "```json\n{\"is_pothole\": false, \"severity\": \"Low\", \"contains_water\": false, \"description\": \"Just a shadow.\"}\n```",
        ));
        let service = VisionService::new(gateway);

        let analysis = service.analyze_image(&[0u8; 4], "image/jpeg", None).await.unwrap();
        assert!(!analysis.is_pothole);
        assert_eq!(analysis.severity, DangerLevel::Low);
    }

    #[tokio::test]
    async fn test_analyze_image_malformed_output_is_a_parse_error() {
        let gateway = Arc::new(StubGateway::replying("I could not classify this image."));
        let service = VisionService::new(gateway);

        let result = service.analyze_image(&[0u8; 4], "image/png", None).await;
        assert!(matches!(result, Err(AppError::ModelResponse(_))));
    }

    #[tokio::test]
    async fn test_analyze_image_transport_failure_propagates() {
        let gateway = Arc::new(StubGateway::failing("boom"));
        let service = VisionService::new(gateway);

        let result = service.analyze_image(&[0u8; 4], "image/png", None).await;
        assert!(matches!(result, Err(AppError::ExternalService(_))));
    }
}
