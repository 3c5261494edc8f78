use std::collections::HashMap;
use std::sync::Arc;

use minijinja::Value;

use crate::core::error::{AppError, Result};
use crate::features::assistant::dtos::RepairBrief;
use crate::features::assistant::services::{GenerateRequest, InlineImage, ModelGateway};
use crate::features::reports::models::Report;
use crate::shared::llm::{parse_with_fallback, LlmResponse};
use crate::shared::prompts::render_template;

/// Generates structured repair-and-safety briefs for individual reports
pub struct BriefService {
    gateway: Arc<dyn ModelGateway>,
}

impl BriefService {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Produce a repair brief from a report's data, optionally including
    /// the report photo for visual analysis
    pub async fn generate_repair_brief(
        &self,
        report: &Report,
        image: Option<InlineImage>,
    ) -> Result<RepairBrief> {
        let mut ctx = HashMap::new();
        ctx.insert(
            "danger_score",
            Value::from(format!("{:.1}", report.danger_score)),
        );
        ctx.insert("danger_level", Value::from(report.danger_level.to_string()));
        ctx.insert("road_type", Value::from(report.road_type.to_string()));
        ctx.insert("description", Value::from(report.description.clone()));
        ctx.insert("upvotes", Value::from(report.upvotes));
        ctx.insert("schema", Value::from(RepairBrief::json_schema_string()));
        let prompt = render_template("repair_brief.jinja", &ctx)?;

        let request = GenerateRequest {
            image,
            json_response: true,
            ..GenerateRequest::from_prompt(prompt)
        };

        let text = self.gateway.generate(request).await?;

        let brief: RepairBrief = parse_with_fallback(&text);
        if !brief.is_success() {
            return Err(AppError::ModelResponse(
                brief
                    .error_message()
                    .unwrap_or("Model returned an invalid brief")
                    .to_string(),
            ));
        }

        tracing::info!("Repair brief generated for report {}", report.id);
        Ok(brief)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sample_report, StubGateway};

    #[tokio::test]
    async fn test_brief_prompt_carries_report_data() {
        let gateway = Arc::new(StubGateway::replying(
            r#"{"visualAnalysis": "Wide pothole", "priorityAssessment": "Urgent",
                "suggestedAction": "Full-depth repair", "safetyProtocol": "Close the lane"}"#,
        ));
        let service = BriefService::new(gateway.clone());

        let mut report = sample_report("123 Main Street");
        report.danger_score = 8.5;
        report.upvotes = 12;

        let brief = service.generate_repair_brief(&report, None).await.unwrap();
        assert_eq!(brief.suggested_action, "Full-depth repair");

        let prompt = &gateway.last_request().unwrap().messages[0].text;
        assert!(prompt.contains("8.5/10"));
        assert!(prompt.contains("Community Upvotes: 12"));
        assert!(prompt.contains("visualAnalysis"));
    }

    #[tokio::test]
    async fn test_brief_malformed_output_is_a_parse_error() {
        let gateway = Arc::new(StubGateway::replying("no json here"));
        let service = BriefService::new(gateway);

        let result = service
            .generate_repair_brief(&sample_report("123 Main Street"), None)
            .await;
        assert!(matches!(result, Err(AppError::ModelResponse(_))));
    }
}
