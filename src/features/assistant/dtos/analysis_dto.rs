use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::features::reports::models::DangerLevel;
use crate::shared::llm::LlmResponse;

fn default_true() -> bool {
    true
}

/// Image-classification contract: what the vision model returns for a road
/// photo
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ImageAnalysis {
    /// Whether the image contains a pothole
    pub is_pothole: bool,
    /// Classified severity of the pothole
    pub severity: DangerLevel,
    /// Whether the pothole holds a significant amount of water
    pub contains_water: bool,
    /// A brief, one-sentence description of the road condition
    pub description: String,

    #[serde(default = "default_true", skip_serializing)]
    #[schemars(skip)]
    parse_ok: bool,

    #[serde(skip)]
    #[schemars(skip)]
    parse_error: Option<String>,
}

impl LlmResponse for ImageAnalysis {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.parse_ok = false;
        self.parse_error = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.parse_ok
    }

    fn error_message(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }
}

/// Structured repair-and-safety brief generated for a report
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepairBrief {
    /// Analysis of the pothole image: apparent size, shape, visible hazards
    pub visual_analysis: String,
    /// One-sentence urgency summary combining image and report data
    pub priority_assessment: String,
    /// Actionable repair recommendation (e.g. "Standard cold patch")
    pub suggested_action: String,
    /// Key safety measures for the crew, considering the road type
    pub safety_protocol: String,

    #[serde(default = "default_true", skip_serializing)]
    #[schemars(skip)]
    parse_ok: bool,

    #[serde(skip)]
    #[schemars(skip)]
    parse_error: Option<String>,
}

impl LlmResponse for RepairBrief {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.parse_ok = false;
        self.parse_error = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.parse_ok
    }

    fn error_message(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_analysis_schema_exposes_contract_fields_only() {
        let schema = ImageAnalysis::json_schema_string();
        assert!(schema.contains("is_pothole"));
        assert!(schema.contains("severity"));
        assert!(schema.contains("contains_water"));
        assert!(schema.contains("description"));
        assert!(!schema.contains("parse_ok"));
    }

    #[test]
    fn test_repair_brief_uses_camel_case_wire_form() {
        let brief: RepairBrief = serde_json::from_str(
            r#"{
                "visualAnalysis": "Wide shallow pothole",
                "priorityAssessment": "Moderate urgency",
                "suggestedAction": "Standard cold patch",
                "safetyProtocol": "Cone off the lane"
            }"#,
        )
        .unwrap();

        assert!(brief.is_success());
        assert_eq!(brief.suggested_action, "Standard cold patch");

        let schema = RepairBrief::json_schema_string();
        assert!(schema.contains("visualAnalysis"));
        assert!(schema.contains("safetyProtocol"));
    }
}
