use serde::{Deserialize, Serialize};

/// One unit of work extracted from free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub step_type: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Step {
    pub fn new(id: &str, label: &str, step_type: &str, dependencies: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            step_type: step_type.to_string(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Body sent to the extraction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub message: String,
}

/// Body returned by the extraction service: either steps or an error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionResponse {
    Steps { steps: Vec<Step> },
    Failure { error: String },
}
