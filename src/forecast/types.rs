use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::branch::Branch;
use crate::domain::crowd::CrowdSample;
use crate::domain::visitor_log::VisitorLog;

/// Inbound request for a new wait-time prediction
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub visitor_id: String,
    pub branch_id: String,
    #[serde(deserialize_with = "crate::domain::dates::deserialize_datetime")]
    pub visit_date: DateTime<Utc>,
}

/// Bounded history gathered for one branch
#[derive(Debug, Clone)]
pub struct BranchHistory {
    pub branch: Branch,
    /// Newest check-in first
    pub visitor_logs: Vec<VisitorLog>,
    /// Newest sample first
    pub crowd_samples: Vec<CrowdSample>,
}

/// Structured values extracted from the oracle's reply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OracleVerdict {
    pub predicted_wait_time: f64,
    pub accuracy: f64,
    /// The oracle's own idea of the average; only logged, never stored
    pub reported_actual_wait_time: f64,
}

/// Completion parameters for the oracle
#[derive(Debug, Clone, PartialEq)]
pub struct OracleSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.3,
            max_tokens: 500,
        }
    }
}

/// Workflow stages, in execution order
///
/// ```text
/// Idle -> Gathering -> Prompting -> AwaitingOracle -> Parsing -> Recording -> Done
/// ```
/// Any failure ends the run; there is no resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Idle,
    Gathering,
    Prompting,
    AwaitingOracle,
    Parsing,
    Recording,
    Done,
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowStage::Idle => write!(f, "idle"),
            WorkflowStage::Gathering => write!(f, "gathering"),
            WorkflowStage::Prompting => write!(f, "prompting"),
            WorkflowStage::AwaitingOracle => write!(f, "awaiting_oracle"),
            WorkflowStage::Parsing => write!(f, "parsing"),
            WorkflowStage::Recording => write!(f, "recording"),
            WorkflowStage::Done => write!(f, "done"),
        }
    }
}
