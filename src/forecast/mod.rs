// Wait-time forecasting
//
// Gathers a branch's recent history, asks an external text-completion oracle
// for an estimate, and records the parsed result.

pub mod errors;
pub mod history;
pub mod oracle;
pub mod parser;
pub mod prompts;
pub mod recorder;
pub mod service;
pub mod types;

// Re-export main types
pub use errors::{PredictionError, PredictionResult};
pub use oracle::{OpenAiOracle, OracleClient, PredictionOracle};
pub use prompts::PromptBuilder;
pub use service::WaitTimePredictionService;
pub use types::{OracleSettings, OracleVerdict, PredictionRequest};
