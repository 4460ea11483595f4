use std::sync::Arc;

use crate::domain::repositories::Repositories;
use crate::forecast::{OracleClient, WaitTimePredictionService};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub repositories: Repositories,
    pub predictions: Arc<WaitTimePredictionService>,
}

impl AppState {
    pub fn new(repositories: Repositories, oracle: OracleClient) -> Self {
        let predictions = Arc::new(WaitTimePredictionService::new(&repositories, oracle));
        Self {
            repositories,
            predictions,
        }
    }
}
