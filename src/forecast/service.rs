use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::errors::{PredictionError, PredictionResult};
use super::history::HistoryGatherer;
use super::oracle::OracleClient;
use super::parser;
use super::prompts::PromptBuilder;
use super::recorder::PredictionRecorder;
use super::types::{PredictionRequest, WorkflowStage};
use crate::domain::prediction::{PredictionUpdate, WaitTimePrediction};
use crate::domain::repositories::{BranchRepository, Page, PredictionRepository, Repositories};

/// Runs the wait-time estimation workflow and maintains stored predictions
///
/// Gather history → build prompt → ask oracle → parse → record, strictly in
/// that order. A failure at any step ends the run with nothing persisted.
pub struct WaitTimePredictionService {
    gatherer: HistoryGatherer,
    prompts: PromptBuilder,
    oracle: OracleClient,
    recorder: PredictionRecorder,
    branches: Arc<dyn BranchRepository>,
    predictions: Arc<dyn PredictionRepository>,
}

impl WaitTimePredictionService {
    pub fn new(repositories: &Repositories, oracle: OracleClient) -> Self {
        Self {
            gatherer: HistoryGatherer::new(
                repositories.branches.clone(),
                repositories.visitor_logs.clone(),
                repositories.crowd_samples.clone(),
            ),
            prompts: PromptBuilder::new(),
            oracle,
            recorder: PredictionRecorder::new(
                repositories.predictions.clone(),
                repositories.visitor_logs.clone(),
            ),
            branches: repositories.branches.clone(),
            predictions: repositories.predictions.clone(),
        }
    }

    pub fn oracle(&self) -> &OracleClient {
        &self.oracle
    }

    /// Predict the wait for a visit using history up to now
    pub async fn predict(&self, request: &PredictionRequest) -> PredictionResult<WaitTimePrediction> {
        self.predict_as_of(request, Utc::now()).await
    }

    /// Predict the wait for a visit using history up to `as_of`
    pub async fn predict_as_of(
        &self,
        request: &PredictionRequest,
        as_of: DateTime<Utc>,
    ) -> PredictionResult<WaitTimePrediction> {
        let mut stage = WorkflowStage::Idle;
        let outcome = self.run(request, as_of, &mut stage).await;

        match &outcome {
            Ok(prediction) => {
                advance(&mut stage, WorkflowStage::Done, &request.branch_id);
                tracing::debug!(prediction_id = %prediction.id(), "Prediction workflow finished");
            }
            Err(PredictionError::MalformedOracleResponse { reason, raw }) => {
                tracing::error!(
                    branch_id = %request.branch_id,
                    stage = %stage,
                    reason = %reason,
                    raw_response = %raw,
                    "Oracle returned an unusable response"
                );
            }
            Err(e) => {
                tracing::warn!(
                    branch_id = %request.branch_id,
                    stage = %stage,
                    error = %e,
                    "Prediction workflow failed"
                );
            }
        }

        outcome
    }

    async fn run(
        &self,
        request: &PredictionRequest,
        as_of: DateTime<Utc>,
        stage: &mut WorkflowStage,
    ) -> PredictionResult<WaitTimePrediction> {
        if request.visitor_id.trim().is_empty() {
            return Err(PredictionError::Invalid("Visitor id cannot be empty".to_string()));
        }

        advance(stage, WorkflowStage::Gathering, &request.branch_id);
        let history = self.gatherer.gather(&request.branch_id, as_of).await?;

        advance(stage, WorkflowStage::Prompting, &request.branch_id);
        let prompt = self.prompts.build(
            &history.branch.name,
            history.branch.capacity,
            &history.crowd_samples,
            &history.visitor_logs,
        );

        advance(stage, WorkflowStage::AwaitingOracle, &request.branch_id);
        let raw = self.oracle.predict(&prompt).await?;

        advance(stage, WorkflowStage::Parsing, &request.branch_id);
        let verdict = parser::parse(&raw)?;
        tracing::debug!(
            predicted_wait_time = verdict.predicted_wait_time,
            accuracy = verdict.accuracy,
            reported_actual_wait_time = verdict.reported_actual_wait_time,
            "Parsed oracle verdict"
        );

        advance(stage, WorkflowStage::Recording, &request.branch_id);
        self.recorder
            .record(
                &request.branch_id,
                &request.visitor_id,
                request.visit_date,
                verdict.predicted_wait_time,
                verdict.accuracy,
            )
            .await
    }

    /// Find a prediction by ID
    pub async fn get(&self, id: &str) -> PredictionResult<WaitTimePrediction> {
        self.predictions
            .find_by_id(id)
            .await?
            .ok_or_else(|| PredictionError::NotFound(format!("Wait time prediction {}", id)))
    }

    pub async fn list(&self, page: Page) -> PredictionResult<Vec<WaitTimePrediction>> {
        Ok(self.predictions.find_all(page).await?)
    }

    pub async fn list_by_visitor(
        &self,
        visitor_id: &str,
        page: Page,
    ) -> PredictionResult<Vec<WaitTimePrediction>> {
        Ok(self.predictions.find_by_visitor(visitor_id, page).await?)
    }

    pub async fn list_by_branch(
        &self,
        branch_id: &str,
        page: Page,
    ) -> PredictionResult<Vec<WaitTimePrediction>> {
        Ok(self.predictions.find_by_branch(branch_id, page).await?)
    }

    /// Apply a partial update to a stored prediction
    ///
    /// A patch moving the prediction to another branch requires that branch
    /// to exist.
    pub async fn update(
        &self,
        id: &str,
        update: PredictionUpdate,
    ) -> PredictionResult<WaitTimePrediction> {
        let mut prediction = self.get(id).await?;
        if update.is_empty() {
            return Ok(prediction);
        }

        if let Some(branch_id) = update.branch_id.as_deref() {
            if self.branches.find_by_id(branch_id).await?.is_none() {
                return Err(PredictionError::BranchNotFound(branch_id.to_string()));
            }
        }

        prediction.apply(update).map_err(PredictionError::Invalid)?;
        self.predictions.update(&prediction).await?;

        tracing::info!(prediction_id = %id, "Updated wait time prediction");
        Ok(prediction)
    }

    /// Delete a prediction by ID
    pub async fn delete(&self, id: &str) -> PredictionResult<()> {
        self.predictions.delete(id).await?;

        tracing::info!(prediction_id = %id, "Deleted wait time prediction");
        Ok(())
    }
}

fn advance(stage: &mut WorkflowStage, next: WorkflowStage, branch_id: &str) {
    tracing::debug!(branch_id = %branch_id, from = %stage, to = %next, "Prediction workflow transition");
    *stage = next;
}
