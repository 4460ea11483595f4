//! Shared fixtures for integration tests
//!
//! In-memory repositories and a scripted oracle, so the workflow and the
//! HTTP layer can be exercised without PostgreSQL or network access.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use smartqueue_api::domain::branch::Branch;
use smartqueue_api::domain::crowd::CrowdSample;
use smartqueue_api::domain::prediction::WaitTimePrediction;
use smartqueue_api::domain::repositories::{
    BranchRepository, CrowdSampleRepository, Page, PredictionRepository, Repositories,
    RepositoryError, RepositoryResult, VisitorLogRepository,
};
use smartqueue_api::domain::visitor_log::VisitorLog;
use smartqueue_api::forecast::{PredictionOracle, PredictionResult};

/// Every store kept in process memory
#[derive(Default)]
pub struct InMemoryStore {
    branches: Mutex<Vec<Branch>>,
    visitor_logs: Mutex<Vec<VisitorLog>>,
    crowd_samples: Mutex<Vec<CrowdSample>>,
    predictions: Mutex<Vec<WaitTimePrediction>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn prediction_count(&self) -> usize {
        self.predictions.lock().unwrap().len()
    }
}

/// Wire one in-memory store behind every repository handle
pub fn repositories(store: &Arc<InMemoryStore>) -> Repositories {
    Repositories {
        branches: store.clone(),
        visitor_logs: store.clone(),
        crowd_samples: store.clone(),
        predictions: store.clone(),
    }
}

fn paginate<T: Clone>(items: Vec<T>, page: Page) -> Vec<T> {
    items
        .into_iter()
        .skip(page.skip as usize)
        .take(page.limit as usize)
        .collect()
}

#[async_trait]
impl BranchRepository for InMemoryStore {
    async fn create(&self, branch: &Branch) -> RepositoryResult<()> {
        let mut branches = self.branches.lock().unwrap();
        if branches.iter().any(|b| b.id == branch.id) {
            return Err(RepositoryError::Conflict(format!("Branch {}", branch.id)));
        }
        branches.push(branch.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Branch>> {
        Ok(self
            .branches
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }
}

#[async_trait]
impl VisitorLogRepository for InMemoryStore {
    async fn create(&self, log: &VisitorLog) -> RepositoryResult<()> {
        self.visitor_logs.lock().unwrap().push(log.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<VisitorLog>> {
        Ok(self
            .visitor_logs
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id() == id)
            .cloned())
    }

    async fn find_by_branch(&self, branch_id: &str, page: Page) -> RepositoryResult<Vec<VisitorLog>> {
        let mut logs: Vec<VisitorLog> = self
            .visitor_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.branch_id() == branch_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.check_in_time().cmp(&a.check_in_time()));
        Ok(paginate(logs, page))
    }

    async fn find_by_branch_since(
        &self,
        branch_id: &str,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<VisitorLog>> {
        let mut logs: Vec<VisitorLog> = self
            .visitor_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.branch_id() == branch_id && l.check_in_time() >= since)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.check_in_time().cmp(&a.check_in_time()));
        Ok(logs)
    }

    async fn average_wait_time(&self, branch_id: &str) -> RepositoryResult<Option<f64>> {
        let waits: Vec<f64> = self
            .visitor_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.branch_id() == branch_id)
            .map(|l| l.wait_time_minutes() as f64)
            .collect();

        if waits.is_empty() {
            return Ok(None);
        }
        Ok(Some(waits.iter().sum::<f64>() / waits.len() as f64))
    }
}

#[async_trait]
impl CrowdSampleRepository for InMemoryStore {
    async fn create(&self, sample: &CrowdSample) -> RepositoryResult<()> {
        self.crowd_samples.lock().unwrap().push(sample.clone());
        Ok(())
    }

    async fn find_by_branch(&self, branch_id: &str, page: Page) -> RepositoryResult<Vec<CrowdSample>> {
        let mut samples: Vec<CrowdSample> = self
            .crowd_samples
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.branch_id == branch_id)
            .cloned()
            .collect();
        samples.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(paginate(samples, page))
    }

    async fn find_by_branch_since(
        &self,
        branch_id: &str,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<CrowdSample>> {
        let mut samples: Vec<CrowdSample> = self
            .crowd_samples
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.branch_id == branch_id && s.recorded_at >= since)
            .cloned()
            .collect();
        samples.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(samples)
    }
}

#[async_trait]
impl PredictionRepository for InMemoryStore {
    async fn insert(&self, prediction: &WaitTimePrediction) -> RepositoryResult<()> {
        self.predictions.lock().unwrap().push(prediction.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<WaitTimePrediction>> {
        Ok(self
            .predictions
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == id)
            .cloned())
    }

    async fn find_all(&self, page: Page) -> RepositoryResult<Vec<WaitTimePrediction>> {
        let mut all = self.predictions.lock().unwrap().clone();
        all.sort_by(|a, b| b.predicted_at().cmp(&a.predicted_at()));
        Ok(paginate(all, page))
    }

    async fn find_by_visitor(
        &self,
        visitor_id: &str,
        page: Page,
    ) -> RepositoryResult<Vec<WaitTimePrediction>> {
        let mut found: Vec<WaitTimePrediction> = self
            .predictions
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.visitor_id() == visitor_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.predicted_at().cmp(&a.predicted_at()));
        Ok(paginate(found, page))
    }

    async fn find_by_branch(
        &self,
        branch_id: &str,
        page: Page,
    ) -> RepositoryResult<Vec<WaitTimePrediction>> {
        let mut found: Vec<WaitTimePrediction> = self
            .predictions
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.branch_id() == branch_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.predicted_at().cmp(&a.predicted_at()));
        Ok(paginate(found, page))
    }

    async fn update(&self, prediction: &WaitTimePrediction) -> RepositoryResult<()> {
        let mut predictions = self.predictions.lock().unwrap();
        match predictions.iter_mut().find(|p| p.id() == prediction.id()) {
            Some(existing) => {
                *existing = prediction.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(format!(
                "Wait time prediction {}",
                prediction.id()
            ))),
        }
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let mut predictions = self.predictions.lock().unwrap();
        let before = predictions.len();
        predictions.retain(|p| p.id() != id);
        if predictions.len() == before {
            return Err(RepositoryError::NotFound(format!("Wait time prediction {}", id)));
        }
        Ok(())
    }
}

/// Prediction store whose writes always fail
pub struct FailingPredictionRepository;

#[async_trait]
impl PredictionRepository for FailingPredictionRepository {
    async fn insert(&self, _prediction: &WaitTimePrediction) -> RepositoryResult<()> {
        Err(RepositoryError::Storage("connection reset".to_string()))
    }

    async fn find_by_id(&self, _id: &str) -> RepositoryResult<Option<WaitTimePrediction>> {
        Ok(None)
    }

    async fn find_all(&self, _page: Page) -> RepositoryResult<Vec<WaitTimePrediction>> {
        Ok(Vec::new())
    }

    async fn find_by_visitor(
        &self,
        _visitor_id: &str,
        _page: Page,
    ) -> RepositoryResult<Vec<WaitTimePrediction>> {
        Ok(Vec::new())
    }

    async fn find_by_branch(
        &self,
        _branch_id: &str,
        _page: Page,
    ) -> RepositoryResult<Vec<WaitTimePrediction>> {
        Ok(Vec::new())
    }

    async fn update(&self, _prediction: &WaitTimePrediction) -> RepositoryResult<()> {
        Err(RepositoryError::Storage("connection reset".to_string()))
    }

    async fn delete(&self, _id: &str) -> RepositoryResult<()> {
        Err(RepositoryError::Storage("connection reset".to_string()))
    }
}

/// Branch store that loses every insert race: lookups miss, inserts conflict
pub struct RacedBranchRepository;

#[async_trait]
impl BranchRepository for RacedBranchRepository {
    async fn create(&self, branch: &Branch) -> RepositoryResult<()> {
        Err(RepositoryError::Conflict(format!("Branch {}", branch.id)))
    }

    async fn find_by_id(&self, _id: &str) -> RepositoryResult<Option<Branch>> {
        Ok(None)
    }
}

/// Oracle returning a canned reply and recording every prompt it sees
#[derive(Clone)]
pub struct MockOracle {
    response: String,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockOracle {
    pub fn replying(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PredictionOracle for MockOracle {
    async fn predict(&self, prompt: &str) -> PredictionResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }
}

pub fn branch(id: &str, name: &str, capacity: i32) -> Branch {
    Branch::new(
        Some(id.to_string()),
        name.to_string(),
        None,
        None,
        Some(capacity),
    )
    .unwrap()
}

pub fn visitor_log(name: &str, branch_id: &str, check_in: DateTime<Utc>, wait: i32) -> VisitorLog {
    VisitorLog::new(
        name.to_string(),
        branch_id.to_string(),
        check_in,
        check_in + chrono::Duration::minutes(wait as i64),
        None,
    )
    .unwrap()
}
