//! Wait-time prediction workflow tests
//!
//! Drive `WaitTimePredictionService` end to end against in-memory stores
//! and a scripted oracle:
//! - history gathering, averaging and recording
//! - oracle failures leave nothing persisted
//! - maintenance operations (get, list, update, delete)

mod common;

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use common::{branch, repositories, visitor_log, FailingPredictionRepository, InMemoryStore, MockOracle};
use smartqueue_api::domain::crowd::CrowdSample;
use smartqueue_api::domain::prediction::PredictionUpdate;
use smartqueue_api::domain::repositories::{Page, Repositories};
use smartqueue_api::forecast::prompts::{NO_CROWD_DATA, NO_VISITOR_LOGS};
use smartqueue_api::forecast::{OracleClient, PredictionError, PredictionRequest, WaitTimePredictionService};

const VERDICT: &str = r#"{"predictedWaitTime": 12, "actualWaitTime": 0, "accuracy": 0.5}"#;

fn as_of() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn request(branch_id: &str) -> PredictionRequest {
    PredictionRequest {
        visitor_id: "V1".to_string(),
        branch_id: branch_id.to_string(),
        visit_date: Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
    }
}

async fn setup(oracle: OracleClient) -> (Arc<InMemoryStore>, Repositories, WaitTimePredictionService) {
    let store = InMemoryStore::new();
    let repos = repositories(&store);
    repos
        .branches
        .create(&branch("B1", "Main Street", 40))
        .await
        .unwrap();

    let service = WaitTimePredictionService::new(&repos, oracle);
    (store, repos, service)
}

#[tokio::test]
async fn test_prediction_without_history() {
    let oracle = MockOracle::replying(VERDICT);
    let (store, _repos, service) = setup(OracleClient::configured(oracle.clone())).await;

    let prediction = service.predict_as_of(&request("B1"), as_of()).await.unwrap();

    assert_eq!(prediction.predicted_wait_time(), 12.0);
    assert_eq!(prediction.actual_wait_time(), 0.0);
    assert_eq!(prediction.accuracy(), 0.5);
    assert_eq!(prediction.visitor_id(), "V1");
    assert_eq!(prediction.branch_id(), "B1");
    assert_eq!(store.prediction_count(), 1);

    let prompt = oracle.last_prompt().unwrap();
    assert!(prompt.contains("Main Street"));
    assert!(prompt.contains("40"));
    assert!(prompt.contains(NO_CROWD_DATA));
    assert!(prompt.contains(NO_VISITOR_LOGS));
}

#[tokio::test]
async fn test_actual_wait_time_is_local_average() {
    // The oracle claims 99; the stored value must be the branch mean
    let oracle = MockOracle::replying(
        r#"{"predictedWaitTime": 18, "actualWaitTime": 99, "accuracy": 0.8}"#,
    );
    let (_store, repos, service) = setup(OracleClient::configured(oracle.clone())).await;

    for (i, wait) in [10, 20, 30].into_iter().enumerate() {
        let check_in = as_of() - Duration::days(i as i64 + 1);
        repos
            .visitor_logs
            .create(&visitor_log(&format!("Visitor {}", i), "B1", check_in, wait))
            .await
            .unwrap();
    }

    let prediction = service.predict_as_of(&request("B1"), as_of()).await.unwrap();

    assert_eq!(prediction.predicted_wait_time(), 18.0);
    assert_eq!(prediction.actual_wait_time(), 20.0);
    assert_eq!(prediction.accuracy(), 0.8);

    let prompt = oracle.last_prompt().unwrap();
    assert!(prompt.contains("Visitor Name - Visitor 0"));
    assert!(prompt.contains("Waited for - 30 minutes"));
}

#[tokio::test]
async fn test_old_logs_count_in_average_but_not_prompt() {
    let oracle = MockOracle::replying(VERDICT);
    let (_store, repos, service) = setup(OracleClient::configured(oracle.clone())).await;

    repos
        .visitor_logs
        .create(&visitor_log("Recent", "B1", as_of() - Duration::days(2), 10))
        .await
        .unwrap();
    repos
        .visitor_logs
        .create(&visitor_log("Ancient", "B1", as_of() - Duration::days(45), 30))
        .await
        .unwrap();
    repos
        .crowd_samples
        .create(&CrowdSample::new("B1".to_string(), as_of() - Duration::days(40), 7).unwrap())
        .await
        .unwrap();

    let prediction = service.predict_as_of(&request("B1"), as_of()).await.unwrap();

    assert_eq!(prediction.actual_wait_time(), 20.0);

    let prompt = oracle.last_prompt().unwrap();
    assert!(prompt.contains("Visitor Name - Recent"));
    assert!(!prompt.contains("Ancient"));
    assert!(prompt.contains(NO_CROWD_DATA));
}

#[tokio::test]
async fn test_crowd_samples_rendered_in_prompt() {
    let oracle = MockOracle::replying(VERDICT);
    let (_store, repos, service) = setup(OracleClient::configured(oracle.clone())).await;

    let recorded_at = Utc.with_ymd_and_hms(2024, 5, 30, 9, 15, 0).unwrap();
    repos
        .crowd_samples
        .create(&CrowdSample::new("B1".to_string(), recorded_at, 17).unwrap())
        .await
        .unwrap();

    service.predict_as_of(&request("B1"), as_of()).await.unwrap();

    let prompt = oracle.last_prompt().unwrap();
    assert!(prompt.contains("Date - 2024-05-30 09:15:00 - Crowd Count - 17"));
    assert!(!prompt.contains(NO_CROWD_DATA));
}

#[tokio::test]
async fn test_unknown_branch_never_reaches_oracle() {
    let oracle = MockOracle::replying(VERDICT);
    let (store, _repos, service) = setup(OracleClient::configured(oracle.clone())).await;

    let result = service.predict_as_of(&request("NOPE"), as_of()).await;

    assert!(matches!(result, Err(PredictionError::BranchNotFound(id)) if id == "NOPE"));
    assert_eq!(oracle.calls(), 0);
    assert_eq!(store.prediction_count(), 0);
}

#[tokio::test]
async fn test_prose_wrapped_reply_is_accepted() {
    let oracle = MockOracle::replying(
        "Sure! Here is the estimate:\n{\"predictedWaitTime\": 7, \"actualWaitTime\": 5, \"accuracy\": 0.9}\nHope this helps.",
    );
    let (_store, _repos, service) = setup(OracleClient::configured(oracle)).await;

    let prediction = service.predict_as_of(&request("B1"), as_of()).await.unwrap();

    assert_eq!(prediction.predicted_wait_time(), 7.0);
    assert_eq!(prediction.accuracy(), 0.9);
    assert_eq!(prediction.actual_wait_time(), 0.0);
}

#[tokio::test]
async fn test_unusable_reported_average_does_not_fail_prediction() {
    let oracle = MockOracle::replying(
        r#"{"predictedWaitTime": 12, "actualWaitTime": "unknown", "accuracy": 0.5}"#,
    );
    let (store, repos, service) = setup(OracleClient::configured(oracle)).await;
    repos
        .visitor_logs
        .create(&visitor_log("Ada", "B1", as_of() - Duration::days(1), 8))
        .await
        .unwrap();

    let prediction = service.predict_as_of(&request("B1"), as_of()).await.unwrap();

    assert_eq!(prediction.predicted_wait_time(), 12.0);
    assert_eq!(prediction.accuracy(), 0.5);
    assert_eq!(prediction.actual_wait_time(), 8.0);
    assert_eq!(store.prediction_count(), 1);
}

#[tokio::test]
async fn test_unconfigured_oracle_persists_nothing() {
    let (store, _repos, service) = setup(OracleClient::Unconfigured).await;

    let result = service.predict_as_of(&request("B1"), as_of()).await;

    assert!(matches!(result, Err(PredictionError::OracleUnavailable)));
    assert_eq!(store.prediction_count(), 0);
}

#[tokio::test]
async fn test_malformed_reply_persists_nothing() {
    let oracle = MockOracle::replying("I cannot estimate that right now.");
    let (store, _repos, service) = setup(OracleClient::configured(oracle.clone())).await;

    let result = service.predict_as_of(&request("B1"), as_of()).await;

    match result {
        Err(PredictionError::MalformedOracleResponse { raw, .. }) => {
            assert_eq!(raw, "I cannot estimate that right now.");
        }
        other => panic!("expected malformed response, got {:?}", other),
    }
    assert_eq!(oracle.calls(), 1);
    assert_eq!(store.prediction_count(), 0);
}

#[tokio::test]
async fn test_store_failure_is_persistence_error() {
    let store = InMemoryStore::new();
    let mut repos = repositories(&store);
    repos.predictions = Arc::new(FailingPredictionRepository);
    repos
        .branches
        .create(&branch("B1", "Main Street", 40))
        .await
        .unwrap();

    let service =
        WaitTimePredictionService::new(&repos, OracleClient::configured(MockOracle::replying(VERDICT)));

    let result = service.predict_as_of(&request("B1"), as_of()).await;

    assert!(matches!(result, Err(PredictionError::PersistenceFailed(_))));
}

#[tokio::test]
async fn test_empty_visitor_id_rejected() {
    let oracle = MockOracle::replying(VERDICT);
    let (_store, _repos, service) = setup(OracleClient::configured(oracle.clone())).await;

    let mut req = request("B1");
    req.visitor_id = "  ".to_string();

    let result = service.predict_as_of(&req, as_of()).await;

    assert!(matches!(result, Err(PredictionError::Invalid(_))));
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn test_each_prediction_is_a_new_record() {
    let (store, _repos, service) =
        setup(OracleClient::configured(MockOracle::replying(VERDICT))).await;

    let first = service.predict_as_of(&request("B1"), as_of()).await.unwrap();
    let second = service.predict_as_of(&request("B1"), as_of()).await.unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(store.prediction_count(), 2);

    let by_visitor = service.list_by_visitor("V1", Page::default()).await.unwrap();
    assert_eq!(by_visitor.len(), 2);

    let by_branch = service
        .list_by_branch("B1", Page::new(Some(1), Some(10)).unwrap())
        .await
        .unwrap();
    assert_eq!(by_branch.len(), 1);
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let (_store, _repos, service) =
        setup(OracleClient::configured(MockOracle::replying(VERDICT))).await;
    let created = service.predict_as_of(&request("B1"), as_of()).await.unwrap();

    let updated = service
        .update(
            created.id(),
            PredictionUpdate {
                accuracy: Some(0.75),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.accuracy(), 0.75);
    assert_eq!(updated.predicted_wait_time(), created.predicted_wait_time());
    assert_eq!(updated.visitor_id(), created.visitor_id());
    assert_eq!(updated.visit_date(), created.visit_date());

    let stored = service.get(created.id()).await.unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_update_to_unknown_branch_fails() {
    let (_store, _repos, service) =
        setup(OracleClient::configured(MockOracle::replying(VERDICT))).await;
    let created = service.predict_as_of(&request("B1"), as_of()).await.unwrap();

    let result = service
        .update(
            created.id(),
            PredictionUpdate {
                branch_id: Some("NOPE".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(PredictionError::BranchNotFound(_))));
    assert_eq!(service.get(created.id()).await.unwrap().branch_id(), "B1");
}

#[tokio::test]
async fn test_missing_prediction_operations() {
    let (_store, _repos, service) =
        setup(OracleClient::configured(MockOracle::replying(VERDICT))).await;

    assert!(matches!(service.get("missing").await, Err(PredictionError::NotFound(_))));
    assert!(matches!(
        service.update("missing", PredictionUpdate::default()).await,
        Err(PredictionError::NotFound(_))
    ));
    assert!(matches!(service.delete("missing").await, Err(PredictionError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_removes_prediction() {
    let (store, _repos, service) =
        setup(OracleClient::configured(MockOracle::replying(VERDICT))).await;
    let created = service.predict_as_of(&request("B1"), as_of()).await.unwrap();

    service.delete(created.id()).await.unwrap();

    assert_eq!(store.prediction_count(), 0);
    assert!(matches!(
        service.get(created.id()).await,
        Err(PredictionError::NotFound(_))
    ));
}
