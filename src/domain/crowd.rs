use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point-in-time occupancy reading for a branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrowdSample {
    pub id: String,
    pub branch_id: String,
    pub recorded_at: DateTime<Utc>,
    pub crowd_count: i32,
}

impl CrowdSample {
    /// Creates a new crowd sample with a fresh identity
    ///
    /// # Returns
    /// * `Err(String)` - If the count is negative
    pub fn new(
        branch_id: String,
        recorded_at: DateTime<Utc>,
        crowd_count: i32,
    ) -> Result<Self, String> {
        if crowd_count < 0 {
            return Err("Crowd count cannot be negative".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            branch_id,
            recorded_at,
            crowd_count,
        })
    }
}
