use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One visitor's check-in and service-start record at a branch
///
/// # Invariants
/// - Visitor name cannot be empty
/// - Service cannot start before check-in
/// - Wait time is never negative
///
/// # Example
/// ```
/// use chrono::{Duration, Utc};
/// use smartqueue_api::domain::visitor_log::VisitorLog;
///
/// let check_in = Utc::now();
/// let log = VisitorLog::new(
///     "Ada".to_string(),
///     "B1".to_string(),
///     check_in,
///     check_in + Duration::minutes(12),
///     None,
/// )
/// .expect("valid log");
///
/// assert_eq!(log.wait_time_minutes(), 12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorLog {
    id: String,
    visitor_name: String,
    branch_id: String,
    check_in_time: DateTime<Utc>,
    service_start_time: DateTime<Utc>,
    wait_time_minutes: i32,
}

impl VisitorLog {
    /// Creates a new visitor log entry
    ///
    /// When `wait_time_minutes` is not supplied it is derived from the two
    /// timestamps, truncated to whole minutes.
    ///
    /// # Returns
    /// * `Ok(VisitorLog)` - New entry with a fresh identity
    /// * `Err(String)` - If any invariant is violated
    pub fn new(
        visitor_name: String,
        branch_id: String,
        check_in_time: DateTime<Utc>,
        service_start_time: DateTime<Utc>,
        wait_time_minutes: Option<i32>,
    ) -> Result<Self, String> {
        if visitor_name.trim().is_empty() {
            return Err("Visitor name cannot be empty".to_string());
        }

        if service_start_time < check_in_time {
            return Err("Service start time cannot precede check-in time".to_string());
        }

        let wait_time_minutes = match wait_time_minutes {
            Some(minutes) if minutes < 0 => {
                return Err("Wait time cannot be negative".to_string());
            }
            Some(minutes) => minutes,
            None => Self::derive_wait_minutes(check_in_time, service_start_time)?,
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            visitor_name,
            branch_id,
            check_in_time,
            service_start_time,
            wait_time_minutes,
        })
    }

    fn derive_wait_minutes(
        check_in_time: DateTime<Utc>,
        service_start_time: DateTime<Utc>,
    ) -> Result<i32, String> {
        let minutes = (service_start_time - check_in_time).num_minutes();
        i32::try_from(minutes).map_err(|_| format!("Wait time out of range: {} minutes", minutes))
    }

    // ===== Getters =====

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn visitor_name(&self) -> &str {
        &self.visitor_name
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn check_in_time(&self) -> DateTime<Utc> {
        self.check_in_time
    }

    pub fn service_start_time(&self) -> DateTime<Utc> {
        self.service_start_time
    }

    pub fn wait_time_minutes(&self) -> i32 {
        self.wait_time_minutes
    }

    /// Reconstructs a VisitorLog from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations and test fixtures.
    pub fn from_persistence(
        id: String,
        visitor_name: String,
        branch_id: String,
        check_in_time: DateTime<Utc>,
        service_start_time: DateTime<Utc>,
        wait_time_minutes: i32,
    ) -> Self {
        Self {
            id,
            visitor_name,
            branch_id,
            check_in_time,
            service_start_time,
            wait_time_minutes,
        }
    }
}
