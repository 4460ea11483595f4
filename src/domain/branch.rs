use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Nominal occupancy assumed for a branch that never declared one
pub const DEFAULT_BRANCH_CAPACITY: i32 = 50;

/// A physical service location belonging to an institution
///
/// Branches are the unit wait times are predicted against. The workflow
/// only ever reads them.
///
/// # Invariants
/// - Name cannot be empty
/// - Capacity must be positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub institution_id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub capacity: i32,
}

impl Branch {
    /// Creates a new Branch
    ///
    /// # Arguments
    /// * `id` - Identity to use; a fresh UUID is generated when absent
    /// * `name` - Display name (cannot be empty)
    /// * `institution_id` - Owning institution, if known
    /// * `address` - Street address, if known
    /// * `capacity` - Nominal capacity; defaults to [`DEFAULT_BRANCH_CAPACITY`]
    ///
    /// # Example
    /// ```
    /// use smartqueue_api::domain::branch::{Branch, DEFAULT_BRANCH_CAPACITY};
    ///
    /// let branch = Branch::new(None, "Main Street".to_string(), None, None, None)
    ///     .expect("valid branch");
    /// assert_eq!(branch.capacity, DEFAULT_BRANCH_CAPACITY);
    /// ```
    pub fn new(
        id: Option<String>,
        name: String,
        institution_id: Option<String>,
        address: Option<String>,
        capacity: Option<i32>,
    ) -> Result<Self, String> {
        if name.trim().is_empty() {
            return Err("Branch name cannot be empty".to_string());
        }

        let capacity = capacity.unwrap_or(DEFAULT_BRANCH_CAPACITY);
        if capacity <= 0 {
            return Err("Branch capacity must be positive".to_string());
        }

        let id = match id {
            Some(id) if id.trim().is_empty() => {
                return Err("Branch id cannot be empty".to_string());
            }
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };

        Ok(Self {
            id,
            institution_id,
            name,
            address,
            capacity,
        })
    }
}
