//! Teams batch messaging state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Progress of a batch send
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchOperationState {
    /// Operation state (`Accepted`, `InProgress`, `Completed`, `Failed`)
    #[serde(default)]
    pub state: Option<String>,

    /// Number of entries per HTTP status code
    #[serde(default)]
    pub status_map: HashMap<u16, u32>,

    /// Earliest time the state should be polled again
    #[serde(default)]
    pub retry_after: Option<DateTime<Utc>>,

    /// Total number of entries in the operation
    #[serde(default)]
    pub total_entries_count: u32,
}

/// One page of entries a batch send failed to deliver
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailedEntriesResponse {
    /// Token for the next page, absent on the last page
    #[serde(default)]
    pub continuation_token: Option<String>,

    /// Failed entries on this page
    #[serde(default, rename = "failedEntryResponses", alias = "failedEntries")]
    pub failed_entries: Vec<BatchFailedEntry>,
}

/// An entry a batch send failed to deliver
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailedEntry {
    /// Member or channel id
    #[serde(default, alias = "id")]
    pub entry_id: Option<String>,

    /// Failure description
    #[serde(default, alias = "errorMessage")]
    pub error: Option<String>,
}
