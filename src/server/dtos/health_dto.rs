use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// nothing to ping here since every upstream call is per request, so this is just a liveness
/// check with some build info attached
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// always "healthy", there's no degraded state to report
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: String,
    pub environment: String,
}
