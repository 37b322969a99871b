use serde::{Deserialize, Serialize};

/// Weekly search count for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrendEntry {
    pub product: String,
    pub brand: String,
    pub count: i64,
}

/// Query string for `GET /trends`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendQuery {
    /// ISO week label, e.g. "2026-W42"; defaults to the current week
    pub week: Option<String>,
    pub limit: Option<u32>,
}

/// Response body for `GET /trends`
#[derive(Debug, Clone, Serialize)]
pub struct TrendResponse {
    pub enabled: bool,
    pub week: String,
    pub trends: Vec<TrendEntry>,
}
