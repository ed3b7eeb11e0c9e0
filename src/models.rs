use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TARGET: i64 = 120;

/// Persisted ledger. `last_applied == None` means the ledger has never been initialized.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppData {
    #[serde(default)]
    pub balance: i64,
    #[serde(default)]
    pub target: i64,
    #[serde(default)]
    pub last_applied: Option<NaiveDate>,
}

/// Snapshot returned by `GET /api/state`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateSnapshot {
    pub balance: i64,
    pub need: i64,
    pub target: i64,
    pub today: Today,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_applied: Option<String>,
}

/// The server reports the current date, but older backends sent a day count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Today {
    Count(i64),
    Label(String),
}

impl fmt::Display for Today {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Today::Count(value) => write!(f, "{value}"),
            Today::Label(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MinutesRequest {
    pub minutes: i64,
}

#[derive(Debug, Serialize)]
pub struct TargetRequest {
    pub target: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub ok: bool,
    pub balance: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TargetResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    pub target: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
