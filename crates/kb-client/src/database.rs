//! Database passthrough routes: connection test and raw SQL.
//!
//! These do not feed the datapoint pipeline; the CLI exposes them directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{into_payload, send_json};
use crate::{BackendClient, error::BackendError};

/// Connection parameters forwarded to the backend's database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbCredentials {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// Result of a SQL statement: rows for queries, a message for DML/DDL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize)]
struct SqlRequest<'a> {
    sql: &'a str,
}

impl BackendClient {
    /// Ask the backend to open a connection with `creds`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the request fails or the connection is refused.
    pub async fn connect(&self, creds: &DbCredentials) -> Result<Value, BackendError> {
        into_payload(send_json(self.http.post(self.url("/connect-db")).json(creds)).await?)
    }

    /// Run one SQL statement. An empty statement returns an empty result
    /// without a request.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the request fails or the statement errors.
    pub async fn run_query(&self, sql: &str) -> Result<QueryResult, BackendError> {
        if sql.trim().is_empty() {
            return Ok(QueryResult::default());
        }
        let body = SqlRequest { sql };
        into_payload(send_json(self.http.post(self.url("/run-query")).json(&body)).await?)
    }
}
