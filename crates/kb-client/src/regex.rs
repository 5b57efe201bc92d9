//! Server-side regex matching.

use kb_core::entities::RegexMatch;
use serde::{Deserialize, Serialize};

use crate::http::{into_payload, send_json};
use crate::{BackendClient, error::BackendError};

#[derive(Serialize)]
struct ApplyRequest<'a> {
    regex: &'a str,
    datapoints: &'a [String],
}

#[derive(Deserialize)]
struct ApplyResponse {
    #[serde(default)]
    matches: Vec<RegexMatch>,
}

impl BackendClient {
    /// Match `regex` against every datapoint; returns the matching ones with
    /// their named capture groups.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the request fails or the pattern does not compile.
    pub async fn apply_regex(
        &self,
        regex: &str,
        datapoints: &[String],
    ) -> Result<Vec<RegexMatch>, BackendError> {
        let body = ApplyRequest { regex, datapoints };
        let value = send_json(self.http.post(self.url("/regex/apply")).json(&body)).await?;
        let data: ApplyResponse = into_payload(value)?;
        tracing::debug!(
            tested = datapoints.len(),
            matches = data.matches.len(),
            "regex applied"
        );
        Ok(data.matches)
    }
}
