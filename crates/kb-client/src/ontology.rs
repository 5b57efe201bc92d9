//! Ontology routes: `.ttl` upload and paginated listings.

use std::path::Path;

use kb_core::enums::OntologyKind;
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};

use crate::http::{into_payload, send_json};
use crate::uploads::file_part;
use crate::{BackendClient, error::BackendError};

/// One page of ontology IRIs plus the unpaginated match count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyPage {
    pub total: u64,
    pub items: Vec<String>,
}

/// Listing routes name their item array after what they list.
#[derive(Deserialize)]
struct ListingResponse {
    #[serde(default)]
    total: Option<u64>,
    predicates: Option<Vec<String>>,
    classes: Option<Vec<String>>,
    instances: Option<Vec<String>>,
    entities: Option<Vec<String>>,
}

impl From<ListingResponse> for OntologyPage {
    fn from(resp: ListingResponse) -> Self {
        let items = resp
            .predicates
            .or(resp.classes)
            .or(resp.instances)
            .or(resp.entities)
            .unwrap_or_default();
        Self {
            total: resp.total.unwrap_or(0),
            items,
        }
    }
}

impl BackendClient {
    /// Fetch one page of an ontology listing filtered by a case-insensitive
    /// substring `query`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the request fails, no ontology is loaded,
    /// or the response cannot be parsed.
    pub async fn list_ontology(
        &self,
        kind: OntologyKind,
        page: u32,
        limit: u32,
        query: &str,
    ) -> Result<OntologyPage, BackendError> {
        let url = self.url(&format!(
            "/ontology/{}?page={page}&limit={limit}&q={}",
            kind.as_str(),
            urlencoding::encode(query)
        ));
        let data: ListingResponse = into_payload(send_json(self.http.get(&url)).await?)?;
        Ok(data.into())
    }

    /// Upload a Turtle file as the backend's ontology graph.
    ///
    /// Returns the backend's summary of the loaded graph.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the file cannot be read, the request fails,
    /// or the backend cannot parse the graph.
    pub async fn upload_ontology(&self, path: &Path) -> Result<serde_json::Value, BackendError> {
        let form = Form::new().part("ttl", file_part(path).await?);
        let value = send_json(self.http.post(self.url("/upload-ontology")).multipart(form)).await?;
        into_payload(value)
    }
}
