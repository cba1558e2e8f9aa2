//! GraphQL client for the managed tea API.
//!
//! Speaks the AppSync-style protocol: every operation is an HTTP POST of
//! `{query, variables}` to a single endpoint, authenticated with an
//! `x-api-key` header. Responses arrive in the usual `{data, errors}`
//! envelope; a non-2xx status or any entry in `errors` maps to
//! [`Error::Remote`].
//!
//! There is deliberately no retry here: failed mutations are logged and
//! swallowed by the sync controller, and the next full refresh reconciles.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::RemoteConfig;
use crate::error::{Error, Result};
use crate::types::{CreateTea, TeaRecord, UpdateTea};

use super::RemoteStore;

const LIST_TEAS: &str = "\
query ListTeas {
  listTeas {
    items { id name bags createdAt updatedAt }
  }
}";

const CREATE_TEA: &str = "\
mutation CreateTea($input: CreateTeaInput!) {
  createTea(input: $input) { id name bags createdAt updatedAt }
}";

const UPDATE_TEA: &str = "\
mutation UpdateTea($input: UpdateTeaInput!) {
  updateTea(input: $input) { id name bags createdAt updatedAt }
}";

const DELETE_TEA: &str = "\
mutation DeleteTea($input: DeleteTeaInput!) {
  deleteTea(input: $input) { id name bags createdAt updatedAt }
}";

/// HTTP client for the remote GraphQL tea store
pub struct GraphQlStore {
    http_client: reqwest::Client,
    endpoint: String,
}

impl GraphQlStore {
    /// Create a new store client from configuration.
    ///
    /// Returns an error if the configuration is missing required fields.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        config.validate()?;

        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| Error::Config("remote.endpoint is required".to_string()))?
            .trim_end_matches('/')
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &config.api_key {
            headers.insert(
                "x-api-key",
                HeaderValue::from_str(api_key)
                    .map_err(|e| Error::Config(format!("invalid api_key: {}", e)))?,
            );
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    /// Execute one GraphQL operation and unwrap its `data` envelope.
    async fn execute<V, T>(&self, query: &'static str, variables: V) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let request_body = GraphQlRequest { query, variables };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Remote(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::Remote(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::Remote(format!("failed to parse response: {}", e)))?;

        envelope.into_data()
    }
}

impl RemoteStore for GraphQlStore {
    async fn list(&self) -> Result<Vec<TeaRecord>> {
        let data: ListData = self.execute(LIST_TEAS, serde_json::Value::Null).await?;
        Ok(data.list_teas.items)
    }

    async fn create(&self, input: &CreateTea) -> Result<TeaRecord> {
        let data: CreateData = self.execute(CREATE_TEA, Variables { input }).await?;
        Ok(data.create_tea)
    }

    async fn update(&self, input: &UpdateTea) -> Result<TeaRecord> {
        let data: UpdateData = self.execute(UPDATE_TEA, Variables { input }).await?;
        Ok(data.update_tea)
    }

    async fn delete(&self, id: &str) -> Result<TeaRecord> {
        let data: DeleteData = self
            .execute(DELETE_TEA, Variables { input: DeleteTea { id } })
            .await?;
        Ok(data.delete_tea)
    }
}

/// Request body for every operation: `{query, variables}`
#[derive(Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

/// `{"input": ...}` variables wrapper used by all three mutations
#[derive(Serialize)]
struct Variables<T: Serialize> {
    input: T,
}

/// Input payload for `deleteTea`: the id alone
#[derive(Serialize)]
struct DeleteTea<'a> {
    id: &'a str,
}

/// Standard GraphQL response envelope
#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    /// Surface `errors` if present, otherwise yield `data`.
    fn into_data(self) -> Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(Error::Remote(format!(
                "GraphQL errors: {}",
                messages.join("; ")
            )));
        }
        self.data
            .ok_or_else(|| Error::Remote("response carried no data".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ListData {
    #[serde(rename = "listTeas")]
    list_teas: ItemsPage,
}

#[derive(Debug, Deserialize)]
struct ItemsPage {
    items: Vec<TeaRecord>,
}

#[derive(Deserialize)]
struct CreateData {
    #[serde(rename = "createTea")]
    create_tea: TeaRecord,
}

#[derive(Deserialize)]
struct UpdateData {
    #[serde(rename = "updateTea")]
    update_tea: TeaRecord,
}

#[derive(Deserialize)]
struct DeleteData {
    #[serde(rename = "deleteTea")]
    delete_tea: TeaRecord,
}
