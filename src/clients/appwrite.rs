//! Minimal REST client for a hosted Appwrite databases collection.
//!
//! Only the three calls the search counters need are covered: list with
//! queries, create with permissions, and partial update by document id.

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::AppwriteConfig;

#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("Appwrite request failed: {0}")]
    Network(String),

    #[error("Appwrite returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse Appwrite response: {0}")]
    Parse(String),
}

/// A single list query, encoded the way the Appwrite REST API expects.
#[derive(Debug, Clone, PartialEq)]
pub enum DocQuery {
    Equal(String, serde_json::Value),
    OrderAsc(String),
    OrderDesc(String),
    Limit(u32),
}

impl DocQuery {
    pub fn equal(attribute: &str, value: impl Into<serde_json::Value>) -> Self {
        Self::Equal(attribute.to_string(), value.into())
    }

    #[must_use]
    pub fn order_asc(attribute: &str) -> Self {
        Self::OrderAsc(attribute.to_string())
    }

    #[must_use]
    pub fn order_desc(attribute: &str) -> Self {
        Self::OrderDesc(attribute.to_string())
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        let value = match self {
            Self::Equal(attribute, value) => json!({
                "method": "equal",
                "attribute": attribute,
                "values": [value],
            }),
            Self::OrderAsc(attribute) => json!({
                "method": "orderAsc",
                "attribute": attribute,
            }),
            Self::OrderDesc(attribute) => json!({
                "method": "orderDesc",
                "attribute": attribute,
            }),
            Self::Limit(limit) => json!({
                "method": "limit",
                "values": [limit],
            }),
        };
        value.to_string()
    }
}

pub const ROLE_ANY: &str = "any";

#[must_use]
pub fn read_permission(role: &str) -> String {
    format!("read(\"{role}\")")
}

#[must_use]
pub fn write_permission(role: &str) -> String {
    format!("write(\"{role}\")")
}

#[derive(Debug, Deserialize)]
pub struct DocumentList<T> {
    #[serde(default)]
    pub total: u64,
    pub documents: Vec<T>,
}

#[derive(Serialize)]
struct CreateDocumentRequest<'a, D: Serialize> {
    #[serde(rename = "documentId")]
    document_id: &'a str,
    data: &'a D,
    permissions: &'a [String],
}

#[derive(Serialize)]
struct UpdateDocumentRequest<'a, D: Serialize> {
    data: &'a D,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct AppwriteClient {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: Option<String>,
}

impl AppwriteClient {
    #[must_use]
    pub fn new(endpoint: &str, project_id: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("reelfinder/0.1")
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppwriteConfig) -> Self {
        Self::new(
            &config.endpoint,
            &config.project_id,
            config.api_key.as_deref(),
        )
    }

    fn documents_url(&self, database_id: &str, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint,
            urlencoding::encode(database_id),
            urlencoding::encode(collection_id)
        )
    }

    #[must_use]
    pub fn list_url(&self, database_id: &str, collection_id: &str, queries: &[DocQuery]) -> String {
        let base = self.documents_url(database_id, collection_id);
        if queries.is_empty() {
            return base;
        }

        let params: Vec<String> = queries
            .iter()
            .map(|q| format!("queries%5B%5D={}", urlencoding::encode(&q.to_query_string())))
            .collect();
        format!("{}?{}", base, params.join("&"))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        match &self.api_key {
            Some(key) => builder.header("X-Appwrite-Key", key),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppwriteError> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppwriteError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppwriteError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            return Err(AppwriteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| AppwriteError::Parse(e.to_string()))
    }

    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[DocQuery],
    ) -> Result<DocumentList<T>, AppwriteError> {
        let url = self.list_url(database_id, collection_id, queries);
        debug!(url = %url, "Listing Appwrite documents");
        self.send(self.request(Method::GET, &url)).await
    }

    pub async fn create_document<D: Serialize, T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &D,
        permissions: &[String],
    ) -> Result<T, AppwriteError> {
        let url = self.documents_url(database_id, collection_id);
        let body = CreateDocumentRequest {
            document_id,
            data,
            permissions,
        };
        self.send(self.request(Method::POST, &url).json(&body)).await
    }

    /// Partial update: only the fields present in `data` change.
    pub async fn update_document<D: Serialize, T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> Result<T, AppwriteError> {
        let url = format!(
            "{}/{}",
            self.documents_url(database_id, collection_id),
            urlencoding::encode(document_id)
        );
        let body = UpdateDocumentRequest { data };
        self.send(self.request(Method::PATCH, &url).json(&body)).await
    }
}
