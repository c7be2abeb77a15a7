use super::builtin::builtin_types;
use super::descriptor::NodeTypeDescriptor;
use crate::error::RegistryError;
use futures::future::BoxFuture;
use reqwest::Client;

/// Where a registry fetches its node types from.
pub trait NodeTypeSource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Fetches the ordered list of node types.
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<NodeTypeDescriptor>, RegistryError>>;
}

/// Serves the compiled-in node types.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSource;

impl NodeTypeSource for BuiltinSource {
    fn name(&self) -> &str {
        "builtin"
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<NodeTypeDescriptor>, RegistryError>> {
        Box::pin(async { Ok(builtin_types()) })
    }
}

/// Fetches node types with a `GET` returning `[{id, name, description?}]`.
pub struct HttpNodeTypeSource {
    http: Client,
    url: String,
}

impl HttpNodeTypeSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

impl NodeTypeSource for HttpNodeTypeSource {
    fn name(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<NodeTypeDescriptor>, RegistryError>> {
        Box::pin(async move {
            let unreachable = |message: String| RegistryError::Unreachable {
                source_name: self.url.clone(),
                message,
            };

            let response = self
                .http
                .get(&self.url)
                .send()
                .await
                .map_err(|e| unreachable(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(unreachable(format!("status {}", status.as_u16())));
            }

            let body = response
                .text()
                .await
                .map_err(|e| unreachable(e.to_string()))?;
            serde_json::from_str(&body).map_err(|e| RegistryError::Malformed {
                source_name: self.url.clone(),
                message: e.to_string(),
            })
        })
    }
}
