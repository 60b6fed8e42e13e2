//! `TemplateStore` over the server's REST surface.
//!
//! Lets the dashboard and the editor shell run against a remote server
//! exactly as they run against a local store. Requests carry the
//! administrator token as a bearer header when one is configured.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures and unexpected statuses become `ReadFailed` for reads
//! and `WriteFailed` for writes. 404 on an addressed template maps to
//! `NotFound`; 401/403 map to `PermissionDenied`. The server's `{code,
//! message}` body, when present, supplies the message.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use scene::doc::SceneDocument;
use scene::store::{StoreError, Template, TemplateId, TemplateStore, TemplateSummary};
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct SaveRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    pub title: &'a str,
    pub data: &'a SceneDocument,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SaveResponse {
    pub id: TemplateId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Whether a failed request was reading or writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
}

pub(crate) fn templates_endpoint(base_url: &str) -> String {
    format!("{}/templates", base_url.trim_end_matches('/'))
}

pub(crate) fn template_endpoint(base_url: &str, id: TemplateId) -> String {
    format!("{}/{id}", templates_endpoint(base_url))
}

/// Map a non-success status to the store taxonomy.
///
/// `id` is the addressed template for `get` and `delete`; it is `None` for
/// list and save calls, where a 404 is not a missing template.
pub(crate) fn status_to_store_error(
    status: StatusCode,
    id: Option<TemplateId>,
    access: Access,
    body: Option<ErrorBody>,
) -> StoreError {
    let message = body.map_or_else(|| format!("HTTP {}", status.as_u16()), |b| format!("{}: {}", b.code, b.message));
    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => StoreError::NotFound(id),
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => StoreError::PermissionDenied,
        _ => match access {
            Access::Read => StoreError::ReadFailed(message),
            Access::Write => StoreError::WriteFailed(message),
        },
    }
}

fn transport_error(access: Access, err: &reqwest::Error) -> StoreError {
    match access {
        Access::Read => StoreError::ReadFailed(err.to_string()),
        Access::Write => StoreError::WriteFailed(err.to_string()),
    }
}

fn into_summary(template: Template) -> Result<TemplateSummary, StoreError> {
    match (template.id, template.created_at) {
        (Some(id), Some(created_at)) => Ok(TemplateSummary { id, title: template.title, created_at }),
        _ => Err(StoreError::ReadFailed("listing row without id or date".into())),
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpTemplateStore {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTemplateStore {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into(), token }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, url, "template api request");
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        id: Option<TemplateId>,
        access: Access,
    ) -> Result<Response, StoreError> {
        let response = request.send().await.map_err(|e| transport_error(access, &e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.json::<ErrorBody>().await.ok();
        Err(status_to_store_error(status, id, access, body))
    }

    async fn save(&self, id: Option<TemplateId>, title: &str, data: &SceneDocument) -> Result<TemplateId, StoreError> {
        let body = SaveRequest { id, title, data };
        let request = self.request(Method::POST, &templates_endpoint(&self.base_url)).json(&body);
        let response = self.send(request, None, Access::Write).await?;
        let saved: SaveResponse = response.json().await.map_err(|e| transport_error(Access::Write, &e))?;
        Ok(saved.id)
    }
}

#[async_trait::async_trait]
impl TemplateStore for HttpTemplateStore {
    async fn list(&self) -> Result<Vec<TemplateSummary>, StoreError> {
        self.list_with_data().await?.into_iter().map(into_summary).collect()
    }

    async fn list_with_data(&self) -> Result<Vec<Template>, StoreError> {
        let request = self.request(Method::GET, &templates_endpoint(&self.base_url));
        let response = self.send(request, None, Access::Read).await?;
        response.json().await.map_err(|e| transport_error(Access::Read, &e))
    }

    async fn get(&self, id: TemplateId) -> Result<Template, StoreError> {
        let request = self.request(Method::GET, &template_endpoint(&self.base_url, id));
        let response = self.send(request, Some(id), Access::Read).await?;
        response.json().await.map_err(|e| transport_error(Access::Read, &e))
    }

    async fn create(&self, title: &str, data: &SceneDocument) -> Result<TemplateId, StoreError> {
        self.save(None, title, data).await
    }

    async fn update(&self, id: TemplateId, title: &str, data: &SceneDocument) -> Result<(), StoreError> {
        let saved = self.save(Some(id), title, data).await?;
        if saved != id {
            return Err(StoreError::WriteFailed(format!("server saved {saved} instead of {id}")));
        }
        Ok(())
    }

    async fn delete(&self, id: TemplateId) -> Result<(), StoreError> {
        let request = self.request(Method::DELETE, &template_endpoint(&self.base_url, id));
        self.send(request, Some(id), Access::Write).await?;
        Ok(())
    }
}
