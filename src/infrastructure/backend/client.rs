// src/infrastructure/backend/client.rs
use crate::domain::{
    errors::{DomainError, DomainResult},
    pager::Pager,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

const ERROR_BODY_LIMIT: usize = 512;

/// HTTP client for the object-store backend that owns every profile and
/// space record.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    endpoint: String,
    api_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: DeserializeOwned"))]
struct SearchResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    total_hits: u64,
    #[serde(default)]
    last_key: Option<String>,
}

impl BackendClient {
    pub fn new(endpoint: &str, api_token: Option<String>, timeout: Duration) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_reqwest)?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.endpoint, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Searches records of `type_name`. The pager's total count and
    /// continuation key are refreshed from the response.
    pub async fn find_query<T: DeserializeOwned>(
        &self,
        type_name: &str,
        query: &str,
        pager: &mut Pager,
    ) -> DomainResult<Vec<T>> {
        let mut params: Vec<(&str, String)> = vec![
            ("type", type_name.to_string()),
            ("q", query.to_string()),
            ("sort", pager.sortby.clone()),
            ("desc", pager.desc.to_string()),
            ("limit", pager.limit.to_string()),
            ("page", pager.page.to_string()),
        ];
        if let Some(last_key) = &pager.last_key {
            params.push(("lastKey", last_key.clone()));
        }

        tracing::debug!(type_name, query, page = pager.page, "backend search");
        let response = self
            .authorize(self.http.get(self.url("search")).query(&params))
            .send()
            .await
            .map_err(map_reqwest)?;
        let response = ensure_success(response).await?;
        let page: SearchResponse<T> = response.json().await.map_err(map_reqwest)?;

        pager.count = page.total_hits;
        if page.last_key.is_some() {
            pager.last_key = page.last_key;
        }
        Ok(page.items)
    }

    /// Sends a JSON PATCH to `path`, e.g. `_batch` for partial batch updates.
    pub async fn invoke_patch<B>(&self, path: &str, body: &B) -> DomainResult<()>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(path, "backend patch");
        let response = self
            .authorize(self.http.patch(self.url(path)).json(body))
            .send()
            .await
            .map_err(map_reqwest)?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> DomainResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut body = response.text().await.unwrap_or_default();
    if body.len() > ERROR_BODY_LIMIT {
        let mut cut = ERROR_BODY_LIMIT;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    Err(DomainError::Persistence(format!(
        "backend responded with {status}: {body}"
    )))
}

pub fn map_reqwest(err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::Persistence("backend request timed out".into())
    } else if err.is_decode() {
        DomainError::Persistence(format!("malformed backend response: {err}"))
    } else {
        DomainError::Persistence(err.to_string())
    }
}
