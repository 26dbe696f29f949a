use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::Query;
use crate::common::BackendError;
use crate::config::BackendConfig;

/// Async client for the hosted table and auth APIs.
///
/// Every request carries the public `apikey` header. The `Authorization`
/// bearer is the signed-in access token when one is given, otherwise the
/// public key itself.
#[derive(Debug, Clone)]
pub struct Backend {
    http: reqwest::Client,
    rest_url: Url,
    auth_url: Url,
    anon_key: String,
}

impl Backend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Self::with_client(http, &config.url, &config.anon_key)
    }

    /// Wrap an existing `reqwest::Client` (timeouts and TLS are the caller's).
    pub fn with_client(http: reqwest::Client, base_url: &Url, anon_key: &str) -> Result<Self, BackendError> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http,
            rest_url: base.join("rest/v1/")?,
            auth_url: base.join("auth/v1/")?,
            anon_key: anon_key.to_string(),
        })
    }

    pub(crate) fn auth_endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.auth_url.join(path)?)
    }

    fn table_url(&self, table: &str) -> Result<Url, BackendError> {
        Ok(self.rest_url.join(table)?)
    }

    /// Start a request with the `apikey` header and bearer token set.
    pub(crate) fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token.unwrap_or(&self.anon_key))
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        query: &Query,
        token: Option<&str>,
    ) -> Result<Vec<T>, BackendError> {
        let url = self.table_url(query.table_name())?;
        let params = query.params();
        log::debug!("GET {url} params={params:?}");

        let resp = self
            .request(Method::GET, url, token)
            .query(&params)
            .send()
            .await?;

        handle_response(resp).await
    }

    pub async fn insert<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        rows: &[B],
        token: Option<&str>,
    ) -> Result<Vec<T>, BackendError> {
        let url = self.table_url(table)?;
        log::debug!("POST {url} rows={}", rows.len());

        let resp = self
            .request(Method::POST, url, token)
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;

        handle_response(resp).await
    }

    /// PATCH every row matching `filter`. Returns the updated rows.
    pub async fn update<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        filter: &Query,
        body: &B,
        token: Option<&str>,
    ) -> Result<Vec<T>, BackendError> {
        if !filter.has_filters() {
            return Err(BackendError::Unfiltered("update"));
        }

        let url = self.table_url(filter.table_name())?;
        let params = filter.params();
        log::debug!("PATCH {url} params={params:?}");

        let resp = self
            .request(Method::PATCH, url, token)
            .query(&params)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        handle_response(resp).await
    }

    pub async fn delete(&self, filter: &Query, token: Option<&str>) -> Result<(), BackendError> {
        if !filter.has_filters() {
            return Err(BackendError::Unfiltered("delete"));
        }

        let url = self.table_url(filter.table_name())?;
        let params = filter.params();
        log::debug!("DELETE {url} params={params:?}");

        let resp = self
            .request(Method::DELETE, url, token)
            .query(&params)
            .send()
            .await?;

        handle_empty(resp).await
    }
}

pub(crate) async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, BackendError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))
}

pub(crate) async fn handle_empty(resp: reqwest::Response) -> Result<(), BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }

    let body = resp.text().await.unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

/// Both the table API (`message`/`code`) and the auth API
/// (`error_description`/`msg`/`error`) error shapes are accepted.
fn api_error(status: u16, body: &str) -> BackendError {
    let parsed: serde_json::Value = serde_json::from_str(body).unwrap_or(serde_json::Value::Null);

    let text = |key: &str| parsed.get(key).and_then(|v| v.as_str()).map(str::to_string);

    let message = text("message")
        .or_else(|| text("error_description"))
        .or_else(|| text("msg"))
        .or_else(|| text("error"))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            }
        });

    let code = match parsed.get("code").or_else(|| parsed.get("error_code")) {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    BackendError::Api {
        status,
        message,
        code,
    }
}
