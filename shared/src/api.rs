//! HTTP client for the Memora backend API.
//!
//! One method per endpoint the mobile clients call. The backend is an
//! external collaborator with a loose JSON contract; responses are parsed
//! leniently (see [`crate::models::ItemListResponse`]).

use reqwest::{Client, Response};
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::models::{
    ContentItem, DeleteItemRequest, ExtractRequest, IntentRequest, IntentResponse,
    ItemListResponse, SaveOutcome, SaveTextRequest, UserStats,
};
use crate::{Error, Result};

/// Client for the Memora backend.
pub struct MemoraClient {
    http: Client,
    base_url: String,
}

impl MemoraClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reject non-2xx responses, surfacing the body as the error message.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::NOT_FOUND {
            Err(Error::NotFound(body))
        } else {
            Err(Error::Backend(format!("{}: {}", status, body)))
        }
    }

    async fn items_from(response: Response) -> Result<Vec<ContentItem>> {
        let response = Self::check(response).await?;
        let list: ItemListResponse = response.json().await?;
        Ok(list.into_items())
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<Value> {
        let response = self.http.get(self.url("/health")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /search` — semantic search over the user's saved items.
    pub async fn search(&self, query: &str, user_id: &str) -> Result<Vec<ContentItem>> {
        info!("searching for {:?}", query);
        let response = self
            .http
            .post(self.url("/search"))
            .json(&serde_json::json!({ "query": query, "user_id": user_id }))
            .send()
            .await?;
        Self::items_from(response).await
    }

    /// `GET /items`
    pub async fn items(&self, user_id: &str) -> Result<Vec<ContentItem>> {
        let response = self
            .http
            .get(self.url("/items"))
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        Self::items_from(response).await
    }

    /// `GET /tags` — the known-tag vocabulary.
    pub async fn tags(&self, user_id: &str) -> Result<Vec<String>> {
        let response = self
            .http
            .get(self.url("/tags"))
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `GET /items/by-tag/{tag}`
    pub async fn items_by_tag(&self, tag: &str, user_id: &str) -> Result<Vec<ContentItem>> {
        let path = format!("/items/by-tag/{}", urlencoding::encode(tag));
        let response = self
            .http
            .get(self.url(&path))
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        Self::items_from(response).await
    }

    /// `POST /extract_and_save` — extract content from a URL and store it.
    pub async fn extract_and_save(&self, url: &str, user_id: &str) -> Result<SaveOutcome> {
        info!("saving url {}", url);
        let response = self
            .http
            .post(self.url("/extract_and_save"))
            .json(&ExtractRequest {
                url: url.to_string(),
                user_id: user_id.to_string(),
            })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /save-text` — store a plain-text note.
    pub async fn save_text(
        &self,
        text: &str,
        title: Option<&str>,
        user_id: &str,
    ) -> Result<SaveOutcome> {
        let response = self
            .http
            .post(self.url("/save-text"))
            .json(&SaveTextRequest {
                text: text.to_string(),
                title: title.map(str::to_string),
                user_id: user_id.to_string(),
            })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /upload-file` — multipart upload of a local file.
    pub async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        user_id: &str,
    ) -> Result<SaveOutcome> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("user_id", user_id.to_string());
        let response = self
            .http
            .post(self.url("/upload-file"))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `GET /user/{id}/items`
    pub async fn user_items(&self, user_id: &str) -> Result<Vec<ContentItem>> {
        let path = format!("/user/{}/items", urlencoding::encode(user_id));
        let response = self.http.get(self.url(&path)).send().await?;
        Self::items_from(response).await
    }

    /// `GET /user/{id}/stats`
    pub async fn user_stats(&self, user_id: &str) -> Result<UserStats> {
        let path = format!("/user/{}/stats", urlencoding::encode(user_id));
        let response = self.http.get(self.url(&path)).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /delete-item` — removes the item from the backend. Callers drop
    /// it from any lists they hold.
    pub async fn delete_item(&self, item_id: &str, user_id: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url("/delete-item"))
            .json(&DeleteItemRequest {
                item_id: item_id.to_string(),
                user_id: user_id.to_string(),
            })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// `POST /intent` — classify a free-form chat message.
    pub async fn intent(&self, message: &str, user_id: &str) -> Result<IntentResponse> {
        let response = self
            .http
            .post(self.url("/intent"))
            .json(&IntentRequest {
                message: message.to_string(),
                user_id: user_id.to_string(),
            })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
