//! Shared data models.
//!
//! One canonical contract for the content item shape. The backend variants
//! disagree on a few field spellings (`created_at` vs `timestamp`,
//! `media_type` vs `content_type`); serde aliases absorb the divergence so
//! the rest of the client only ever sees one shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of saved content, as reported by the backend.
///
/// Unknown strings map to `Default` rather than failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    Article,
    Video,
    Audio,
    SocialMedia,
    Image,
    Web,
    Pdf,
    Text,
    Document,
    #[default]
    Default,
}

impl ContentType {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "article" => ContentType::Article,
            "video" => ContentType::Video,
            "audio" => ContentType::Audio,
            "social_media" => ContentType::SocialMedia,
            "image" => ContentType::Image,
            "web" => ContentType::Web,
            "pdf" => ContentType::Pdf,
            "text" => ContentType::Text,
            "document" => ContentType::Document,
            _ => ContentType::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Video => "video",
            ContentType::Audio => "audio",
            ContentType::SocialMedia => "social_media",
            ContentType::Image => "image",
            ContentType::Web => "web",
            ContentType::Pdf => "pdf",
            ContentType::Text => "text",
            ContentType::Document => "document",
            ContentType::Default => "default",
        }
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ContentType::parse(&s))
    }
}

/// One saved piece of content. Owned by the backend; the client holds
/// transient read-only copies fetched per screen or query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    /// Absent for pure-text items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "media_type")]
    pub content_type: ContentType,
    /// Source platform when the backend recognized one (youtube, twitter, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: String,
    /// Present only on search results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

/// Usage statistics from `GET /user/{id}/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub total_tags: i64,
    #[serde(default)]
    pub items_this_week: i64,
}

/// Standard API response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Item lists arrive either as a bare array or wrapped in `{"results": [...]}`
/// depending on the endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemListResponse {
    Items(Vec<ContentItem>),
    Wrapped { results: Vec<ContentItem> },
}

impl ItemListResponse {
    pub fn into_items(self) -> Vec<ContentItem> {
        match self {
            ItemListResponse::Items(items) => items,
            ItemListResponse::Wrapped { results } => results,
        }
    }
}

/// Save-by-URL request payload (`POST /extract_and_save`).
#[derive(Debug, Serialize)]
pub struct ExtractRequest {
    pub url: String,
    pub user_id: String,
}

/// Save-text request payload (`POST /save-text`).
#[derive(Debug, Serialize)]
pub struct SaveTextRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub user_id: String,
}

/// Outcome of a save operation, in the backend's loose shape.
#[derive(Debug, Default, Deserialize)]
pub struct SaveOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub item: Option<ContentItem>,
}

/// Delete request payload (`POST /delete-item`).
#[derive(Debug, Serialize)]
pub struct DeleteItemRequest {
    pub item_id: String,
    pub user_id: String,
}

/// Intent classification request (`POST /intent`).
#[derive(Debug, Serialize)]
pub struct IntentRequest {
    pub message: String,
    pub user_id: String,
}

/// Intent classification response.
#[derive(Debug, Deserialize)]
pub struct IntentResponse {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}
