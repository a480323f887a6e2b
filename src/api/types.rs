use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Media catalog entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
    Music,
    Collection,
}

/// Moderation state of an uploaded item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    Pending,
    Approved,
    Rejected,
}

/// A creator or consumer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Registration payload for the signup endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Partial profile update for `PUT /api/users/me`.
///
/// Unset fields are omitted from the request so the backend leaves them
/// untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

/// Signup response: the created user plus a backend session token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub access_token: String,
    pub token_type: String,
}

/// Login-exchange response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

/// A catalog media item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub media_id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub downloads: i64,
    pub status: MediaStatus,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Media {
    /// Returns true when the item has passed moderation and is publicly
    /// visible in the catalog.
    pub fn is_approved(&self) -> bool {
        self.status == MediaStatus::Approved
    }
}

/// Payload for registering a media item once its file is uploaded.
#[derive(Debug, Clone, Serialize)]
pub struct MediaCreate {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub is_premium: bool,
    pub tags: Vec<String>,
}

/// A curated collection of media items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub collection_id: String,
    pub title: String,
    #[serde(default)]
    pub item_count: i64,
    #[serde(default)]
    pub media_ids: Vec<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionCreate {
    pub title: String,
    pub media_ids: Vec<String>,
}

/// An engagement record for a creator or media item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analytics {
    pub analytics_id: String,
    pub user_id: String,
    #[serde(default)]
    pub media_id: Option<String>,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub downloads: i64,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub engagement_rate: Option<f64>,
    #[serde(default)]
    pub approval_rate: Option<f64>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Payload for recording engagement counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyticsCreate {
    pub views: i64,
    pub downloads: i64,
    pub likes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
}

/// Response from the media upload endpoint: the stored file URL and, for
/// video and music, a server-generated thumbnail.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResult {
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// One row of the creator leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub creator_id: String,
    pub count: i64,
    pub creator_name: String,
}
