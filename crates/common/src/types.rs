//! Core entity types for the vox platform API.
//!
//! The backend speaks camelCase JSON, so every wire type carries a
//! `rename_all = "camelCase"` attribute. Identifiers are opaque strings
//! assigned by the backend on creation; the harness never invents one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role a user acts under on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Brand,
    Influencer,
    Follower,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Follower
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Brand => write!(f, "brand"),
            UserRole::Influencer => write!(f, "influencer"),
            UserRole::Follower => write!(f, "follower"),
        }
    }
}

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl Default for CampaignStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Active => write!(f, "active"),
            CampaignStatus::Completed => write!(f, "completed"),
            CampaignStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Trust connection lifecycle status.
///
/// `pending` is the only state a connection can be created in; which
/// transitions out of it are legal is the backend's call, not ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Pending => write!(f, "pending"),
            ConnectionStatus::Accepted => write!(f, "accepted"),
            ConnectionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Linked social-account handles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
}

impl SocialAccounts {
    pub fn is_empty(&self) -> bool {
        self.instagram.is_none() && self.twitter.is_none() && self.tiktok.is_none()
    }
}

/// A platform user as the backend returns it.
///
/// `access_token` is never part of a backend response; the harness fills
/// it in after the post-create login step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub reputation_score: u8,
    pub verified: bool,
    #[serde(default)]
    pub social_accounts: SocialAccounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// A marketplace campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub brand_id: String,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub category: String,
    #[serde(default)]
    pub niches: Vec<String>,
    pub min_reputation_score: u8,
    pub max_influencers: u32,
    pub status: CampaignStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A directed trust edge between two users
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustConnection {
    pub id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub trust_level: u8,
    #[serde(default)]
    pub note: String,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Request payloads
// ============================================================================

/// Body of `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
    pub reputation_score: u8,
    pub verified: bool,
    #[serde(default)]
    pub social_accounts: SocialAccounts,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
}

/// Body of `POST /campaigns`.
///
/// Carries no `status` or `id`: both are backend-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub brand_id: String,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub category: String,
    pub niches: Vec<String>,
    pub min_reputation_score: u8,
    pub max_influencers: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Body of `PATCH /campaigns/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignUpdate {
    pub status: CampaignStatus,
}

/// Body of `POST /trust-connections`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrustConnection {
    pub from_user_id: String,
    pub to_user_id: String,
    pub trust_level: u8,
    #[serde(default)]
    pub note: String,
}
