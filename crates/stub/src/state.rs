//! In-memory state for the stub backend

use crate::error::{ApiError, ApiResult};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use vox_common::{
    Campaign, CampaignStatus, ConnectionStatus, Credentials, NewCampaign, NewTrustConnection,
    NewUser, Session, TrustConnection, User,
};

/// State manager for all stub resources
#[derive(Clone, Default)]
pub struct PlatformState {
    inner: Arc<Inner>,
}

/// Maps are locked one at a time: a method clones what it needs out of
/// one guard before acquiring the next, so no two guards overlap.
#[derive(Default)]
struct Inner {
    users: RwLock<HashMap<String, UserRecord>>,
    campaigns: RwLock<HashMap<String, Campaign>>,
    connections: RwLock<HashMap<String, TrustConnection>>,
    /// Session token -> user id
    sessions: RwLock<HashMap<String, String>>,
}

/// A user row plus the write-only fields the API never returns
#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    password: String,
}

impl PlatformState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // User operations
    // ========================================================================

    /// Create a new user
    pub fn create_user(&self, req: NewUser) -> ApiResult<User> {
        if req.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required".to_string()));
        }
        if req.password.is_empty() {
            return Err(ApiError::Validation("password is required".to_string()));
        }
        if req.email.trim().is_empty() || !req.email.contains('@') {
            return Err(ApiError::Validation(format!("invalid email: {:?}", req.email)));
        }
        if req.reputation_score > 100 {
            return Err(ApiError::Validation(format!(
                "reputation score must be 0-100, got {}",
                req.reputation_score
            )));
        }

        let mut users = self.inner.users.write();
        if users.values().any(|r| r.user.email == req.email) {
            return Err(ApiError::DuplicateEmail(req.email));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: req.email,
            name: req.name,
            role: req.role,
            reputation_score: req.reputation_score,
            verified: req.verified,
            social_accounts: req.social_accounts,
            access_token: None,
        };
        users.insert(
            user.id.clone(),
            UserRecord {
                user: user.clone(),
                password: req.password,
            },
        );

        debug!("created user {} ({})", user.email, user.id);

        Ok(user)
    }

    /// Get a user by ID
    pub fn get_user(&self, id: &str) -> Option<User> {
        self.inner.users.read().get(id).map(|r| r.user.clone())
    }

    /// List all users, ordered by id
    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self
            .inner
            .users
            .read()
            .values()
            .map(|r| r.user.clone())
            .collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    /// Delete a user and any sessions it holds
    pub fn delete_user(&self, id: &str) -> ApiResult<()> {
        // A match scrutinee would hold the users guard across the
        // sessions write; the binding drops it first
        let removed = self.inner.users.write().remove(id);
        match removed {
            Some(record) => {
                self.inner.sessions.write().retain(|_, uid| uid != id);
                debug!("deleted user {} ({})", record.user.email, id);
                Ok(())
            }
            None => Err(ApiError::NotFound {
                kind: "user".to_string(),
                id: id.to_string(),
            }),
        }
    }

    // ========================================================================
    // Auth operations
    // ========================================================================

    /// Verify credentials and mint a session token
    pub fn login(&self, creds: &Credentials) -> ApiResult<Session> {
        let user_id = {
            let users = self.inner.users.read();
            users
                .values()
                .find(|r| r.user.email == creds.email && r.password == creds.password)
                .map(|r| r.user.id.clone())
                .ok_or(ApiError::InvalidCredentials)?
        };

        let token = hex::encode(rand::random::<[u8; 32]>());
        self.inner
            .sessions
            .write()
            .insert(token.clone(), user_id.clone());

        debug!("login for {} ({})", creds.email, user_id);

        Ok(Session {
            access_token: token,
        })
    }

    /// Resolve a bearer token to the user holding it
    pub fn user_for_token(&self, token: &str) -> Option<User> {
        let user_id = self.inner.sessions.read().get(token).cloned()?;
        self.inner
            .users
            .read()
            .get(&user_id)
            .map(|r| r.user.clone())
    }

    // ========================================================================
    // Campaign operations
    // ========================================================================

    /// Create a new campaign owned by an existing brand user
    pub fn create_campaign(&self, req: NewCampaign) -> ApiResult<Campaign> {
        if req.title.trim().is_empty() {
            return Err(ApiError::Validation("title is required".to_string()));
        }
        if !req.budget.is_finite() || req.budget <= 0.0 {
            return Err(ApiError::Validation(format!(
                "budget must be positive, got {}",
                req.budget
            )));
        }
        if req.min_reputation_score > 100 {
            return Err(ApiError::Validation(format!(
                "minimum reputation score must be 0-100, got {}",
                req.min_reputation_score
            )));
        }
        if req.max_influencers == 0 {
            return Err(ApiError::Validation(
                "max influencers must be at least 1".to_string(),
            ));
        }
        if req.end_date <= req.start_date {
            return Err(ApiError::Validation(
                "end date must be after start date".to_string(),
            ));
        }
        if !self.inner.users.read().contains_key(&req.brand_id) {
            return Err(ApiError::Validation(format!(
                "unknown brand: {}",
                req.brand_id
            )));
        }

        let campaign = Campaign {
            id: Uuid::new_v4().to_string(),
            brand_id: req.brand_id,
            title: req.title,
            description: req.description,
            budget: req.budget,
            category: req.category,
            niches: req.niches,
            min_reputation_score: req.min_reputation_score,
            max_influencers: req.max_influencers,
            // New campaigns are listed on the marketplace immediately
            status: CampaignStatus::Active,
            start_date: req.start_date,
            end_date: req.end_date,
        };
        self.inner
            .campaigns
            .write()
            .insert(campaign.id.clone(), campaign.clone());

        debug!("created campaign {} ({})", campaign.title, campaign.id);

        Ok(campaign)
    }

    /// Get a campaign by ID
    pub fn get_campaign(&self, id: &str) -> Option<Campaign> {
        self.inner.campaigns.read().get(id).cloned()
    }

    /// List all campaigns, ordered by id
    pub fn list_campaigns(&self) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> =
            self.inner.campaigns.read().values().cloned().collect();
        campaigns.sort_by(|a, b| a.id.cmp(&b.id));
        campaigns
    }

    /// Set the status of an existing campaign
    pub fn update_campaign_status(
        &self,
        id: &str,
        status: CampaignStatus,
    ) -> ApiResult<Campaign> {
        let mut campaigns = self.inner.campaigns.write();
        let campaign = campaigns.get_mut(id).ok_or_else(|| ApiError::NotFound {
            kind: "campaign".to_string(),
            id: id.to_string(),
        })?;
        campaign.status = status;

        debug!("campaign {} -> {}", id, status);

        Ok(campaign.clone())
    }

    /// Delete a campaign
    pub fn delete_campaign(&self, id: &str) -> ApiResult<()> {
        match self.inner.campaigns.write().remove(id) {
            Some(campaign) => {
                debug!("deleted campaign {} ({})", campaign.title, id);
                Ok(())
            }
            None => Err(ApiError::NotFound {
                kind: "campaign".to_string(),
                id: id.to_string(),
            }),
        }
    }

    /// Active campaigns whose reputation floor the given user clears
    pub fn eligible_campaigns(&self, user_id: &str) -> ApiResult<Vec<Campaign>> {
        let reputation = self
            .inner
            .users
            .read()
            .get(user_id)
            .map(|r| r.user.reputation_score)
            .ok_or_else(|| ApiError::NotFound {
                kind: "user".to_string(),
                id: user_id.to_string(),
            })?;

        let mut eligible: Vec<Campaign> = self
            .inner
            .campaigns
            .read()
            .values()
            .filter(|c| c.status == CampaignStatus::Active && c.min_reputation_score <= reputation)
            .cloned()
            .collect();
        eligible.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(eligible)
    }

    // ========================================================================
    // Trust connection operations
    // ========================================================================

    /// Create a pending trust edge between two existing users
    pub fn create_connection(&self, req: NewTrustConnection) -> ApiResult<TrustConnection> {
        if req.from_user_id == req.to_user_id {
            return Err(ApiError::Validation(
                "a user cannot trust themselves".to_string(),
            ));
        }
        if req.trust_level == 0 || req.trust_level > 100 {
            return Err(ApiError::Validation(format!(
                "trust level must be 1-100, got {}",
                req.trust_level
            )));
        }
        {
            let users = self.inner.users.read();
            for endpoint in [&req.from_user_id, &req.to_user_id] {
                if !users.contains_key(endpoint.as_str()) {
                    return Err(ApiError::Validation(format!("unknown user: {}", endpoint)));
                }
            }
        }

        let connection = TrustConnection {
            id: Uuid::new_v4().to_string(),
            from_user_id: req.from_user_id,
            to_user_id: req.to_user_id,
            trust_level: req.trust_level,
            note: req.note,
            status: ConnectionStatus::Pending,
            created_at: Utc::now(),
        };
        self.inner
            .connections
            .write()
            .insert(connection.id.clone(), connection.clone());

        debug!(
            "created trust connection {} -> {} ({})",
            connection.from_user_id, connection.to_user_id, connection.id
        );

        Ok(connection)
    }

    /// Get a trust connection by ID
    pub fn get_connection(&self, id: &str) -> Option<TrustConnection> {
        self.inner.connections.read().get(id).cloned()
    }

    /// List all trust connections, ordered by id
    pub fn list_connections(&self) -> Vec<TrustConnection> {
        let mut connections: Vec<TrustConnection> =
            self.inner.connections.read().values().cloned().collect();
        connections.sort_by(|a, b| a.id.cmp(&b.id));
        connections
    }

    /// Accept a pending trust connection
    pub fn accept_connection(&self, id: &str) -> ApiResult<TrustConnection> {
        self.transition_connection(id, ConnectionStatus::Accepted)
    }

    /// Reject a pending trust connection
    pub fn reject_connection(&self, id: &str) -> ApiResult<TrustConnection> {
        self.transition_connection(id, ConnectionStatus::Rejected)
    }

    fn transition_connection(
        &self,
        id: &str,
        to: ConnectionStatus,
    ) -> ApiResult<TrustConnection> {
        let mut connections = self.inner.connections.write();
        let connection = connections.get_mut(id).ok_or_else(|| ApiError::NotFound {
            kind: "trust connection".to_string(),
            id: id.to_string(),
        })?;
        if connection.status != ConnectionStatus::Pending {
            return Err(ApiError::NotPending {
                kind: "trust connection".to_string(),
                id: id.to_string(),
            });
        }
        connection.status = to;

        debug!("trust connection {} -> {}", id, to);

        Ok(connection.clone())
    }

    /// Delete a trust connection
    pub fn delete_connection(&self, id: &str) -> ApiResult<()> {
        match self.inner.connections.write().remove(id) {
            Some(connection) => {
                debug!(
                    "deleted trust connection {} -> {} ({})",
                    connection.from_user_id, connection.to_user_id, id
                );
                Ok(())
            }
            None => Err(ApiError::NotFound {
                kind: "trust connection".to_string(),
                id: id.to_string(),
            }),
        }
    }
}
