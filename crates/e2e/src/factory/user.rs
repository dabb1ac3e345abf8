//! User factory
//!
//! Creating a user is a two-step exchange: `POST /users`, then
//! `POST /auth/login` to obtain the session token callers need for
//! authenticated flows. The id is tracked between the two steps, so an
//! account whose login fails is still deleted at cleanup.

use tracing::{debug, warn};
use vox_common::{Credentials, NewUser, Session, SocialAccounts, User, UserRole};

use crate::client::{error_body, ApiClient};
use crate::error::{HarnessError, HarnessResult};
use crate::factory::{CleanupReport, Tracker};
use crate::generate::DataGen;

/// Reputation score assigned when no override is given
const DEFAULT_REPUTATION_SCORE: u8 = 50;

/// Overrides for a generated user; unset fields are generated or defaulted
#[derive(Debug, Clone, Default)]
pub struct UserOptions {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub reputation_score: Option<u8>,
    pub verified: Option<bool>,
    pub social_accounts: Option<SocialAccounts>,
}

impl UserOptions {
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_reputation(mut self, score: u8) -> Self {
        self.reputation_score = Some(score);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }
}

/// Factory for platform users
#[derive(Clone)]
pub struct UserFactory {
    client: ApiClient,
    gen: DataGen,
    tracker: Tracker,
}

impl UserFactory {
    pub(crate) fn new(client: ApiClient, gen: DataGen) -> Self {
        Self {
            client,
            gen,
            tracker: Tracker::default(),
        }
    }

    /// Create a user and log them in.
    ///
    /// On success the returned [`User`] carries the session token in
    /// `access_token`. The account is tracked for cleanup as soon as the
    /// backend confirms creation, before the login attempt.
    pub async fn create(&self, options: UserOptions) -> HarnessResult<User> {
        let payload = NewUser {
            email: options.email.unwrap_or_else(|| self.gen.email()),
            name: options.name.unwrap_or_else(|| self.gen.full_name()),
            password: options.password.unwrap_or_else(|| self.gen.password()),
            role: options.role.unwrap_or_default(),
            reputation_score: options
                .reputation_score
                .unwrap_or(DEFAULT_REPUTATION_SCORE),
            verified: options.verified.unwrap_or(false),
            social_accounts: options.social_accounts.unwrap_or_default(),
        };
        let password = payload.password.clone();

        let resp = self.client.post("/users", &payload).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HarnessError::Creation {
                kind: "user".to_string(),
                status,
                body: error_body(resp).await,
            });
        }
        let mut user: User = resp.json().await?;

        self.tracker.track(&user.id);
        debug!("created user {} ({})", user.email, user.id);

        let creds = Credentials {
            email: user.email.clone(),
            password,
        };
        let resp = self.client.post("/auth/login", &creds).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HarnessError::Login {
                user_id: user.id,
                status,
                body: error_body(resp).await,
            });
        }
        let session: Session = resp.json().await?;
        user.access_token = Some(session.access_token);

        Ok(user)
    }

    /// Create a brand user
    pub async fn create_brand(&self) -> HarnessResult<User> {
        self.create(UserOptions::default().with_role(UserRole::Brand))
            .await
    }

    /// Create an influencer user
    pub async fn create_influencer(&self) -> HarnessResult<User> {
        self.create(UserOptions::default().with_role(UserRole::Influencer))
            .await
    }

    /// Create a follower user
    pub async fn create_follower(&self) -> HarnessResult<User> {
        self.create(UserOptions::default().with_role(UserRole::Follower))
            .await
    }

    /// Create `count` users sharing the same options.
    ///
    /// Creation is sequential; on the first failure the error propagates
    /// and the users already created stay tracked.
    pub async fn create_many(
        &self,
        count: usize,
        options: UserOptions,
    ) -> HarnessResult<Vec<User>> {
        let mut users = Vec::with_capacity(count);
        for _ in 0..count {
            users.push(self.create(options.clone()).await?);
        }
        Ok(users)
    }

    /// Fetch a user by id; `None` when the backend answers 404
    pub async fn get(&self, id: &str) -> HarnessResult<Option<User>> {
        let resp = self.client.get(&format!("/users/{}", id)).await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(resp.error_for_status()?.json().await?))
    }

    /// Resolve a session token to the user it belongs to; `None` when the
    /// backend does not recognize it
    pub async fn me(&self, token: &str) -> HarnessResult<Option<User>> {
        let resp = self.client.get_with_bearer("/auth/me", token).await?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        Ok(Some(resp.error_for_status()?.json().await?))
    }

    /// Delete a user and release it from tracking
    pub async fn delete(&self, id: &str) -> HarnessResult<()> {
        self.delete_request(id).await?;
        self.tracker.untrack(id);
        debug!("deleted user {}", id);
        Ok(())
    }

    async fn delete_request(&self, id: &str) -> HarnessResult<()> {
        let resp = self.client.delete(&format!("/users/{}", id)).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HarnessError::Deletion {
                kind: "user".to_string(),
                id: id.to_string(),
                status,
                body: error_body(resp).await,
            });
        }
        Ok(())
    }

    /// Ids currently tracked for cleanup
    pub fn tracked(&self) -> Vec<String> {
        self.tracker.snapshot()
    }

    /// Delete every tracked user, concurrently, warning instead of failing.
    ///
    /// Ids leave the tracker only as their deletes settle; a cleanup
    /// future dropped mid-flight keeps them tracked for a later pass.
    pub async fn cleanup(&self) -> CleanupReport {
        let ids = self.tracker.snapshot();
        let results =
            futures::future::join_all(ids.iter().map(|id| self.delete_request(id))).await;

        let mut report = CleanupReport::default();
        for (id, result) in ids.iter().zip(results) {
            self.tracker.untrack(id);
            match result {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    warn!("cleanup: {}", e);
                    report.failed += 1;
                }
            }
        }
        report
    }
}

