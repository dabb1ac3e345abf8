//! Trust connection factory and topology builders
//!
//! Edges are directed and always created `pending`. Single-edge `create`
//! leaves settlement to the caller; the star and chain builders drive
//! every edge through create-then-accept before starting the next, so a
//! failure midway leaves the edges built so far tracked for cleanup.

use tracing::{debug, warn};
use vox_common::{NewTrustConnection, TrustConnection};

use crate::client::{error_body, ApiClient};
use crate::error::{HarnessError, HarnessResult};
use crate::factory::{CleanupReport, Tracker};

/// Trust level assigned when no override is given
const DEFAULT_TRUST_LEVEL: u8 = 70;
/// Trust level for star-network edges when no override is given
const NETWORK_TRUST_LEVEL: u8 = 75;

/// Overrides for a trust connection
#[derive(Debug, Clone, Default)]
pub struct TrustConnectionOptions {
    pub trust_level: Option<u8>,
    pub note: Option<String>,
}

impl TrustConnectionOptions {
    pub fn with_trust_level(mut self, level: u8) -> Self {
        self.trust_level = Some(level);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Factory for directed trust edges between users
#[derive(Clone)]
pub struct TrustConnectionFactory {
    client: ApiClient,
    tracker: Tracker,
}

impl TrustConnectionFactory {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self {
            client,
            tracker: Tracker::default(),
        }
    }

    /// Create a pending trust edge from one user to another
    pub async fn create(
        &self,
        from_user_id: &str,
        to_user_id: &str,
        options: TrustConnectionOptions,
    ) -> HarnessResult<TrustConnection> {
        let payload = NewTrustConnection {
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
            trust_level: options.trust_level.unwrap_or(DEFAULT_TRUST_LEVEL),
            note: options.note.unwrap_or_default(),
        };

        let resp = self.client.post("/trust-connections", &payload).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HarnessError::Creation {
                kind: "trust connection".to_string(),
                status,
                body: error_body(resp).await,
            });
        }
        let connection: TrustConnection = resp.json().await?;

        self.tracker.track(&connection.id);
        debug!(
            "created trust connection {} -> {} ({})",
            connection.from_user_id, connection.to_user_id, connection.id
        );

        Ok(connection)
    }

    /// Create an edge and immediately accept it
    pub async fn create_accepted(
        &self,
        from_user_id: &str,
        to_user_id: &str,
        options: TrustConnectionOptions,
    ) -> HarnessResult<TrustConnection> {
        let connection = self.create(from_user_id, to_user_id, options).await?;
        self.accept(&connection.id).await
    }

    /// Accept a pending edge
    pub async fn accept(&self, id: &str) -> HarnessResult<TrustConnection> {
        self.transition(id, "accept").await
    }

    /// Reject a pending edge
    pub async fn reject(&self, id: &str) -> HarnessResult<TrustConnection> {
        self.transition(id, "reject").await
    }

    async fn transition(&self, id: &str, action: &str) -> HarnessResult<TrustConnection> {
        let resp = self
            .client
            .patch_empty(&format!("/trust-connections/{}/{}", id, action))
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HarnessError::Transition {
                action: action.to_string(),
                id: id.to_string(),
                status,
                body: error_body(resp).await,
            });
        }
        let connection: TrustConnection = resp.json().await?;

        debug!("trust connection {} -> {}", id, connection.status);

        Ok(connection)
    }

    /// Create a star of accepted edges from a hub user to each member.
    ///
    /// Edges default to trust level 75 rather than the single-edge default.
    /// Each edge is created and accepted before the next one starts, so
    /// the returned list follows member order.
    pub async fn create_network(
        &self,
        hub_id: &str,
        member_ids: &[String],
        options: TrustConnectionOptions,
    ) -> HarnessResult<Vec<TrustConnection>> {
        let trust_level = options.trust_level.unwrap_or(NETWORK_TRUST_LEVEL);
        let mut connections = Vec::with_capacity(member_ids.len());
        for member_id in member_ids {
            let edge_options = TrustConnectionOptions {
                trust_level: Some(trust_level),
                note: options.note.clone(),
            };
            let edge = self.create(hub_id, member_id, edge_options).await?;
            connections.push(self.accept(&edge.id).await?);
        }
        Ok(connections)
    }

    /// Create a chain of accepted edges along consecutive pairs.
    ///
    /// Fewer than two users yields no edges and no error.
    pub async fn create_chain(
        &self,
        user_ids: &[String],
        options: TrustConnectionOptions,
    ) -> HarnessResult<Vec<TrustConnection>> {
        let mut connections = Vec::with_capacity(user_ids.len().saturating_sub(1));
        for pair in user_ids.windows(2) {
            let edge = self.create(&pair[0], &pair[1], options.clone()).await?;
            connections.push(self.accept(&edge.id).await?);
        }
        Ok(connections)
    }

    /// Fetch an edge by id; `None` when the backend answers 404
    pub async fn get(&self, id: &str) -> HarnessResult<Option<TrustConnection>> {
        let resp = self
            .client
            .get(&format!("/trust-connections/{}", id))
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(resp.error_for_status()?.json().await?))
    }

    /// Delete an edge and release it from tracking
    pub async fn delete(&self, id: &str) -> HarnessResult<()> {
        self.delete_request(id).await?;
        self.tracker.untrack(id);
        debug!("deleted trust connection {}", id);
        Ok(())
    }

    async fn delete_request(&self, id: &str) -> HarnessResult<()> {
        let resp = self
            .client
            .delete(&format!("/trust-connections/{}", id))
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HarnessError::Deletion {
                kind: "trust connection".to_string(),
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

    /// Delete every tracked edge, concurrently, warning instead of failing
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
