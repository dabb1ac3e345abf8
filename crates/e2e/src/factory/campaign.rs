//! Campaign factory

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};
use vox_common::{Campaign, CampaignStatus, CampaignUpdate, NewCampaign};

use crate::client::{error_body, ApiClient};
use crate::error::{HarnessError, HarnessResult};
use crate::factory::{CleanupReport, Tracker};
use crate::generate::DataGen;

const DEFAULT_MIN_REPUTATION_SCORE: u8 = 50;
const DEFAULT_MAX_INFLUENCERS: u32 = 10;
/// Length of the default campaign window, starting now
const DEFAULT_CAMPAIGN_DAYS: i64 = 30;

/// Overrides for a generated campaign; unset fields are generated or defaulted
#[derive(Debug, Clone, Default)]
pub struct CampaignOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub category: Option<String>,
    pub niches: Option<Vec<String>>,
    pub min_reputation_score: Option<u8>,
    pub max_influencers: Option<u32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl CampaignOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_min_reputation(mut self, score: u8) -> Self {
        self.min_reputation_score = Some(score);
        self
    }
}

/// Factory for marketplace campaigns
#[derive(Clone)]
pub struct CampaignFactory {
    client: ApiClient,
    gen: DataGen,
    tracker: Tracker,
}

impl CampaignFactory {
    pub(crate) fn new(client: ApiClient, gen: DataGen) -> Self {
        Self {
            client,
            gen,
            tracker: Tracker::default(),
        }
    }

    /// Create a campaign owned by the given brand user.
    ///
    /// The default window runs from now for thirty days; the backend
    /// assigns the id and the initial status.
    pub async fn create(
        &self,
        brand_id: &str,
        options: CampaignOptions,
    ) -> HarnessResult<Campaign> {
        let now = Utc::now();
        let payload = NewCampaign {
            brand_id: brand_id.to_string(),
            title: options.title.unwrap_or_else(|| self.gen.campaign_title()),
            description: options.description.unwrap_or_else(|| self.gen.paragraph()),
            budget: options.budget.unwrap_or_else(|| self.gen.budget()),
            category: options.category.unwrap_or_else(|| self.gen.category()),
            niches: options.niches.unwrap_or_else(|| self.gen.niches()),
            min_reputation_score: options
                .min_reputation_score
                .unwrap_or(DEFAULT_MIN_REPUTATION_SCORE),
            max_influencers: options.max_influencers.unwrap_or(DEFAULT_MAX_INFLUENCERS),
            start_date: options.start_date.unwrap_or(now),
            end_date: options
                .end_date
                .unwrap_or_else(|| now + Duration::days(DEFAULT_CAMPAIGN_DAYS)),
        };

        let resp = self.client.post("/campaigns", &payload).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HarnessError::Creation {
                kind: "campaign".to_string(),
                status,
                body: error_body(resp).await,
            });
        }
        let campaign: Campaign = resp.json().await?;

        self.tracker.track(&campaign.id);
        debug!("created campaign {} ({})", campaign.title, campaign.id);

        Ok(campaign)
    }

    /// Create a campaign and drive it to the given status
    pub async fn create_with_status(
        &self,
        brand_id: &str,
        status: CampaignStatus,
        options: CampaignOptions,
    ) -> HarnessResult<Campaign> {
        let campaign = self.create(brand_id, options).await?;
        if campaign.status == status {
            return Ok(campaign);
        }
        self.set_status(&campaign.id, status).await
    }

    /// Create `count` campaigns for one brand sharing the same options.
    ///
    /// Creation is sequential; on the first failure the error propagates
    /// and the campaigns already created stay tracked.
    pub async fn create_many(
        &self,
        brand_id: &str,
        count: usize,
        options: CampaignOptions,
    ) -> HarnessResult<Vec<Campaign>> {
        let mut campaigns = Vec::with_capacity(count);
        for _ in 0..count {
            campaigns.push(self.create(brand_id, options.clone()).await?);
        }
        Ok(campaigns)
    }

    /// Update a campaign's status
    pub async fn set_status(
        &self,
        id: &str,
        status: CampaignStatus,
    ) -> HarnessResult<Campaign> {
        let resp = self
            .client
            .patch(&format!("/campaigns/{}", id), &CampaignUpdate { status })
            .await?;
        let http_status = resp.status();
        if !http_status.is_success() {
            return Err(HarnessError::Transition {
                action: format!("set status {}", status),
                id: id.to_string(),
                status: http_status,
                body: error_body(resp).await,
            });
        }
        let campaign: Campaign = resp.json().await?;

        debug!("campaign {} -> {}", id, status);

        Ok(campaign)
    }

    /// Fetch a campaign by id; `None` when the backend answers 404
    pub async fn get(&self, id: &str) -> HarnessResult<Option<Campaign>> {
        let resp = self.client.get(&format!("/campaigns/{}", id)).await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(resp.error_for_status()?.json().await?))
    }

    /// Active campaigns whose reputation floor the given user clears
    pub async fn eligible_for(&self, user_id: &str) -> HarnessResult<Vec<Campaign>> {
        let resp = self
            .client
            .get(&format!("/users/{}/eligible-campaigns", user_id))
            .await?;
        Ok(resp.error_for_status()?.json().await?)
    }

    /// Delete a campaign and release it from tracking
    pub async fn delete(&self, id: &str) -> HarnessResult<()> {
        self.delete_request(id).await?;
        self.tracker.untrack(id);
        debug!("deleted campaign {}", id);
        Ok(())
    }

    async fn delete_request(&self, id: &str) -> HarnessResult<()> {
        let resp = self.client.delete(&format!("/campaigns/{}", id)).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HarnessError::Deletion {
                kind: "campaign".to_string(),
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

    /// Delete every tracked campaign, concurrently, warning instead of failing
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
