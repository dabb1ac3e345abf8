//! Test context and the cleanup-guaranteed scope
//!
//! [`TestContext`] bundles the three factories behind one configuration.
//! [`scope`] runs a test body against a fresh context and cleans up no
//! matter how the body ends: `Ok`, `Err`, or panic. A panic is caught only
//! long enough to clean up, then resumed, so the test still fails with its
//! original message.

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::factory::{CampaignFactory, CleanupReport, TrustConnectionFactory, UserFactory};
use crate::generate::DataGen;

/// One test's window onto the platform API.
///
/// Every entity the factories create is tracked and deleted again by
/// [`TestContext::cleanup`], dependents before dependencies.
pub struct TestContext {
    pub users: UserFactory,
    pub campaigns: CampaignFactory,
    pub trust: TrustConnectionFactory,
}

impl TestContext {
    /// Build a context with entropy-seeded data generation
    pub fn new(config: &HarnessConfig) -> HarnessResult<Self> {
        Self::with_gen(config, DataGen::new())
    }

    /// Build a context whose generated data replays from a seed
    pub fn seeded(config: &HarnessConfig, seed: u64) -> HarnessResult<Self> {
        Self::with_gen(config, DataGen::seeded(seed))
    }

    fn with_gen(config: &HarnessConfig, gen: DataGen) -> HarnessResult<Self> {
        let client = ApiClient::new(config)?;
        Ok(Self {
            users: UserFactory::new(client.clone(), gen.clone()),
            campaigns: CampaignFactory::new(client.clone(), gen),
            trust: TrustConnectionFactory::new(client),
        })
    }

    /// Number of entities currently tracked across all factories
    pub fn tracked_count(&self) -> usize {
        self.users.tracked().len() + self.campaigns.tracked().len() + self.trust.tracked().len()
    }

    /// Delete everything the factories created, dependents first.
    ///
    /// Trust connections go before campaigns, campaigns before users, so
    /// no delete is refused over a live dependent. Failed deletes are
    /// logged and counted in the report, never propagated.
    pub async fn cleanup(&self) -> CleanupReport {
        let mut report = self.trust.cleanup().await;
        report.absorb(self.campaigns.cleanup().await);
        report.absorb(self.users.cleanup().await);

        if report.failed > 0 {
            warn!(
                "cleanup finished with {} of {} deletes failed",
                report.failed,
                report.deleted + report.failed
            );
        } else {
            info!("cleanup deleted {} entities", report.deleted);
        }

        report
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let left = self.tracked_count();
        if left > 0 {
            warn!(
                "test context dropped with {} tracked entities; cleanup never finished",
                left
            );
        }
    }
}

/// Run a test body against a fresh context, always cleaning up afterwards.
///
/// The body's outcome is preserved: an `Err` comes back as that `Err`, and
/// a panic resumes after cleanup has run.
pub async fn scope<F, Fut, T>(config: &HarnessConfig, body: F) -> HarnessResult<T>
where
    F: FnOnce(Arc<TestContext>) -> Fut,
    Fut: Future<Output = HarnessResult<T>>,
{
    let ctx = Arc::new(TestContext::new(config)?);
    run_scoped(ctx, body).await
}

/// [`scope`] with seeded data generation
pub async fn scope_seeded<F, Fut, T>(
    config: &HarnessConfig,
    seed: u64,
    body: F,
) -> HarnessResult<T>
where
    F: FnOnce(Arc<TestContext>) -> Fut,
    Fut: Future<Output = HarnessResult<T>>,
{
    let ctx = Arc::new(TestContext::seeded(config, seed)?);
    run_scoped(ctx, body).await
}

async fn run_scoped<F, Fut, T>(ctx: Arc<TestContext>, body: F) -> HarnessResult<T>
where
    F: FnOnce(Arc<TestContext>) -> Fut,
    Fut: Future<Output = HarnessResult<T>>,
{
    let outcome = AssertUnwindSafe(body(ctx.clone())).catch_unwind().await;

    ctx.cleanup().await;

    match outcome {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
