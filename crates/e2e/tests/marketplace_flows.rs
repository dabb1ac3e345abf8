mod support;

use vox_common::{CampaignStatus, UserRole};
use vox_e2e::{CampaignOptions, HarnessError, TestContext, UserOptions};

/// Reputation Gating
///
/// The eligible view lists only active campaigns whose floor the user
/// clears, sorted by title.
#[tokio::test]
async fn eligible_campaigns_respect_the_reputation_floor() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let brand = ctx.users.create_brand().await.expect("create brand");
    ctx.campaigns
        .create(
            &brand.id,
            CampaignOptions::default()
                .with_title("Zenith Launch")
                .with_min_reputation(40),
        )
        .await
        .expect("create low-floor campaign");
    ctx.campaigns
        .create(
            &brand.id,
            CampaignOptions::default()
                .with_title("Atlas Launch")
                .with_min_reputation(40),
        )
        .await
        .expect("create second low-floor campaign");
    ctx.campaigns
        .create(
            &brand.id,
            CampaignOptions::default()
                .with_title("Summit Launch")
                .with_min_reputation(80),
        )
        .await
        .expect("create high-floor campaign");

    let influencer = ctx
        .users
        .create(
            UserOptions::default()
                .with_role(UserRole::Influencer)
                .with_reputation(60),
        )
        .await
        .expect("create influencer");

    let eligible = ctx
        .campaigns
        .eligible_for(&influencer.id)
        .await
        .expect("fetch eligible campaigns");
    let titles: Vec<&str> = eligible.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Atlas Launch", "Zenith Launch"],
        "only campaigns under the user's reputation, sorted by title"
    );

    ctx.cleanup().await;
}

/// Inactive Campaigns
#[tokio::test]
async fn inactive_campaigns_are_not_eligible() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let brand = ctx.users.create_brand().await.expect("create brand");
    let live = ctx
        .campaigns
        .create(&brand.id, CampaignOptions::default().with_title("Live Launch"))
        .await
        .expect("create active campaign");
    let done = ctx
        .campaigns
        .create_with_status(
            &brand.id,
            CampaignStatus::Completed,
            CampaignOptions::default().with_title("Finished Launch"),
        )
        .await
        .expect("create completed campaign");
    assert_eq!(done.status, CampaignStatus::Completed);

    let viewer = ctx
        .users
        .create(UserOptions::default().with_reputation(90))
        .await
        .expect("create viewer");
    let eligible = ctx
        .campaigns
        .eligible_for(&viewer.id)
        .await
        .expect("fetch eligible campaigns");

    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].id, live.id, "only the active campaign is listed");

    ctx.cleanup().await;
}

/// Status Round-Trip
#[tokio::test]
async fn status_updates_are_visible_on_read() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let brand = ctx.users.create_brand().await.expect("create brand");
    let campaign = ctx
        .campaigns
        .create(&brand.id, CampaignOptions::default())
        .await
        .expect("create campaign");

    let cancelled = ctx
        .campaigns
        .set_status(&campaign.id, CampaignStatus::Cancelled)
        .await
        .expect("cancel campaign");
    assert_eq!(cancelled.status, CampaignStatus::Cancelled);

    let fetched = ctx
        .campaigns
        .get(&campaign.id)
        .await
        .expect("fetch campaign")
        .expect("campaign exists");
    assert_eq!(fetched.status, CampaignStatus::Cancelled);

    ctx.cleanup().await;
}

/// Missing Campaigns
#[tokio::test]
async fn transition_on_a_missing_campaign_is_an_error() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let err = ctx
        .campaigns
        .set_status("no-such-campaign", CampaignStatus::Active)
        .await
        .expect_err("missing campaign");

    match err {
        HarnessError::Transition { status, id, .. } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(id, "no-such-campaign");
        }
        other => panic!("expected a transition error, got {}", other),
    }
}

/// Brand Portfolio
///
/// A brand builds a portfolio, prunes one campaign, and cleanup removes
/// the rest together with the brand itself.
#[tokio::test]
async fn brand_portfolio_create_and_prune() {
    let (_server, config, state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let brand = ctx.users.create_brand().await.expect("create brand");
    let portfolio = ctx
        .campaigns
        .create_many(&brand.id, 3, CampaignOptions::default())
        .await
        .expect("create portfolio");
    assert_eq!(state.list_campaigns().len(), 3);

    let first = &portfolio[0];
    ctx.campaigns.delete(&first.id).await.expect("prune campaign");
    assert!(
        ctx.campaigns
            .get(&first.id)
            .await
            .expect("look up pruned campaign")
            .is_none(),
        "pruned campaign should be gone"
    );
    assert_eq!(state.list_campaigns().len(), 2);

    let report = ctx.cleanup().await;
    assert!(report.is_clean());
    assert_eq!(
        report.deleted, 3,
        "two campaigns and the brand remain for cleanup"
    );
}
