mod support;

use vox_common::{CampaignStatus, SocialAccounts, User, UserRole};
use vox_e2e::{CampaignOptions, HarnessConfig, HarnessError, TestContext, UserOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Generated User Defaults
///
/// A user created with no overrides gets generated identity fields, the
/// follower role, reputation 50, and a live session token.
#[tokio::test]
async fn generated_user_gets_defaults_and_a_session() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let user = ctx
        .users
        .create(UserOptions::default())
        .await
        .expect("create user");

    assert!(
        user.email.contains('@'),
        "generated email should be mail-shaped: {}",
        user.email
    );
    assert!(!user.name.trim().is_empty(), "generated name should not be blank");
    assert_eq!(user.role, UserRole::Follower);
    assert_eq!(user.reputation_score, 50);
    assert!(!user.verified);
    assert!(user.access_token.is_some(), "create should log the user in");

    ctx.cleanup().await;
}

/// Override Precedence
///
/// Every field pinned through options must survive unchanged; only the
/// unset fields are generated.
#[tokio::test]
async fn overrides_win_over_generated_values() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let user = ctx
        .users
        .create(
            UserOptions::default()
                .with_role(UserRole::Influencer)
                .with_reputation(82)
                .with_email("pinned@example.com")
                .with_verified(true),
        )
        .await
        .expect("create user");

    assert_eq!(user.email, "pinned@example.com");
    assert_eq!(user.role, UserRole::Influencer);
    assert_eq!(user.reputation_score, 82);
    assert!(user.verified);

    ctx.cleanup().await;
}

/// Session Token Resolution
///
/// The token returned at creation identifies its user via `/auth/me`;
/// a bogus token resolves to nobody.
#[tokio::test]
async fn session_token_resolves_to_its_user() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let user = ctx.users.create_brand().await.expect("create brand");
    let token = user
        .access_token
        .as_deref()
        .expect("brand should hold a session token");

    let resolved = ctx
        .users
        .me(token)
        .await
        .expect("resolve token")
        .expect("token should be live");
    assert_eq!(resolved.id, user.id);
    assert_eq!(resolved.role, UserRole::Brand);

    let missing = ctx.users.me("not-a-token").await.expect("resolve bogus token");
    assert!(missing.is_none(), "unknown tokens resolve to nobody");

    ctx.cleanup().await;
}

/// Generated Campaign Defaults
///
/// A campaign created with no overrides gets a plausible title and
/// description, a whole-amount budget in range, two niches, the standard
/// reputation floor and influencer cap, and a thirty-day window.
#[tokio::test]
async fn generated_campaign_gets_defaults() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let brand = ctx.users.create_brand().await.expect("create brand");
    let campaign = ctx
        .campaigns
        .create(&brand.id, CampaignOptions::default())
        .await
        .expect("create campaign");

    assert_eq!(campaign.brand_id, brand.id);
    assert_eq!(
        campaign.status,
        CampaignStatus::Active,
        "new campaigns are listed immediately"
    );
    assert_eq!(campaign.min_reputation_score, 50);
    assert_eq!(campaign.max_influencers, 10);
    assert!(
        (1000.0..=50_000.0).contains(&campaign.budget),
        "generated budget out of range: {}",
        campaign.budget
    );
    assert_eq!(campaign.budget.fract(), 0.0, "generated budgets are whole amounts");
    assert_eq!(campaign.niches.len(), 2);
    assert_eq!((campaign.end_date - campaign.start_date).num_days(), 30);

    ctx.cleanup().await;
}

/// Resource Tracking
#[tokio::test]
async fn created_entities_are_tracked_for_cleanup() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let brand = ctx.users.create_brand().await.expect("create brand");
    let follower = ctx
        .users
        .create(UserOptions::default())
        .await
        .expect("create follower");
    ctx.campaigns
        .create(&brand.id, CampaignOptions::default())
        .await
        .expect("create campaign");

    assert_eq!(ctx.tracked_count(), 3);
    let tracked = ctx.users.tracked();
    assert!(
        tracked.contains(&brand.id) && tracked.contains(&follower.id),
        "both users should be tracked: {:?}",
        tracked
    );

    ctx.cleanup().await;
}

/// Explicit Delete
///
/// Deleting through the factory removes the entity from the backend and
/// releases the id, so cleanup has nothing left to do.
#[tokio::test]
async fn explicit_delete_releases_tracking() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let user = ctx
        .users
        .create(UserOptions::default())
        .await
        .expect("create user");
    ctx.users.delete(&user.id).await.expect("delete user");

    assert!(ctx.users.tracked().is_empty(), "deleted ids should leave the tracker");
    let gone = ctx.users.get(&user.id).await.expect("look up deleted user");
    assert!(gone.is_none(), "deleted user should be gone from the backend");

    let report = ctx.cleanup().await;
    assert_eq!(report.deleted, 0, "nothing left for cleanup to delete");
    assert!(report.is_clean());
}

/// Deleting Unknown Ids
///
/// An explicit delete of an id the backend does not know surfaces the
/// status code and the id, unlike the warn-and-continue cleanup path.
#[tokio::test]
async fn deleting_an_unknown_id_is_an_error() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let err = ctx
        .users
        .delete("no-such-user")
        .await
        .expect_err("delete an id that was never created");

    match err {
        HarnessError::Deletion { kind, id, status, .. } => {
            assert_eq!(kind, "user");
            assert_eq!(id, "no-such-user");
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("expected a deletion error, got {}", other),
    }
}

/// Creation Failure Detail
///
/// A refused creation surfaces the backend's status code and response
/// body, and the entity is not tracked.
#[tokio::test]
async fn rejected_creation_carries_status_and_body() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let brand = ctx.users.create_brand().await.expect("create brand");
    let err = ctx
        .campaigns
        .create(&brand.id, CampaignOptions::default().with_budget(-5.0))
        .await
        .expect_err("negative budget should be refused");

    match err {
        HarnessError::Creation { kind, status, body } => {
            assert_eq!(kind, "campaign");
            assert_eq!(status.as_u16(), 422);
            assert!(body.contains("budget"), "body should name the bad field: {}", body);
        }
        other => panic!("expected a creation error, got {}", other),
    }
    assert!(ctx.campaigns.tracked().is_empty(), "failed creations are not tracked");

    ctx.cleanup().await;
}

/// Duplicate Email
#[tokio::test]
async fn duplicate_email_is_refused_with_a_conflict() {
    let (_server, config, _state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let options = UserOptions::default().with_email("taken@example.com");
    ctx.users
        .create(options.clone())
        .await
        .expect("create first user");
    let err = ctx
        .users
        .create(options)
        .await
        .expect_err("second user with the same email");

    match err {
        HarnessError::Creation { status, .. } => assert_eq!(status.as_u16(), 409),
        other => panic!("expected a creation error, got {}", other),
    }

    ctx.cleanup().await;
}

/// Login Failure Tracking
///
/// An account whose post-create login fails is already tracked, so
/// cleanup still deletes it. The scripted backend accepts the create
/// and refuses the login.
#[tokio::test]
async fn failed_login_still_tracks_the_created_user() {
    let server = MockServer::start().await;
    let stored = User {
        id: "u-1".to_string(),
        email: "pat.keller@example.com".to_string(),
        name: "Pat Keller".to_string(),
        role: UserRole::Follower,
        reputation_score: 50,
        verified: false,
        social_accounts: SocialAccounts::default(),
        access_token: None,
    };
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&stored))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/u-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let config = HarnessConfig::with_api_url(server.uri());
    let ctx = TestContext::new(&config).expect("build context");

    let err = ctx
        .users
        .create(UserOptions::default())
        .await
        .expect_err("login against the scripted backend fails");
    match err {
        HarnessError::Login { user_id, status, .. } => {
            assert_eq!(user_id, "u-1");
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("expected a login error, got {}", other),
    }
    assert_eq!(
        ctx.users.tracked(),
        vec!["u-1".to_string()],
        "the account is tracked before the login attempt"
    );

    let report = ctx.cleanup().await;
    assert!(report.is_clean());
    assert_eq!(report.deleted, 1, "cleanup still deletes the account");
}

/// Partial Batch Failure
///
/// `create_many` stops at the first failure; the users already created
/// stay tracked and are removed by cleanup.
#[tokio::test]
async fn create_many_keeps_earlier_users_on_failure() {
    let (_server, config, state) = support::start_stub().await;
    let ctx = TestContext::new(&config).expect("build context");

    let options = UserOptions::default().with_email("shared@example.com");
    let err = ctx
        .users
        .create_many(3, options)
        .await
        .expect_err("duplicate emails cannot create three users");
    assert!(matches!(err, HarnessError::Creation { .. }));
    assert_eq!(
        ctx.users.tracked().len(),
        1,
        "the user created before the failure stays tracked"
    );

    let report = ctx.cleanup().await;
    assert_eq!(report.deleted, 1);
    assert!(
        state.list_users().is_empty(),
        "cleanup should remove the partial batch"
    );
}

/// Seeded Reproducibility
///
/// Two contexts built from the same seed generate identical data, while
/// ids still come from the backend.
#[tokio::test]
async fn seeded_contexts_replay_identical_data() {
    let (_server_a, config_a, _state_a) = support::start_stub().await;
    let (_server_b, config_b, _state_b) = support::start_stub().await;
    let ctx_a = TestContext::seeded(&config_a, 77).expect("build context");
    let ctx_b = TestContext::seeded(&config_b, 77).expect("build context");

    let a = ctx_a
        .users
        .create(UserOptions::default())
        .await
        .expect("create user");
    let b = ctx_b
        .users
        .create(UserOptions::default())
        .await
        .expect("create user");

    assert_eq!(a.email, b.email, "same seed should generate the same email");
    assert_eq!(a.name, b.name);
    assert_ne!(a.id, b.id, "ids come from the backend, not the generator");

    ctx_a.cleanup().await;
    ctx_b.cleanup().await;
}
