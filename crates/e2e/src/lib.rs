//! Vox E2E Test Harness
//!
//! This crate provides an API-level E2E harness for the Vox platform that:
//! - Creates users, campaigns, and trust connections over the real HTTP API
//! - Generates plausible default data for every field a test does not pin
//! - Tracks every created entity and deletes it again after the test
//! - Builds star and chain trust topologies in one call
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TestContext (fixture)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  UserFactory                                                │
//! │    ├── create(options) -> User        [tracked]             │
//! │    ├── create_brand() / create_influencer()                 │
//! │    └── create_many(n, options)                              │
//! │  CampaignFactory                                            │
//! │    ├── create(brand_id, options) -> Campaign  [tracked]     │
//! │    └── create_with_status(..., status)                      │
//! │  TrustConnectionFactory                                     │
//! │    ├── create(from, to, options) -> TrustConnection         │
//! │    ├── create_network(hub, members) -> star                 │
//! │    └── create_chain(users) -> path                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  cleanup(): trust -> campaigns -> users, warn-and-continue  │
//! │  scope(): cleanup on Ok, Err, and panic                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod fixture;
pub mod generate;

pub use client::ApiClient;
pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use factory::{
    CampaignFactory, CampaignOptions, CleanupReport, TrustConnectionFactory,
    TrustConnectionOptions, UserFactory, UserOptions,
};
pub use fixture::{scope, scope_seeded, TestContext};
pub use generate::DataGen;
