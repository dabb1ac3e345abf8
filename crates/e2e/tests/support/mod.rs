//! Shared setup for the integration tests

use tracing_subscriber::EnvFilter;
use vox_e2e::HarnessConfig;
use vox_stub::{PlatformState, StubServer};

/// Spawn an in-process stub on an ephemeral port.
///
/// Returns the server handle (the stub dies when it drops), a harness
/// configuration pointed at it, and the shared state handle so tests can
/// inspect the backend directly or mutate it behind the harness's back.
pub async fn start_stub() -> (StubServer, HarnessConfig, PlatformState) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let state = PlatformState::new();
    let server = vox_stub::spawn(state.clone())
        .await
        .expect("spawn stub server");
    let config = HarnessConfig::with_api_url(server.api_url());

    (server, config, state)
}
