//! Vox API Stub
//!
//! An in-memory rendition of the vox platform API, faithful enough for
//! exercising the harness end to end: entity CRUD, credential login with
//! bearer tokens, the reputation-gated campaign view, and the pending-only
//! transition rule for trust connections.
//!
//! Tests spawn it in-process on an ephemeral port via [`spawn`]; the
//! `vox-stub` binary serves the same router on a fixed port.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::PlatformState;

use std::net::SocketAddr;
use tracing::{error, info};

/// Handle to a stub server running in a background task.
///
/// Dropping the handle aborts the server task.
pub struct StubServer {
    addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    /// Address the stub is bound to
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL of the entity API, `/api` prefix included
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Bind an ephemeral localhost port and serve the stub in the background
pub async fn spawn(state: PlatformState) -> anyhow::Result<StubServer> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(state);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("stub server exited: {}", e);
        }
    });

    Ok(StubServer { addr, handle })
}

/// Serve the stub on a fixed address until the process exits
pub async fn serve(addr: SocketAddr, state: PlatformState) -> anyhow::Result<()> {
    info!("vox stub listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
