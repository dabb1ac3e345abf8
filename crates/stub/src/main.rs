use std::net::SocketAddr;

use tracing::info;

use vox_stub::PlatformState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let port: u16 = std::env::var("VOX_STUB_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    info!("Starting vox API stub on http://{}", addr);

    vox_stub::serve(addr, PlatformState::new()).await
}
