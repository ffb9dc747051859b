//! Standalone mock backend
//!
//! Environment:
//! - `MOCK_BIND_ADDR`: listen address (default `127.0.0.1:5000`)
//! - `MOCK_ISSUE_TOKENS`: issue and require bearer tokens (default `true`)

use std::sync::Arc;

use tablebook_mock::{MockState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tablebook_mock=info,tower_http=info".into()),
        )
        .init();

    let bind_addr = std::env::var("MOCK_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".into());
    let issue_tokens = std::env::var("MOCK_ISSUE_TOKENS")
        .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
        .unwrap_or(true);

    let state = Arc::new(MockState::new(issue_tokens));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, issue_tokens, "Mock backend listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down mock backend");
        })
        .await?;

    Ok(())
}
