//! Tablebook Mock - in-memory reservation backend
//!
//! Serves the REST surface the client talks to, backed by seeded data.
//! Used by the client's integration tests and for running the demo
//! without the real backend.

pub mod api;
pub mod error;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub use api::router;
pub use error::{MockError, MockResult};
pub use state::{MockState, RecordedRequest};

/// A mock server running on a background task; stopped on drop
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Bind an ephemeral local port and start serving
    pub async fn spawn(issue_tokens: bool) -> std::io::Result<Self> {
        let state = Arc::new(MockState::new(issue_tokens));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(state.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Mock server error: {e}");
            }
        });
        tracing::debug!(%addr, issue_tokens, "Mock server spawned");

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &Arc<MockState> {
        &self.state
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
