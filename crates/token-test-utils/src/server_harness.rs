//! Test server harness for E2E testing
//!
//! Provides `TestTokenServer` for spawning real token server instances in tests.

use crate::fixtures::test_config;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;
use token_service::config::Config;
use token_service::crypto::{GrantSigner, HmacGrantSigner};
use token_service::observability::metrics::init_metrics_recorder;
use token_service::routes::{self, AppState};

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Handle to the process-wide recorder, installed by the first server spawned.
///
/// Falls back to a standalone recorder if something else in the process
/// already installed a global one.
fn metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            init_metrics_recorder()
                .unwrap_or_else(|_| PrometheusBuilder::new().build_recorder().handle())
        })
        .clone()
}

/// Test harness for spawning the token server in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_issue_token_e2e() -> Result<(), anyhow::Error> {
///     let server = TestTokenServer::spawn().await?;
///     let client = reqwest::Client::new();
///
///     let response = client
///         .post(format!("{}/token", server.url()))
///         .json(&serde_json::json!({"roomName": "lobby", "participantName": "alice"}))
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestTokenServer {
    addr: SocketAddr,
    config: Config,
    handle: JoinHandle<()>,
}

impl TestTokenServer {
    /// Spawn a server with the fixture configuration and a real HS256 signer.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_config(test_config()).await
    }

    /// Spawn a server with `config` and a real HS256 signer built from it.
    pub async fn spawn_with_config(config: Config) -> Result<Self, anyhow::Error> {
        let signer = Arc::new(HmacGrantSigner::from_config(&config));
        Self::spawn_with_signer(config, signer).await
    }

    /// Spawn a server that signs through `signer`.
    ///
    /// The server binds to `config.bind_address` (the fixtures use
    /// 127.0.0.1:0) and runs in the background. Every server in the test
    /// process renders the same global recorder on `/metrics`.
    pub async fn spawn_with_signer(
        config: Config,
        signer: Arc<dyn GrantSigner>,
    ) -> Result<Self, anyhow::Error> {
        let state = Arc::new(AppState {
            config: config.clone(),
            signer,
        });

        let app = routes::build_routes(state, metrics_handle());

        let listener = tokio::net::TcpListener::bind(config.bind_address)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for TestTokenServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
