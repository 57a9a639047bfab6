//! Common test utilities and helpers

use paperswithcode::{Client, ClientConfig, ClientConfigBuilder, RetryConfig};
use std::path::Path;
use std::time::Duration;

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Token used by authenticated test clients
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-token-0123456789";

/// Configuration pointing at a mock server, with fast retries.
#[allow(dead_code)]
pub fn config(base_url: &str) -> ClientConfigBuilder {
    ClientConfigBuilder::new()
        .base_url(base_url)
        .timeout(Duration::from_secs(5))
        .retry(RetryConfig {
            backoff_factor: Duration::from_millis(5),
            backoff_max: Duration::from_millis(20),
            ..RetryConfig::default()
        })
}

/// Run blocking client code off the async runtime.
///
/// The blocking `reqwest` client owns its own runtime, so it must be built,
/// used and dropped on a blocking thread.
#[allow(dead_code)]
pub async fn blocking<F, T>(config: ClientConfig, f: F) -> T
where
    F: FnOnce(Client) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let client = Client::new(config).expect("Failed to build client");
        f(client)
    })
    .await
    .expect("blocking task panicked")
}
