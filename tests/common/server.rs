//! Start a real huecraft server for a test.

use std::net::SocketAddr;
use std::time::Duration;

use huecraft::handlers::router;
use huecraft::{AppState, Config};

/// Serve `config` on an ephemeral port and return its address.
///
/// The server runs on the test's runtime and stops with it.
pub async fn spawn_server(config: Config) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    let app = router(AppState::new_shared(config));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

/// Serve the default configuration.
pub async fn spawn_default_server() -> SocketAddr {
    spawn_server(Config::default()).await
}
