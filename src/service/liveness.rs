//! Keep-alive HTTP endpoint for hosting platform health checks.
//!
//! Runs on its own OS thread with its own runtime, so it stays up no matter
//! what the event loop is doing.

use std::net::{SocketAddr, TcpListener as StdTcpListener};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::base::types::{Res, Void};

/// Body returned by `GET /`.
pub const LIVENESS_BODY: &str = "Bot is alive!";

/// Router with the single liveness route.
pub fn router() -> Router {
    Router::new().route("/", get(|| async { LIVENESS_BODY }))
}

/// Serves the liveness route on an already-bound listener until it fails.
pub async fn serve(listener: TcpListener) -> Void {
    axum::serve(listener, router()).await?;
    Ok(())
}

/// Binds `addr` and serves the liveness route on a dedicated thread.
///
/// Binding happens on the caller's thread so that a taken port is reported immediately.
#[instrument(skip_all, fields(%addr))]
pub fn spawn(addr: SocketAddr) -> Res<SocketAddr> {
    let listener = StdTcpListener::bind(addr)?;
    listener.set_nonblocking(true)?;
    let local_addr = listener.local_addr()?;

    std::thread::Builder::new().name("liveness".to_string()).spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("Failed to build the liveness runtime: {}", e);
                return;
            }
        };

        let result: Void = runtime.block_on(async move {
            let listener = TcpListener::from_std(listener)?;
            serve(listener).await
        });

        if let Err(e) = result {
            error!("Liveness server terminated unexpectedly: {}", e);
        }
    })?;

    info!("Liveness endpoint listening on {}", local_addr);

    Ok(local_addr)
}

// Tests.
