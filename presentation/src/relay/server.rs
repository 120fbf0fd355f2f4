//! Server setup and routing.

use crate::relay::{handlers, state::AppState};
use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::get,
};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

/// Headers a browser client may send with the relay request.
const ALLOWED_HEADERS: [HeaderName; 4] = [
    header::AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    header::CONTENT_TYPE,
];

/// `ALLOWED_HEADERS` as sent on non-preflight responses.
const ALLOWED_HEADERS_VALUE: &str = "authorization, x-client-info, apikey, content-type";

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(ALLOWED_HEADERS)
        .allow_methods([Method::POST, Method::OPTIONS, Method::GET])
}

/// Create the relay router.
///
/// `GET /health` answers a probe; every other path and method goes to the relay.
/// Every response carries both CORS headers, preflight or not.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(handlers::handle_health).fallback(handlers::handle_relay),
        )
        .fallback(handlers::handle_relay)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS_VALUE),
        ))
        .layer(cors_layer())
        .with_state(state)
}

/// Run the HTTP server until `shutdown` is cancelled.
///
/// In-flight streams are allowed to finish after shutdown starts.
pub async fn run_server(
    state: AppState,
    addr: SocketAddr,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Relay listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    info!("Relay stopped");
    Ok(())
}
