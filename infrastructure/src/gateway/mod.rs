//! HTTP adapters for the chat stream
//!
//! - [`GatewayUpstream`]: the relay's call to the chat-completion provider
//! - [`HttpRelayTransport`]: the chat client's call to the relay

mod protocol;
pub mod relay_client;
pub mod upstream;

pub use relay_client::HttpRelayTransport;
pub use upstream::GatewayUpstream;

/// Build the HTTP client shared by all outbound adapters.
///
/// No request timeout is set: a streamed reply stays open as long as the
/// provider keeps sending.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("travelmate/", env!("CARGO_PKG_VERSION")))
        .build()
}
