//! Network-layer error types.

/// Errors that can occur during network operations.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// Failed to encode a message to JSON.
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    /// Failed to decode a message from JSON.
    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),

    /// NATS subscription error.
    #[error("NATS subscribe error: {0}")]
    Subscribe(#[from] async_nats::SubscribeError),

    /// NATS publish error.
    #[error("NATS publish error: {0}")]
    Publish(#[from] async_nats::PublishError),

    /// NATS connection error.
    #[error("NATS connection error: {0}")]
    Connect(#[from] async_nats::ConnectError),
}
