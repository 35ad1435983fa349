use crate::{
    error::ClientResult,
    models::{InteractionAck, InteractionEvent},
};

/// Delivery seam between the interaction tracker and the backend
///
/// The production implementation posts to `/interactions`; tests substitute
/// their own to observe dispatches and inject failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait InteractionTransport: Send + Sync {
    /// Deliver one event, returning the backend acknowledgement.
    async fn send(&self, event: InteractionEvent) -> ClientResult<InteractionAck>;
}
