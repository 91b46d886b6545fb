// Broadcaster used when live updates are disabled. Publishing costs nothing.

use crate::core::ports::{EventBroadcaster, LedgerUpdate};

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBroadcaster;

#[async_trait::async_trait]
impl EventBroadcaster for NoopBroadcaster {
    async fn publish(&self, _update: LedgerUpdate) {}
}
