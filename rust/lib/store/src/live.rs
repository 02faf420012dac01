use studio_core::ServiceError;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::document::Document;
use crate::feed::Subscription;

pub type Snapshot<T> = Result<Vec<T>, ServiceError>;

/// A live query: the subscription handle plus its snapshot stream.
///
/// The stream ends (yields `None`) once the subscription is cancelled.
pub struct LiveQuery<T: Document> {
    subscription: Subscription,
    rx: UnboundedReceiver<Snapshot<T>>,
}

impl<T: Document> LiveQuery<T> {
    pub(crate) fn new(subscription: Subscription, rx: UnboundedReceiver<Snapshot<T>>) -> Self {
        Self { subscription, rx }
    }

    /// Wait for the next snapshot.
    pub async fn next(&mut self) -> Option<Snapshot<T>> {
        self.rx.recv().await
    }

    /// Next snapshot if one is already queued.
    pub fn try_next(&mut self) -> Option<Snapshot<T>> {
        self.rx.try_recv().ok()
    }

    /// Drain the queue and keep only the newest snapshot.
    pub fn latest(&mut self) -> Option<Snapshot<T>> {
        let mut last = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            last = Some(snapshot);
        }
        last
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_active()
    }

    /// Split into the unsubscribe handle and the raw stream.
    pub fn into_parts(self) -> (Subscription, UnboundedReceiver<Snapshot<T>>) {
        (self.subscription, self.rx)
    }

    pub fn cancel(self) {}
}
