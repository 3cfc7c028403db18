//! Live subscription handle shared by every push-style port.
//!
//! A [`LiveQuery`] always holds the latest full snapshot of its source.
//! Dropping the handle unsubscribes; adapters notice through their sender and
//! stop producing updates.

use futures_util::stream::{self, Stream};
use tokio::sync::watch;

/// Latest-value subscription over a collection snapshot or identity.
#[derive(Debug)]
pub struct LiveQuery<T> {
    receiver: watch::Receiver<T>,
}

impl<T: Clone> LiveQuery<T> {
    /// Wrap a watch receiver produced by an adapter.
    pub fn new(receiver: watch::Receiver<T>) -> Self {
        Self { receiver }
    }

    /// A subscription whose source has already closed: it yields `value` as
    /// the snapshot and never reports a change.
    ///
    /// # Examples
    /// ```
    /// use recipe_companion::domain::ports::LiveQuery;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let mut query = LiveQuery::fixed(vec![1, 2]);
    /// assert_eq!(query.snapshot(), vec![1, 2]);
    /// assert_eq!(query.next().await, None);
    /// # });
    /// ```
    pub fn fixed(value: T) -> Self {
        let (_sender, receiver) = watch::channel(value);
        Self { receiver }
    }

    /// Current snapshot, marking it as seen.
    pub fn snapshot(&mut self) -> T {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait for the next snapshot. Returns `None` once the source closes.
    pub async fn next(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        Some(self.snapshot())
    }

    /// Wait until a snapshot satisfies `predicate`, checking the current one
    /// first. Returns `None` if the source closes before that happens.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.receiver
            .wait_for(predicate)
            .await
            .ok()
            .map(|value| value.clone())
    }

    /// Consume the query as a stream that yields the current snapshot first,
    /// then every later one, ending when the source closes.
    pub fn into_stream(self) -> impl Stream<Item = T> {
        stream::unfold((self, true), |(mut query, first)| async move {
            let item = if first {
                Some(query.snapshot())
            } else {
                query.next().await
            };
            item.map(|value| (value, (query, false)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn next_reports_sent_snapshots() {
        let (sender, receiver) = watch::channel(0_u32);
        let mut query = LiveQuery::new(receiver);
        assert_eq!(query.snapshot(), 0);

        sender.send(5).expect("receiver alive");
        assert_eq!(query.next().await, Some(5));
    }

    #[rstest]
    #[tokio::test]
    async fn next_ends_when_source_closes() {
        let (sender, receiver) = watch::channel("a".to_owned());
        let mut query = LiveQuery::new(receiver);
        drop(sender);
        assert_eq!(query.next().await, None);
        assert_eq!(query.snapshot(), "a");
    }

    #[rstest]
    #[tokio::test]
    async fn wait_for_returns_matching_snapshot() {
        let (sender, receiver) = watch::channel(vec![1_u8]);
        let mut query = LiveQuery::new(receiver);
        let waiter = tokio::spawn(async move { query.wait_for(|items| items.len() == 3).await });

        sender.send(vec![1, 2]).expect("receiver alive");
        sender.send(vec![1, 2, 3]).expect("receiver alive");
        let found = waiter.await.expect("join waiter");
        assert_eq!(found, Some(vec![1, 2, 3]));
    }

    #[rstest]
    #[tokio::test]
    async fn stream_starts_with_the_current_snapshot() {
        use futures_util::StreamExt;

        let (sender, receiver) = watch::channel(1_u8);
        let stream = LiveQuery::new(receiver).into_stream();
        sender.send(2).expect("receiver alive");
        drop(sender);

        let seen: Vec<u8> = stream.collect().await;
        assert_eq!(seen, vec![2]);
    }

    #[rstest]
    fn dropping_the_query_closes_the_sender() {
        let (sender, receiver) = watch::channel(1_u8);
        let query = LiveQuery::new(receiver);
        assert!(!sender.is_closed());
        drop(query);
        assert!(sender.is_closed());
    }
}
