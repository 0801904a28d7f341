//! # Update Cursor
//!
//! Turns a paged "fetch the next batch" RPC into a single, lazily fetched sequence of items.
//!
//! ## How it works
//!
//! A [`Cursor`] owns a [`FetchBatch`] primitive and its own buffer. Each call to
//! [`Cursor::next`] hands out the next buffered item; only when the buffer is empty does the
//! cursor fetch another batch, starting at the key after the last item it handed out.
//!
//! ```text
//! Uninitialized ──next()──▶ Filling ──non-empty batch──▶ Ready ──buffer drained──▶ Filling
//!                               │
//!                               └──────empty batch──────▶ Exhausted (final)
//! ```
//!
//! * There is no read-ahead: a batch is fetched only when an item is actually requested.
//! * An empty batch ends the sequence for this cursor instance; it never fetches again.
//!   Build a new cursor with a fresh starting key to resume polling.
//! * A fetch error is returned unchanged and leaves the cursor untouched, so calling
//!   [`Cursor::next`] again retries the same fetch.
//! * Items are expected in non-decreasing key order; the cursor does not re-sort them.
//!
//! A cursor is owned by a single task: `next` takes `&mut self` and only one fetch is ever in
//! flight.
use futures_util::Stream;
use std::collections::VecDeque;
use std::future::Future;

/// An item carrying the key used to request "everything after this point".
pub trait Sequenced {
    fn sequence_key(&self) -> i64;
}

/// The paged fetch primitive driven by a [`Cursor`].
pub trait FetchBatch {
    type Item: Sequenced;
    type Error;

    /// Fetches up to `limit` items with a key of at least `offset`, waiting up to `wait_secs`
    /// seconds for new items to arrive.
    fn fetch_batch(
        &mut self,
        offset: i64,
        limit: u32,
        wait_secs: u32,
    ) -> impl Future<Output = Result<Vec<Self::Item>, Self::Error>> + Send;
}

pub const DEFAULT_PAGE_SIZE: u32 = 100;

pub struct Cursor<F: FetchBatch> {
    fetcher: F,
    buffer: VecDeque<F::Item>,
    next_key: i64,
    exhausted: bool,
    page_size: u32,
    wait_secs: u32,
}

impl<F: FetchBatch> Cursor<F> {
    /// Creates a cursor reading from the beginning (key `0`) with the default page size and no
    /// long-poll wait.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            buffer: VecDeque::new(),
            next_key: 0,
            exhausted: false,
            page_size: DEFAULT_PAGE_SIZE,
            wait_secs: 0,
        }
    }

    /// Sets the key of the first item to fetch.
    pub fn starting_at(mut self, key: i64) -> Self {
        self.next_key = key;
        self
    }

    /// Sets the maximum number of items requested per fetch.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the long-poll wait passed to every fetch.
    pub fn wait(mut self, wait_secs: u32) -> Self {
        self.wait_secs = wait_secs;
        self
    }

    /// The key the next fetch will start from.
    pub fn next_key(&self) -> i64 {
        self.next_key
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns the next item, fetching a new batch if the buffer is drained.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(item))` - The next item of the sequence.
    /// * `Ok(None)` - The sequence ended: a fetch returned an empty batch.
    /// * `Err(error)` - The fetch failed. The cursor is unchanged and may be polled again.
    pub async fn next(&mut self) -> Result<Option<F::Item>, F::Error> {
        if self.exhausted {
            return Ok(None);
        }

        if self.buffer.is_empty() {
            let batch = self
                .fetcher
                .fetch_batch(self.next_key, self.page_size, self.wait_secs)
                .await?;

            if batch.is_empty() {
                tracing::debug!(offset = self.next_key, "Cursor exhausted");
                self.exhausted = true;
                return Ok(None);
            }

            tracing::debug!(offset = self.next_key, size = batch.len(), "Fetched batch");
            self.buffer = batch.into();
        }

        let item = self.buffer.pop_front();

        if self.buffer.is_empty()
            && let Some(last) = &item
        {
            self.next_key = last.sequence_key() + 1;
        }

        Ok(item)
    }

    /// Consumes the cursor into a [`Stream`] of items.
    ///
    /// The stream ends when the cursor is exhausted. A fetch error is yielded as an item; polling
    /// the stream again after an error retries the fetch.
    pub fn into_stream(self) -> impl Stream<Item = Result<F::Item, F::Error>> {
        futures_util::stream::unfold(self, |mut cursor| async move {
            match cursor.next().await {
                Ok(Some(item)) => Some((Ok(item), cursor)),
                Ok(None) => None,
                Err(error) => Some((Err(error), cursor)),
            }
        })
    }
}
