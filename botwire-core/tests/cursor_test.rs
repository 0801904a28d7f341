use botwire_core::cursor::{Cursor, FetchBatch, Sequenced};
use futures_util::StreamExt;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
struct Event {
    key: i64,
}

impl Sequenced for Event {
    fn sequence_key(&self) -> i64 {
        self.key
    }
}

#[derive(Debug, PartialEq)]
struct Unavailable;

/// Serves keys 1..=100 from the beginning, 101..=150 from key 101, then nothing.
///
/// The first `failures` fetches fail.
#[derive(Clone, Default)]
struct FeedFetcher {
    calls: Arc<Mutex<Vec<(i64, u32, u32)>>>,
    failures: Arc<Mutex<usize>>,
}

impl FeedFetcher {
    fn failing(times: usize) -> Self {
        let fetcher = Self::default();
        *fetcher.failures.lock().unwrap() = times;
        fetcher
    }

    fn calls(&self) -> Vec<(i64, u32, u32)> {
        self.calls.lock().unwrap().clone()
    }

    fn fail_next(&self) {
        *self.failures.lock().unwrap() += 1;
    }
}

impl FetchBatch for FeedFetcher {
    type Item = Event;
    type Error = Unavailable;

    async fn fetch_batch(
        &mut self,
        offset: i64,
        limit: u32,
        wait_secs: u32,
    ) -> Result<Vec<Event>, Unavailable> {
        self.calls.lock().unwrap().push((offset, limit, wait_secs));

        {
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(Unavailable);
            }
        }

        let keys = match offset {
            ..=1 => 1..=100,
            101 => 101..=150,
            _ => return Ok(vec![]),
        };

        Ok(keys.map(|key| Event { key }).collect())
    }
}

#[tokio::test]
async fn test_pagination_scenario() {
    let fetcher = FeedFetcher::default();
    let mut cursor = Cursor::new(fetcher.clone());

    for expected in 1..=150 {
        let event = cursor.next().await.unwrap();
        assert_eq!(event, Some(Event { key: expected }));
    }

    assert_eq!(fetcher.calls().len(), 2);

    assert_eq!(cursor.next().await, Ok(None));
    assert!(cursor.is_exhausted());

    let offsets: Vec<_> = fetcher.calls().iter().map(|(offset, ..)| *offset).collect();
    assert_eq!(offsets, vec![0, 101, 151]);
}

#[tokio::test]
async fn test_exhausted_cursor_never_fetches_again() {
    let fetcher = FeedFetcher::default();
    let mut cursor = Cursor::new(fetcher.clone()).starting_at(151);

    assert_eq!(cursor.next().await, Ok(None));
    assert_eq!(cursor.next().await, Ok(None));
    assert_eq!(cursor.next().await, Ok(None));

    assert_eq!(fetcher.calls().len(), 1);
}

#[tokio::test]
async fn test_fetch_is_deferred_until_needed() {
    let fetcher = FeedFetcher::default();
    let mut cursor = Cursor::new(fetcher.clone()).page_size(100).wait(30);

    assert!(fetcher.calls().is_empty());

    for _ in 0..100 {
        cursor.next().await.unwrap();
    }

    // The first batch is drained and the next key is known, but nothing was prefetched.
    assert_eq!(cursor.next_key(), 101);
    assert_eq!(fetcher.calls(), vec![(0, 100, 30)]);

    assert_eq!(cursor.next().await, Ok(Some(Event { key: 101 })));
    assert_eq!(fetcher.calls(), vec![(0, 100, 30), (101, 100, 30)]);
}

#[tokio::test]
async fn test_fetch_error_leaves_state_untouched() {
    let fetcher = FeedFetcher::failing(1);
    let mut cursor = Cursor::new(fetcher.clone());

    assert_eq!(cursor.next().await, Err(Unavailable));
    assert_eq!(cursor.next_key(), 0);
    assert!(!cursor.is_exhausted());

    // Retrying repeats the same fetch.
    assert_eq!(cursor.next().await, Ok(Some(Event { key: 1 })));

    for _ in 2..=100 {
        cursor.next().await.unwrap();
    }

    fetcher.fail_next();
    assert_eq!(cursor.next().await, Err(Unavailable));
    assert_eq!(cursor.next_key(), 101);

    assert_eq!(cursor.next().await, Ok(Some(Event { key: 101 })));

    let offsets: Vec<_> = fetcher.calls().iter().map(|(offset, ..)| *offset).collect();
    assert_eq!(offsets, vec![0, 0, 101, 101]);
}

#[tokio::test]
async fn test_stream_adapter_yields_the_whole_sequence() {
    let fetcher = FeedFetcher::default();

    let events: Vec<_> = Cursor::new(fetcher.clone())
        .into_stream()
        .map(|event| event.unwrap().key)
        .collect()
        .await;

    assert_eq!(events, (1..=150).collect::<Vec<_>>());
    assert_eq!(fetcher.calls().len(), 3);
}

#[tokio::test]
async fn test_stream_adapter_surfaces_errors_and_continues() {
    let fetcher = FeedFetcher::failing(1);

    let first_two: Vec<_> = Cursor::new(fetcher).into_stream().take(2).collect().await;

    assert_eq!(first_two, vec![Err(Unavailable), Ok(Event { key: 1 })]);
}
