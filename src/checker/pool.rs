//! Bounded-concurrency worker pool
//!
//! This module handles:
//! - Limiting the number of in-flight link checks
//! - Dispatching pending items in input order as workers free up
//! - Returning results in input order regardless of completion order
//!
//! Workers are long-lived futures that pull the next index from a shared
//! atomic cursor until it runs past the end. They are polled together on the
//! calling task, so no spawning or `'static` bounds are needed.

use futures::future::join_all;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Runs `worker` over every item with at most `concurrency` in flight
///
/// # Arguments
///
/// * `items` - The inputs; `result[i]` always corresponds to `items[i]`
/// * `concurrency` - Maximum in-flight invocations (0 is treated as 1)
/// * `worker` - Async function applied to each item
///
/// # Returns
///
/// One result per item, in input order. An empty input completes
/// immediately with an empty vector.
pub async fn run_pool<T, R, F, Fut>(items: &[T], concurrency: usize, worker: F) -> Vec<R>
where
    F: Fn(&T) -> Fut,
    Fut: Future<Output = R>,
{
    if items.is_empty() {
        return Vec::new();
    }

    let worker_count = worker_count(concurrency, items.len());
    let cursor = AtomicUsize::new(0);
    let cursor = &cursor;
    let worker = &worker;

    let workers = (0..worker_count).map(move |_| async move {
        let mut finished = Vec::new();
        loop {
            let index = cursor.fetch_add(1, Ordering::Relaxed);
            let Some(item) = items.get(index) else {
                break;
            };
            finished.push((index, worker(item).await));
        }
        finished
    });

    // Each index is claimed exactly once, so every slot is filled
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(items.len()).collect();
    for (index, result) in join_all(workers).await.into_iter().flatten() {
        slots[index] = Some(result);
    }

    slots.into_iter().flatten().collect()
}

/// Number of workers started for `item_count` items
fn worker_count(concurrency: usize, item_count: usize) -> usize {
    concurrency.max(1).min(item_count)
}
