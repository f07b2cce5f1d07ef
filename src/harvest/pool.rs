//! Bounded, order-preserving concurrent map
//!
//! Fans a set of independent units of work out over tokio tasks gated by a
//! semaphore, and collects the results into a slot vector indexed by input
//! position. Completion order is irrelevant: output order always equals
//! input order, so no downstream reordering or flattening is needed.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Default concurrency degree: twice the available CPU cores
pub fn default_degree() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * 2
}

/// Applies `f` to every item under a concurrency bound, preserving order
///
/// Each item is processed by its own task; at most `degree` run at once.
/// Results land in a pre-sized slot array at their input index. A panicking
/// task is logged and its slot dropped; the relative order of all other
/// results is unaffected.
pub async fn map_bounded<T, R, F, Fut>(items: Vec<T>, degree: usize, f: F) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(degree.max(1)));
    let mut handles = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let f = f.clone();
        handles.push(tokio::spawn(async move {
            // The semaphore is never closed while handles are outstanding.
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("worker semaphore closed");
            (index, f(item).await)
        }));
    }

    let mut slots: Vec<Option<R>> = Vec::with_capacity(handles.len());
    slots.resize_with(handles.len(), || None);

    for handle in handles {
        match handle.await {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => tracing::error!("worker task failed: {e}"),
        }
    }

    slots.into_iter().flatten().collect()
}
