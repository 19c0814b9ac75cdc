/*!
 * Bounded fan-out of independent blocking work units.
 *
 * Each unit owns its input and its output path, so nothing is shared between
 * units apart from the progress counter. Every submitted unit runs to
 * completion; results come back in submission order.
 */

use futures::stream::{self, StreamExt};
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ConvertError;

/// Resolve a requested worker count, 0 meaning one per available CPU
pub fn effective_workers(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Run `job` on every unit on tokio's blocking pool, at most `workers` at once.
///
/// `progress` is called with `(completed, total)` after each unit finishes.
pub async fn run_blocking_units<T, R, F, P>(
    units: Vec<T>,
    workers: usize,
    job: F,
    progress: P,
) -> Vec<Result<R, ConvertError>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Result<R, ConvertError> + Send + Sync + 'static,
    P: Fn(usize, usize) + Clone + Send + 'static,
{
    let workers = effective_workers(workers);
    let total = units.len();
    let job = Arc::new(job);
    let completed = Arc::new(AtomicUsize::new(0));

    debug!("Running {} units on {} workers", total, workers);

    let mut results = stream::iter(units.into_iter().enumerate())
        .map(|(index, unit)| {
            let job = Arc::clone(&job);
            let completed = Arc::clone(&completed);
            let progress = progress.clone();

            async move {
                let result = match tokio::task::spawn_blocking(move || job(unit)).await {
                    Ok(result) => result,
                    Err(e) => Err(ConvertError::Task(e.to_string())),
                };

                let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress(current, total);

                (index, result)
            }
        })
        .buffer_unordered(workers)
        .collect::<Vec<_>>()
        .await;

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}
