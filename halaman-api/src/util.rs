//! Fan-out helpers.

use std::fmt::Display;
use std::future::Future;

use tracing::debug;

/// Drive a set of independent fallible futures concurrently and keep the
/// successes, in input order. Failures are logged and dropped; they never
/// abort the batch.
///
/// This is the tolerant join used everywhere the service fans out to an
/// upstream: RSS feeds, GBIF sub-resources, Tropicos curated lookups,
/// Wikipedia summary batches. A partial outage degrades data richness,
/// not availability.
pub async fn join_successes<T, E, F>(futures: Vec<F>) -> Vec<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    futures::future::join_all(futures)
        .await
        .into_iter()
        .filter_map(|result| match result {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("fan-out branch failed: {}", err);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn ok_or_fail(n: u32) -> Result<u32, String> {
        if n % 2 == 0 {
            Ok(n)
        } else {
            Err(format!("odd: {n}"))
        }
    }

    #[tokio::test]
    async fn keeps_successes_in_order() {
        let results =
            join_successes(vec![ok_or_fail(2), ok_or_fail(3), ok_or_fail(4), ok_or_fail(6)]).await;
        assert_eq!(results, vec![2, 4, 6]);
    }

    #[tokio::test]
    async fn all_failures_yield_empty() {
        let results = join_successes(vec![ok_or_fail(1), ok_or_fail(3)]).await;
        assert!(results.is_empty());
    }
}
