//! Background persistence of click events.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Retries after the first failed insert.
const RETRY_ATTEMPTS: usize = 3;
const RETRY_BASE_MILLIS: u64 = 10;

/// Consumes click events until the channel closes, then drains in-flight writes.
///
/// At most `concurrency` inserts run at once. Transient failures are retried
/// with exponential backoff; a click whose link has been deleted in the
/// meantime fails the foreign key and is dropped without retrying.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    stats_repository: Arc<dyn StatsRepository>,
    concurrency: usize,
) {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let repository = stats_repository.clone();

        tasks.spawn(async move {
            persist_click(repository.as_ref(), event).await;
            drop(permit);
        });

        while tasks.try_join_next().is_some() {}
    }

    let in_flight = tasks.len();
    if in_flight > 0 {
        tracing::info!(in_flight, "Click channel closed, draining pending writes");
    }
    while tasks.join_next().await.is_some() {}

    tracing::info!("Click worker stopped");
}

async fn persist_click(repository: &dyn StatsRepository, event: ClickEvent) {
    let link_id = event.link_id;
    let new_click: NewClick = event.into();

    let strategy = ExponentialBackoff::from_millis(RETRY_BASE_MILLIS)
        .map(jitter)
        .take(RETRY_ATTEMPTS);

    let result = RetryIf::spawn(
        strategy,
        || repository.record_click(new_click.clone()),
        is_transient,
    )
    .await;

    match result {
        Ok(_) => {
            metrics::counter!("shortlinks_clicks_recorded_total").increment(1);
        }
        Err(AppError::Validation { .. }) => {
            metrics::counter!("shortlinks_clicks_failed_total").increment(1);
            tracing::debug!(link_id, "Dropping click for a link that no longer exists");
        }
        Err(e) => {
            metrics::counter!("shortlinks_clicks_failed_total").increment(1);
            tracing::warn!(link_id, error = %e, "Failed to record click after retries");
        }
    }
}

fn is_transient(error: &AppError) -> bool {
    !matches!(error, AppError::Validation { .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Click;
    use crate::domain::repositories::MockStatsRepository;
    use chrono::Utc;
    use serde_json::json;

    fn click_for(new_click: &NewClick) -> Click {
        Click::new(
            1,
            new_click.link_id,
            Utc::now(),
            new_click.ip_address.clone(),
            new_click.user_agent.clone(),
        )
    }

    #[tokio::test]
    async fn test_worker_drains_queue_after_close() {
        let mut mock = MockStatsRepository::new();
        mock.expect_record_click()
            .times(3)
            .returning(|c| Ok(click_for(&c)));

        let (tx, rx) = mpsc::channel(8);
        for id in 1..=3 {
            tx.send(ClickEvent::new(id, None, None)).await.unwrap();
        }
        drop(tx);

        run_click_worker(rx, Arc::new(mock), 2).await;
    }

    #[tokio::test]
    async fn test_foreign_key_failure_is_not_retried() {
        let mut mock = MockStatsRepository::new();
        mock.expect_record_click().times(1).returning(|_| {
            Err(AppError::bad_request(
                "Referenced record does not exist",
                json!({}),
            ))
        });

        let (tx, rx) = mpsc::channel(1);
        tx.send(ClickEvent::new(99, None, None)).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(mock), 1).await;
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let mut mock = MockStatsRepository::new();
        mock.expect_record_click()
            .times(RETRY_ATTEMPTS + 1)
            .returning(|_| Err(AppError::internal("db down", json!({}))));

        let (tx, rx) = mpsc::channel(1);
        tx.send(ClickEvent::new(5, None, None)).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(mock), 1).await;
    }

    #[tokio::test]
    async fn test_recovers_after_one_failure() {
        let mut mock = MockStatsRepository::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_record_click()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::internal("timeout", json!({}))));
        mock.expect_record_click()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|c| Ok(click_for(&c)));

        let (tx, rx) = mpsc::channel(1);
        tx.send(ClickEvent::new(5, Some("1.2.3.4".into()), Some("UA")))
            .await
            .unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(mock), 1).await;
    }
}
