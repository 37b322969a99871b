//! Weekly product search counter
//!
//! Every product shown to a shopper bumps a `(product, week)` counter in
//! SQLite. Handlers never wait on the database: hits are queued on a channel
//! and written by a background task.

use chrono::{NaiveDate, Utc};
use regex::Regex;
use sqlx::SqlitePool;
use std::sync::LazyLock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{
    error::{AppError, AppResult},
    models::{Product, TrendEntry},
};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

static WEEK_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-W(0[1-9]|[1-4]\d|5[0-3])$").expect("valid regex"));

/// ISO week label of a date, e.g. "2026-W42"
pub fn week_label(date: NaiveDate) -> String {
    date.format("%G-W%V").to_string()
}

pub fn current_week() -> String {
    week_label(Utc::now().date_naive())
}

/// Validates a requested week label, defaulting to the current week
pub fn resolve_week(requested: Option<&str>) -> AppResult<String> {
    match requested.map(str::trim).filter(|week| !week.is_empty()) {
        None => Ok(current_week()),
        Some(week) if WEEK_LABEL.is_match(week) => Ok(week.to_string()),
        Some(week) => Err(AppError::InvalidInput(format!(
            "week must look like 2026-W07, got {:?}",
            week
        ))),
    }
}

/// Requested row limit, clamped to `1..=MAX_LIMIT`
pub fn resolve_limit(requested: Option<u32>) -> u32 {
    requested.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Reads and writes the `search_counts` table
#[derive(Clone)]
pub struct TrendStore {
    pool: SqlitePool,
}

impl TrendStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Adds one hit for a product in the given week
    pub async fn record(&self, product: &str, brand: &str, week: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO search_counts (product, brand, week, count)
            VALUES (?, ?, ?, 1)
            ON CONFLICT (product, week) DO UPDATE SET count = count + 1
            "#,
        )
        .bind(product)
        .bind(brand)
        .bind(week)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Most searched products of a week, busiest first
    pub async fn top(&self, week: &str, limit: u32) -> AppResult<Vec<TrendEntry>> {
        let rows = sqlx::query_as::<_, TrendEntry>(
            r#"
            SELECT product, brand, count
            FROM search_counts
            WHERE week = ?
            ORDER BY count DESC, product ASC
            LIMIT ?
            "#,
        )
        .bind(week)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// One queued counter bump
struct TrendHit {
    product: String,
    brand: String,
    week: String,
}

/// Queues counter bumps for the background writer
#[derive(Clone)]
pub struct TrendRecorder {
    write_tx: mpsc::UnboundedSender<TrendHit>,
}

/// Handle for stopping the trend writer
pub struct TrendRecorderHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl TrendRecorderHandle {
    /// Stops the writer once everything already queued has been written
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Trend writer task panicked");
        }
        tracing::info!("Trend writer stopped");
    }
}

impl TrendRecorder {
    /// Spawns the background writer for `store`
    pub fn new(store: TrendStore) -> (Self, TrendRecorderHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let task = tokio::spawn(async move {
            Self::writer_task(store, write_rx, shutdown_rx).await;
        });

        (Self { write_tx }, TrendRecorderHandle { shutdown_tx, task })
    }

    async fn writer_task(
        store: TrendStore,
        mut write_rx: mpsc::UnboundedReceiver<TrendHit>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!("Trend writer started");

        loop {
            tokio::select! {
                Some(hit) = write_rx.recv() => {
                    Self::write(&store, hit).await;
                }
                _ = shutdown_rx.recv() => {
                    // Senders may still be alive in cloned state, so drain without waiting
                    let mut flushed = 0;
                    while let Ok(hit) = write_rx.try_recv() {
                        Self::write(&store, hit).await;
                        flushed += 1;
                    }
                    tracing::info!(flushed = flushed, "Trend writer flushed pending hits");
                    break;
                }
            }
        }
    }

    async fn write(store: &TrendStore, hit: TrendHit) {
        if let Err(e) = store.record(&hit.product, &hit.brand, &hit.week).await {
            tracing::error!(error = %e, product = %hit.product, "Failed to record trend hit");
        }
    }

    /// Queues one hit per product for the current week
    pub fn record_products(&self, products: &[Product]) {
        let week = current_week();
        for product in products {
            let hit = TrendHit {
                product: product.name.clone(),
                brand: product.brand.clone(),
                week: week.clone(),
            };
            if let Err(e) = self.write_tx.send(hit) {
                tracing::error!(error = %e, "Failed to queue trend hit");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    async fn store() -> TrendStore {
        TrendStore::new(create_pool("sqlite::memory:").await.unwrap())
    }

    fn product(name: &str, brand: &str) -> Product {
        Product {
            name: name.to_string(),
            price: "99.95 TL".to_string(),
            image: String::new(),
            url: String::new(),
            brand: brand.to_string(),
            category: "basic".to_string(),
            color: "white".to_string(),
            recommended_for: "female Rectangle".to_string(),
        }
    }

    #[test]
    fn test_week_label() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(week_label(date), "2026-W43");
        // 1 Jan 2027 is a Friday, so it belongs to the last ISO week of 2026
        let date = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        assert_eq!(week_label(date), "2026-W53");
    }

    #[test]
    fn test_resolve_week() {
        assert_eq!(resolve_week(Some("2026-W07")).unwrap(), "2026-W07");
        assert_eq!(resolve_week(None).unwrap(), current_week());
        assert_eq!(resolve_week(Some(" ")).unwrap(), current_week());
        assert!(matches!(
            resolve_week(Some("2026-07")),
            Err(AppError::InvalidInput(_))
        ));
        assert!(resolve_week(Some("2026-W60")).is_err());
    }

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None), DEFAULT_LIMIT);
        assert_eq!(resolve_limit(Some(0)), 1);
        assert_eq!(resolve_limit(Some(500)), MAX_LIMIT);
    }

    #[tokio::test]
    async fn test_record_and_top() {
        let store = store().await;
        for _ in 0..3 {
            store.record("Basic Tee", "Pull & Bear", "2026-W42").await.unwrap();
        }
        store.record("Wrap Dress", "Zara", "2026-W42").await.unwrap();
        store.record("Bodycon Midi", "Zara", "2026-W42").await.unwrap();
        store.record("Basic Tee", "Pull & Bear", "2026-W41").await.unwrap();

        let top = store.top("2026-W42", 10).await.unwrap();
        assert_eq!(
            top,
            vec![
                TrendEntry { product: "Basic Tee".into(), brand: "Pull & Bear".into(), count: 3 },
                TrendEntry { product: "Bodycon Midi".into(), brand: "Zara".into(), count: 1 },
                TrendEntry { product: "Wrap Dress".into(), brand: "Zara".into(), count: 1 },
            ]
        );

        assert_eq!(store.top("2026-W42", 1).await.unwrap().len(), 1);
        assert!(store.top("2025-W01", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recorder_flushes_on_shutdown() {
        let store = store().await;
        let (recorder, handle) = TrendRecorder::new(store.clone());

        recorder.record_products(&[product("Basic Tee", "Zara"), product("Basic Tee", "Zara")]);
        recorder.record_products(&[product("Oversize Hoodie", "Pull & Bear")]);
        handle.shutdown().await;

        let top = store.top(&current_week(), 10).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product, "Basic Tee");
        assert_eq!(top[0].count, 2);
    }
}
