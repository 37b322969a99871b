use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS search_counts (
    product TEXT NOT NULL,
    brand   TEXT NOT NULL,
    week    TEXT NOT NULL,
    count   INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (product, week)
)
"#;

/// Creates a SQLite connection pool and makes sure the schema exists
///
/// The database file is created on first use. An in-memory database lives
/// only as long as its connection, so it is held on a single connection that
/// never idles out.
pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if is_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;
    migrate(&pool).await?;

    Ok(pool)
}

/// Creates the tables used by the service if they are missing
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

fn is_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_memory() {
        assert!(is_memory("sqlite::memory:"));
        assert!(is_memory("sqlite://file?mode=memory"));
        assert!(!is_memory("sqlite://aura.db"));
    }

    #[tokio::test]
    async fn test_memory_pool_has_schema() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let (tables,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'search_counts'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables, 1);

        // running it again is a no-op
        migrate(&pool).await.unwrap();
    }
}
