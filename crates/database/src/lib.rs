//! SQLite persistence layer for the flood dashboard.
//!
//! This crate provides async database operations for submitted download tasks,
//! stored flood-analysis results and dashboard accounts using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, models::NewDownloadTask, task};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:rospin.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Record a download task
//!     let new_task = NewDownloadTask {
//!         task_id: "stub-1a2b3c4d".to_string(),
//!         wkt: None,
//!         bbox: Some("25.5,44.3,26.1,44.7".to_string()),
//!         start_date: "2021-12-01".to_string(),
//!         end_date: "2022-01-15".to_string(),
//!         status: "QUEUED".to_string(),
//!     };
//!     task::create_task(db.pool(), &new_task).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod flood_event;
pub mod models;
pub mod task;
pub mod user;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{
    DownloadTask, EventFilter, FloodEvent, NewDownloadTask, NewFloodEvent, NewUser, User,
};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// let db = database::Database::connect("sqlite:data/rospin.db?mode=rwc").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    ///
    /// In-memory databases (`sqlite::memory:`) are per connection, so use a
    /// pool size of 1 for them.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(url, pool_size, "Connected to task database");

        Ok(Self { pool })
    }

    /// Open a fresh in-memory database with migrations applied.
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect_with_pool_size("sqlite::memory:", 1).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Create or upgrade the `download_tasks`, `flood_events` and `users` tables.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("Schema up to date");
        Ok(())
    }

    /// Pool handle for the `task`, `flood_event` and `user` functions.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(id: &str) -> NewDownloadTask {
        NewDownloadTask {
            task_id: id.to_string(),
            wkt: Some("POLYGON((25.5 44.3,26.1 44.3,26.1 44.7,25.5 44.7,25.5 44.3))".to_string()),
            bbox: Some("25.5,44.3,26.1,44.7".to_string()),
            start_date: "2021-12-01".to_string(),
            end_date: "2022-01-15".to_string(),
            status: "QUEUED".to_string(),
        }
    }

    fn new_event(aoi_wkt: &str, post_date: &str, flooded_pct: f64) -> NewFloodEvent {
        NewFloodEvent {
            aoi_wkt: aoi_wkt.to_string(),
            pre_product_id: "S1A_IW_GRDH_pre".to_string(),
            post_product_id: "S1A_IW_GRDH_post".to_string(),
            pre_date: "2021-12-02T04:30:00".to_string(),
            post_date: post_date.to_string(),
            flood_mask_path: "output/flood_mask.tif".to_string(),
            flooded_pct,
            flood_geom: None,
        }
    }

    #[tokio::test]
    async fn test_task_lifecycle() {
        let db = Database::in_memory().await.unwrap();

        // Create
        task::create_task(db.pool(), &new_task("stub-0001")).await.unwrap();

        // Read
        let fetched = task::get_task(db.pool(), "stub-0001").await.unwrap();
        assert_eq!(fetched.status, "QUEUED");
        assert_eq!(fetched.bbox.as_deref(), Some("25.5,44.3,26.1,44.7"));

        // Update
        task::update_task_status(db.pool(), "stub-0001", "DONE").await.unwrap();
        let fetched = task::get_task(db.pool(), "stub-0001").await.unwrap();
        assert_eq!(fetched.status, "DONE");

        // List
        task::create_task(db.pool(), &new_task("stub-0002")).await.unwrap();
        let tasks = task::list_tasks(db.pool()).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].task_id, "stub-0002");

        let counts = task::count_tasks_by_status(db.pool()).await.unwrap();
        assert_eq!(counts.len(), 2);
    }

    #[tokio::test]
    async fn test_task_duplicate_and_missing() {
        let db = Database::in_memory().await.unwrap();
        task::create_task(db.pool(), &new_task("stub-0001")).await.unwrap();

        let result = task::create_task(db.pool(), &new_task("stub-0001")).await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));

        let result = task::get_task(db.pool(), "missing").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));

        let result = task::update_task_status(db.pool(), "missing", "DONE").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_task_rejects_bad_dates() {
        let db = Database::in_memory().await.unwrap();
        let mut bad = new_task("stub-0003");
        bad.end_date = "2021-01-01".to_string();

        let result = task::create_task(db.pool(), &bad).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Validation(ValidationError::DateOrder { .. }))
        ));
    }

    #[tokio::test]
    async fn test_event_create_and_filter() {
        let db = Database::in_memory().await.unwrap();
        let aoi_a = "POLYGON((26.05 44.39,26.25 44.39,26.25 44.52,26.05 44.39))";
        let aoi_b = "POLYGON((1 2,3 4,5 6,1 2))";

        let id = flood_event::create_event(db.pool(), &new_event(aoi_a, "2022-01-10T04:12:00", 12.5))
            .await
            .unwrap();
        flood_event::create_event(db.pool(), &new_event(aoi_a, "2022-03-01T04:12:00", 3.0))
            .await
            .unwrap();
        flood_event::create_event(db.pool(), &new_event(aoi_b, "2022-01-10T05:00:00", 40.0))
            .await
            .unwrap();

        let fetched = flood_event::get_event(db.pool(), id).await.unwrap();
        assert_eq!(fetched.aoi_wkt, aoi_a);
        assert_eq!(fetched.flooded_pct, 12.5);

        let all = flood_event::list_events(db.pool(), &EventFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(flood_event::count_events(db.pool()).await.unwrap(), 3);

        let by_aoi = flood_event::list_events(
            db.pool(),
            &EventFilter {
                aoi_wkt: Some(aoi_a.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_aoi.len(), 2);
        assert_eq!(by_aoi[0].post_date, "2022-03-01T04:12:00");

        // inclusive on both ends, compared by date
        let in_january = flood_event::list_events(
            db.pool(),
            &EventFilter {
                aoi_wkt: None,
                from: Some("2022-01-10".to_string()),
                to: Some("2022-01-10".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(in_january.len(), 2);
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$2b$10$hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_user_create_and_lookup() {
        let db = Database::in_memory().await.unwrap();

        let id = user::create_user(db.pool(), &new_user(" analyst@rospin.ro "))
            .await
            .unwrap();

        let by_email = user::get_user_by_email(db.pool(), "analyst@rospin.ro")
            .await
            .unwrap();
        assert_eq!(by_email.id, id);
        assert_eq!(by_email.email, "analyst@rospin.ro");
        assert_eq!(by_email.password_hash, "$2b$10$hash");

        let by_id = user::get_user(db.pool(), id).await.unwrap();
        assert_eq!(by_id, by_email);

        // the hash is not serialized
        let value = serde_json::to_value(&by_id).unwrap();
        assert!(value.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_user_duplicate_and_invalid() {
        let db = Database::in_memory().await.unwrap();
        user::create_user(db.pool(), &new_user("analyst@rospin.ro"))
            .await
            .unwrap();

        let result = user::create_user(db.pool(), &new_user("analyst@rospin.ro")).await;
        assert!(matches!(
            result,
            Err(DatabaseError::AlreadyExists { entity: "User", .. })
        ));

        let result = user::create_user(db.pool(), &new_user("not-an-email")).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Validation(ValidationError::InvalidEmail(_)))
        ));

        let result = user::get_user_by_email(db.pool(), "nobody@rospin.ro").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_event_validation() {
        let db = Database::in_memory().await.unwrap();

        let result =
            flood_event::create_event(db.pool(), &new_event("POLYGON((1 2,3 4,5 6,1 2))", "2022-01-10", 120.0))
                .await;
        assert!(matches!(
            result,
            Err(DatabaseError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let result = flood_event::create_event(db.pool(), &new_event("  ", "2022-01-10", 1.0)).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Validation(ValidationError::Empty(_)))
        ));

        let result = flood_event::get_event(db.pool(), 42).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
