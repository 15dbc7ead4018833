//! Download task records.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{DownloadTask, NewDownloadTask};
use crate::validation::{validate_date_range, validate_task_id};

/// Record a newly submitted download task.
pub async fn create_task(pool: &SqlitePool, task: &NewDownloadTask) -> Result<()> {
    validate_task_id(&task.task_id)?;
    let (start, end) = validate_date_range(&task.start_date, &task.end_date)?;

    sqlx::query(
        r#"
        INSERT INTO download_tasks (task_id, wkt, bbox, start_date, end_date, status)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&task.task_id)
    .bind(&task.wkt)
    .bind(&task.bbox)
    .bind(&start)
    .bind(&end)
    .bind(&task.status)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "DownloadTask",
                    id: task.task_id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    tracing::debug!(task_id = %task.task_id, "Recorded download task");
    Ok(())
}

/// Get a download task by ID.
pub async fn get_task(pool: &SqlitePool, task_id: &str) -> Result<DownloadTask> {
    sqlx::query_as::<_, DownloadTask>(
        r#"
        SELECT task_id, wkt, bbox, start_date, end_date, status, created_at, updated_at
        FROM download_tasks
        WHERE task_id = ?
        "#,
    )
    .bind(task_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "DownloadTask",
        id: task_id.to_string(),
    })
}

/// Update the last known status of a task.
pub async fn update_task_status(pool: &SqlitePool, task_id: &str, status: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE download_tasks
        SET status = ?, updated_at = datetime('now')
        WHERE task_id = ?
        "#,
    )
    .bind(status)
    .bind(task_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "DownloadTask",
            id: task_id.to_string(),
        });
    }

    Ok(())
}

/// List all tasks, newest first.
pub async fn list_tasks(pool: &SqlitePool) -> Result<Vec<DownloadTask>> {
    let tasks = sqlx::query_as::<_, DownloadTask>(
        r#"
        SELECT task_id, wkt, bbox, start_date, end_date, status, created_at, updated_at
        FROM download_tasks
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Count tasks grouped by status.
pub async fn count_tasks_by_status(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT status, COUNT(*) as count
        FROM download_tasks
        GROUP BY status
        ORDER BY count DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
