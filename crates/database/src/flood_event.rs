//! Flood analysis results.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{EventFilter, FloodEvent, NewFloodEvent};
use crate::validation::{validate_flooded_pct, validate_iso_date, ValidationError};

/// Store a flood event and return its ID.
pub async fn create_event(pool: &SqlitePool, event: &NewFloodEvent) -> Result<i64> {
    if event.aoi_wkt.trim().is_empty() {
        return Err(ValidationError::Empty("aoi_wkt".to_string()).into());
    }
    validate_iso_date(&event.pre_date)?;
    validate_iso_date(&event.post_date)?;
    validate_flooded_pct(event.flooded_pct)?;

    let result = sqlx::query(
        r#"
        INSERT INTO flood_events (
            aoi_wkt, pre_product_id, post_product_id, pre_date, post_date,
            flood_mask_path, flooded_pct, flood_geom
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&event.aoi_wkt)
    .bind(&event.pre_product_id)
    .bind(&event.post_product_id)
    .bind(&event.pre_date)
    .bind(&event.post_date)
    .bind(&event.flood_mask_path)
    .bind(event.flooded_pct)
    .bind(&event.flood_geom)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::info!(id, flooded_pct = event.flooded_pct, "Stored flood event");
    Ok(id)
}

/// Get a flood event by ID.
pub async fn get_event(pool: &SqlitePool, id: i64) -> Result<FloodEvent> {
    sqlx::query_as::<_, FloodEvent>(
        r#"
        SELECT id, aoi_wkt, pre_product_id, post_product_id, pre_date, post_date,
               flood_mask_path, flooded_pct, flood_geom, created_at
        FROM flood_events
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "FloodEvent",
        id: id.to_string(),
    })
}

/// List flood events matching a filter, most recent post-flood date first.
///
/// The date bounds apply to the post-flood acquisition date and are inclusive.
pub async fn list_events(pool: &SqlitePool, filter: &EventFilter) -> Result<Vec<FloodEvent>> {
    let from = filter.from.as_deref().map(validate_iso_date).transpose()?;
    let to = filter.to.as_deref().map(validate_iso_date).transpose()?;

    let events = sqlx::query_as::<_, FloodEvent>(
        r#"
        SELECT id, aoi_wkt, pre_product_id, post_product_id, pre_date, post_date,
               flood_mask_path, flooded_pct, flood_geom, created_at
        FROM flood_events
        WHERE (?1 IS NULL OR aoi_wkt = ?1)
          AND (?2 IS NULL OR date(post_date) >= ?2)
          AND (?3 IS NULL OR date(post_date) <= ?3)
        ORDER BY post_date DESC, id DESC
        "#,
    )
    .bind(&filter.aoi_wkt)
    .bind(&from)
    .bind(&to)
    .fetch_all(pool)
    .await?;

    Ok(events)
}

/// Count stored flood events.
pub async fn count_events(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM flood_events
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
