//! Influencer record persistence

use chrono::{DateTime, Utc};
use ivf_common::{Error, HealthClaim, InfluencerRecord, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqlitePool};

const SELECT_COLUMNS: &str = r#"
    SELECT id, normalized_name, name, bio, category, trust_score, followers,
           yearly_revenue, claims, last_updated
    FROM influencers
"#;

/// Insert a record, or overwrite the one already stored under its normalized name
///
/// Atomic on `normalized_name`: the existing row keeps its id and gets the
/// new content and `last_updated`. Returns the record as stored.
pub async fn upsert_influencer(
    pool: &SqlitePool,
    record: &InfluencerRecord,
) -> Result<InfluencerRecord> {
    let followers = i64::try_from(record.followers).map_err(|_| {
        Error::Internal(format!("follower count too large: {}", record.followers))
    })?;

    let id: String = sqlx::query_scalar(
        r#"
        INSERT INTO influencers (
            id, normalized_name, name, bio, category, trust_score, followers,
            yearly_revenue, claims, last_updated, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(normalized_name) DO UPDATE SET
            name = excluded.name,
            bio = excluded.bio,
            category = excluded.category,
            trust_score = excluded.trust_score,
            followers = excluded.followers,
            yearly_revenue = excluded.yearly_revenue,
            claims = excluded.claims,
            last_updated = excluded.last_updated
        RETURNING id
        "#,
    )
    .bind(&record.id)
    .bind(&record.normalized_name)
    .bind(&record.name)
    .bind(&record.bio)
    .bind(&record.category)
    .bind(i64::from(record.trust_score))
    .bind(followers)
    .bind(&record.yearly_revenue)
    .bind(Json(&record.claims))
    .bind(record.last_updated)
    .bind(record.last_updated)
    .fetch_one(pool)
    .await?;

    tracing::debug!(
        id = %id,
        normalized_name = %record.normalized_name,
        claims = record.claims.len(),
        "Influencer record upserted"
    );

    Ok(InfluencerRecord {
        id,
        ..record.clone()
    })
}

/// Load the record stored under a normalized name
pub async fn find_by_normalized_name(
    pool: &SqlitePool,
    normalized_name: &str,
) -> Result<Option<InfluencerRecord>> {
    let query = format!("{} WHERE normalized_name = ?", SELECT_COLUMNS);
    let row = sqlx::query(&query)
        .bind(normalized_name)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(record_from_row).transpose()
}

/// All stored records, highest trust score first
pub async fn list_by_trust_score(pool: &SqlitePool) -> Result<Vec<InfluencerRecord>> {
    let query = format!("{} ORDER BY trust_score DESC, name ASC", SELECT_COLUMNS);
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    rows.iter().map(record_from_row).collect()
}

fn record_from_row(row: &SqliteRow) -> Result<InfluencerRecord> {
    let id: String = row.try_get("id")?;
    let trust_score: i64 = row.try_get("trust_score")?;
    let followers: i64 = row.try_get("followers")?;
    let claims: Json<Vec<HealthClaim>> = row.try_get("claims")?;
    let last_updated: DateTime<Utc> = row.try_get("last_updated")?;

    Ok(InfluencerRecord {
        trust_score: u8::try_from(trust_score).map_err(|_| {
            Error::Internal(format!("stored trust score out of range for {}: {}", id, trust_score))
        })?,
        followers: u64::try_from(followers).map_err(|_| {
            Error::Internal(format!("stored follower count negative for {}: {}", id, followers))
        })?,
        name: row.try_get("name")?,
        normalized_name: row.try_get("normalized_name")?,
        bio: row.try_get("bio")?,
        category: row.try_get("category")?,
        yearly_revenue: row.try_get("yearly_revenue")?,
        claims: claims.0,
        last_updated,
        id,
    })
}
