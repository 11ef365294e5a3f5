use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Debug, FromRow)]
pub struct ApiKeyRecord {
    pub id: String,
    pub user_id: String,
    pub key_prefix: String,
    pub expires_at: Option<DateTime<Utc>>,
}

pub async fn find_active_by_hash(
    pool: &PgPool,
    key_hash: &str,
) -> Result<Option<ApiKeyRecord>, sqlx::Error> {
    sqlx::query_as::<_, ApiKeyRecord>(
        r#"
        SELECT id, user_id, key_prefix, expires_at
        FROM api_keys
        WHERE key_hash = $1 AND status = 'active'
        LIMIT 1
        "#,
    )
    .bind(key_hash)
    .fetch_optional(pool)
    .await
}

pub async fn touch_last_used(pool: &PgPool, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE api_keys SET last_used_at = now()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
