use sqlx::{PgConnection, PgPool};

use crate::models::AdPlacement;

const PLACEMENT_COLUMNS: &str = r#"
    id, name, slug, position, description,
    base_price, premium_price, elite_price,
    billing_type::text as billing_type, active, created_at, updated_at
"#;

/// Active placements in catalog order (cheapest first).
pub async fn list_active(pool: &PgPool) -> Result<Vec<AdPlacement>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {PLACEMENT_COLUMNS}
        FROM ad_placements
        WHERE active = true
        ORDER BY base_price ASC
        "#
    );

    sqlx::query_as::<_, AdPlacement>(&sql).fetch_all(pool).await
}

pub async fn get_active_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<AdPlacement>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {PLACEMENT_COLUMNS}
        FROM ad_placements
        WHERE id = $1 AND active = true
        "#
    );

    sqlx::query_as::<_, AdPlacement>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Transaction-scoped variant used during subscription activation.
pub async fn get_by_id(
    conn: &mut PgConnection,
    id: &str,
) -> Result<Option<AdPlacement>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {PLACEMENT_COLUMNS}
        FROM ad_placements
        WHERE id = $1
        "#
    );

    sqlx::query_as::<_, AdPlacement>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}
